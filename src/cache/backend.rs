use async_trait::async_trait;

use crate::cache::address::ConnectionTarget;
use crate::errors::CacheError;

/// 远端缓存服务的命令集
///
/// 一个实现对应一条独占的连接。返回 `Err` 表示命令本身失败，
/// 由驱动层转换为 `false` 或未命中。
#[async_trait]
pub trait CommandSet: Send {
    /// GET，键不存在返回 `None`
    async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// SET，`ttl` 为 `Some` 时以单条命令同时设置过期时间（秒）
    async fn set(&mut self, key: &str, value: &[u8], ttl: Option<u64>) -> Result<(), CacheError>;

    /// DEL，返回删除的键数量
    async fn del(&mut self, key: &str) -> Result<u64, CacheError>;

    async fn exists(&mut self, key: &str) -> Result<bool, CacheError>;

    /// FLUSHALL，清空整个服务端
    async fn flush_all(&mut self) -> Result<(), CacheError>;
}

/// 建立连接的工厂
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: CommandSet;

    /// 检查客户端能力是否可用，只在构造驱动时调用一次
    fn ensure_supported(&self) -> Result<(), CacheError>;

    async fn connect(&self, target: &ConnectionTarget) -> Result<Self::Connection, CacheError>;
}
