use async_trait::async_trait;

use crate::cache::backend::{CommandSet, Connector};
use crate::cache::connection::ConnectionManager;
use crate::cache::item::CacheItem;
use crate::cache::redis_cache::RedisConnector;
use crate::cache::traits::Cache;
use crate::config::RedisOptions;
use crate::errors::CacheError;

/// Redis 缓存驱动
pub type RedisCache = CacheDriver<RedisConnector>;

/// 缓存驱动
///
/// 每个操作都先确保已连接（仅第一次真正建立连接），再发出一条远端命令。
pub struct CacheDriver<C: Connector> {
    connection: ConnectionManager<C>,
}

impl RedisCache {
    /// 创建 Redis 缓存驱动，不会立即连接
    pub fn new(options: RedisOptions) -> Result<Self, CacheError> {
        Self::with_connector(options, RedisConnector)
    }
}

impl<C: Connector> CacheDriver<C> {
    /// 使用指定连接工厂创建驱动
    ///
    /// 能力检查只在这里做一次，失败时返回 `UnsupportedBackend`。
    pub fn with_connector(options: RedisOptions, connector: C) -> Result<Self, CacheError> {
        connector.ensure_supported()?;

        Ok(Self {
            connection: ConnectionManager::new(options, connector),
        })
    }

    /// 建立连接，已连接时为空操作
    pub async fn connect(&self) -> Result<(), CacheError> {
        self.connection.connect().await
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    pub fn options(&self) -> &RedisOptions {
        self.connection.options()
    }

    pub fn connector(&self) -> &C {
        self.connection.connector()
    }
}

fn validate_key(key: &str) -> Result<(), CacheError> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey);
    }
    Ok(())
}

#[async_trait]
impl<C: Connector> Cache for CacheDriver<C> {
    async fn get(&self, key: &str) -> Result<CacheItem, CacheError> {
        validate_key(key)?;
        let mut conn = self.connection.handle().await?;

        let mut item = CacheItem::new(key);
        match conn.get(key).await {
            Ok(Some(value)) => item.set_value(value),
            Ok(None) => tracing::debug!("Cache miss: {}", key),
            Err(e) => tracing::warn!("Cache GET {} failed, treating as miss: {}", key, e),
        }

        Ok(item)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<u64>) -> Result<bool, CacheError> {
        validate_key(key)?;
        let mut conn = self.connection.handle().await?;

        // ttl 为 0 与未设置等价
        let ttl = ttl.filter(|secs| *secs > 0);
        match conn.set(key, value, ttl).await {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::warn!("Cache SET {} failed: {}", key, e);
                Ok(false)
            }
        }
    }

    async fn remove(&self, key: &str) -> Result<bool, CacheError> {
        validate_key(key)?;
        let mut conn = self.connection.handle().await?;

        match conn.del(key).await {
            Ok(removed) => Ok(removed > 0),
            Err(e) => {
                tracing::warn!("Cache DEL {} failed: {}", key, e);
                Ok(false)
            }
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        validate_key(key)?;
        let mut conn = self.connection.handle().await?;

        match conn.exists(key).await {
            Ok(found) => Ok(found),
            Err(e) => {
                tracing::warn!("Cache EXISTS {} failed: {}", key, e);
                Ok(false)
            }
        }
    }

    async fn clear(&self) -> Result<bool, CacheError> {
        let mut conn = self.connection.handle().await?;

        // FLUSHALL 会清空整个服务端，包括其他应用写入的键
        match conn.flush_all().await {
            Ok(()) => {
                tracing::info!("Cache flushed: {}", self.options().host);
                Ok(true)
            }
            Err(e) => {
                tracing::warn!("Cache FLUSHALL failed: {}", e);
                Ok(false)
            }
        }
    }
}
