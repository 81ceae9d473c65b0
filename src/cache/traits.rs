use async_trait::async_trait;

use crate::cache::item::CacheItem;
use crate::errors::CacheError;

/// 缓存特征
///
/// `Err` 只用于连接、能力检查和非法键；远端命令失败以 `Ok(false)`
/// 或未命中的 [`CacheItem`] 返回，调用方需要检查返回值。
#[async_trait]
pub trait Cache: Send + Sync {
    /// 获取缓存项，未命中时 `has_value()` 为 false
    async fn get(&self, key: &str) -> Result<CacheItem, CacheError>;

    /// 设置缓存值，`ttl` 为过期秒数，`None` 或 `Some(0)` 表示不过期
    async fn set(&self, key: &str, value: &[u8], ttl: Option<u64>) -> Result<bool, CacheError>;

    /// 删除缓存，至少删除一个键时返回 true
    async fn remove(&self, key: &str) -> Result<bool, CacheError>;

    /// 检查键是否存在
    async fn exists(&self, key: &str) -> Result<bool, CacheError>;

    /// 清空服务端全部缓存（不只是本实例写入的键）
    async fn clear(&self) -> Result<bool, CacheError>;

    /// 批量获取，按输入顺序返回
    async fn get_multiple(&self, keys: &[&str]) -> Result<Vec<CacheItem>, CacheError> {
        let mut items = Vec::with_capacity(keys.len());
        for key in keys {
            items.push(self.get(key).await?);
        }
        Ok(items)
    }

    /// 批量设置，全部成功才返回 true（失败的条目不会中断后续写入）
    async fn set_multiple(
        &self,
        entries: &[(&str, &[u8])],
        ttl: Option<u64>,
    ) -> Result<bool, CacheError> {
        let mut all_stored = true;
        for (key, value) in entries {
            all_stored &= self.set(key, value, ttl).await?;
        }
        Ok(all_stored)
    }

    /// 批量删除，每个键都被删除才返回 true
    async fn remove_multiple(&self, keys: &[&str]) -> Result<bool, CacheError> {
        let mut all_removed = true;
        for key in keys {
            all_removed &= self.remove(key).await?;
        }
        Ok(all_removed)
    }
}
