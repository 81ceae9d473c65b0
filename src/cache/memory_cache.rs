use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache as MokaCache;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::cache::address::ConnectionTarget;
use crate::cache::backend::{CommandSet, Connector};
use crate::errors::CacheError;

/// 内存中的存储项，`ttl` 为 `None` 表示永不过期
#[derive(Clone)]
struct StoredEntry {
    value: Arc<[u8]>,
    ttl: Option<Duration>,
}

/// 按存储项自身的 TTL 过期，覆盖写入时重新计时（与 Redis SET 一致）
struct EntryExpiry;

impl Expiry<String, StoredEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// 进程内缓存后端（基于 Moka）
///
/// 所有连接共享同一个存储，行为类似一台服务器。适用于测试和没有 Redis 的开发环境，
/// 同时记录建立过的连接数量。
#[derive(Clone)]
pub struct MemoryConnector {
    store: MokaCache<String, StoredEntry>,
    connections: Arc<AtomicUsize>,
    last_target: Arc<Mutex<Option<ConnectionTarget>>>,
}

impl MemoryConnector {
    pub fn new(max_capacity: u64) -> Self {
        let store = MokaCache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .build();

        Self {
            store,
            connections: Arc::new(AtomicUsize::new(0)),
            last_target: Arc::new(Mutex::new(None)),
        }
    }

    /// 已建立的连接数量
    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// 最近一次连接的目标
    pub fn last_target(&self) -> Option<ConnectionTarget> {
        self.last_target.lock().ok().and_then(|t| t.clone())
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    type Connection = MemoryConnection;

    fn ensure_supported(&self) -> Result<(), CacheError> {
        Ok(())
    }

    async fn connect(&self, target: &ConnectionTarget) -> Result<MemoryConnection, CacheError> {
        self.connections.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_target.lock() {
            *last = Some(target.clone());
        }

        Ok(MemoryConnection {
            store: self.store.clone(),
        })
    }
}

/// [`MemoryConnector`] 建立的连接
pub struct MemoryConnection {
    store: MokaCache<String, StoredEntry>,
}

#[async_trait]
impl CommandSet for MemoryConnection {
    async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.store.get(key).await.map(|entry| entry.value.to_vec()))
    }

    async fn set(&mut self, key: &str, value: &[u8], ttl: Option<u64>) -> Result<(), CacheError> {
        let entry = StoredEntry {
            value: Arc::from(value),
            ttl: ttl.map(Duration::from_secs),
        };
        self.store.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn del(&mut self, key: &str) -> Result<u64, CacheError> {
        Ok(self.store.remove(key).await.map_or(0, |_| 1))
    }

    async fn exists(&mut self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.get(key).await.is_some())
    }

    async fn flush_all(&mut self) -> Result<(), CacheError> {
        self.store.invalidate_all();
        self.store.run_pending_tasks().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> ConnectionTarget {
        ConnectionTarget::Network {
            host: "127.0.0.1".into(),
            port: 6379,
        }
    }

    #[tokio::test]
    async fn test_connections_share_store() {
        let connector = MemoryConnector::new(100);
        let mut first = connector.connect(&target()).await.unwrap();
        let mut second = connector.connect(&target()).await.unwrap();

        first.set("shared", b"value", None).await.unwrap();
        assert_eq!(second.get("shared").await.unwrap(), Some(b"value".to_vec()));
        assert_eq!(connector.connection_count(), 2);
    }

    #[tokio::test]
    async fn test_del_counts_removed_keys() {
        let connector = MemoryConnector::new(100);
        let mut conn = connector.connect(&target()).await.unwrap();

        conn.set("k", b"v", None).await.unwrap();
        assert_eq!(conn.del("k").await.unwrap(), 1);
        assert_eq!(conn.del("k").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_overwrite_without_ttl_clears_expiry() {
        let connector = MemoryConnector::new(100);
        let mut conn = connector.connect(&target()).await.unwrap();

        conn.set("k", b"v1", Some(1)).await.unwrap();
        conn.set("k", b"v2", None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1200)).await;

        assert_eq!(conn.get("k").await.unwrap(), Some(b"v2".to_vec()));
    }
}
