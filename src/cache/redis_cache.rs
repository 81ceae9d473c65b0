use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};

use crate::cache::address::ConnectionTarget;
use crate::cache::backend::{CommandSet, Connector};
use crate::errors::CacheError;

/// Redis 连接工厂（异步多路复用连接）
#[derive(Debug, Clone, Copy, Default)]
pub struct RedisConnector;

impl RedisConnector {
    fn connection_info(target: &ConnectionTarget) -> Result<ConnectionInfo, CacheError> {
        let addr = match target {
            ConnectionTarget::Network { host, port } => ConnectionAddr::Tcp(host.clone(), *port),
            #[cfg(unix)]
            ConnectionTarget::LocalSocket { path } => ConnectionAddr::Unix(path.clone()),
            #[cfg(not(unix))]
            ConnectionTarget::LocalSocket { .. } => {
                return Err(CacheError::Connection(format!(
                    "{}: unix sockets are not supported on this platform",
                    target
                )));
            }
        };

        Ok(ConnectionInfo {
            addr,
            redis: RedisConnectionInfo::default(),
        })
    }
}

#[async_trait]
impl Connector for RedisConnector {
    type Connection = MultiplexedConnection;

    /// 异步 Redis 客户端依赖 tokio 运行时
    fn ensure_supported(&self) -> Result<(), CacheError> {
        tokio::runtime::Handle::try_current().map(|_| ()).map_err(|_| {
            CacheError::UnsupportedBackend("Redis not supported: no tokio runtime available".into())
        })
    }

    async fn connect(&self, target: &ConnectionTarget) -> Result<MultiplexedConnection, CacheError> {
        let info = Self::connection_info(target)?;
        let client = Client::open(info)
            .map_err(|e| CacheError::Connection(format!("{}: {}", target, e)))?;

        client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Connection(format!("{}: {}", target, e)))
    }
}

#[async_trait]
impl CommandSet for MultiplexedConnection {
    async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(AsyncCommands::get(self, key).await?)
    }

    async fn set(&mut self, key: &str, value: &[u8], ttl: Option<u64>) -> Result<(), CacheError> {
        let result: redis::RedisResult<()> = match ttl {
            Some(ttl_secs) => AsyncCommands::set_ex(self, key, value, ttl_secs).await,
            None => AsyncCommands::set(self, key, value).await,
        };
        Ok(result?)
    }

    async fn del(&mut self, key: &str) -> Result<u64, CacheError> {
        Ok(AsyncCommands::del(self, key).await?)
    }

    async fn exists(&mut self, key: &str) -> Result<bool, CacheError> {
        Ok(AsyncCommands::exists(self, key).await?)
    }

    async fn flush_all(&mut self) -> Result<(), CacheError> {
        let result: redis::RedisResult<()> = redis::cmd("FLUSHALL").query_async(self).await;
        Ok(result?)
    }
}
