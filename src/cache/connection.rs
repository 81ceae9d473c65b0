use tokio::sync::{Mutex, MutexGuard, OnceCell};

use crate::cache::address::ConnectionTarget;
use crate::cache::backend::Connector;
use crate::config::RedisOptions;
use crate::errors::CacheError;

/// 连接管理器
///
/// 每个实例最多持有一条连接，首次使用时才建立，之后一直复用。
/// 建立失败不会留下句柄，下一次操作会重新尝试。
pub struct ConnectionManager<C: Connector> {
    options: RedisOptions,
    connector: C,
    handle: OnceCell<Mutex<C::Connection>>,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(options: RedisOptions, connector: C) -> Self {
        Self {
            options,
            connector,
            handle: OnceCell::new(),
        }
    }

    /// 建立连接，已连接时直接返回
    pub async fn connect(&self) -> Result<(), CacheError> {
        self.establish().await.map(|_| ())
    }

    pub fn is_connected(&self) -> bool {
        self.handle.initialized()
    }

    pub fn options(&self) -> &RedisOptions {
        &self.options
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// 获取连接句柄，必要时先建立连接
    pub(crate) async fn handle(&self) -> Result<MutexGuard<'_, C::Connection>, CacheError> {
        Ok(self.establish().await?.lock().await)
    }

    async fn establish(&self) -> Result<&Mutex<C::Connection>, CacheError> {
        self.handle
            .get_or_try_init(|| async {
                let target = ConnectionTarget::resolve(&self.options);
                tracing::debug!("Connecting to cache server: {}", target);

                match self.connector.connect(&target).await {
                    Ok(conn) => {
                        tracing::info!("Cache server connected: {}", target);
                        Ok(Mutex::new(conn))
                    }
                    Err(e) => {
                        tracing::error!("Cache connection to {} failed: {}", target, e);
                        Err(e)
                    }
                }
            })
            .await
    }
}
