pub mod cache;
pub mod config;
pub mod errors;
pub mod system;

// 重新导出常用类型
pub use cache::{Cache, CacheDriver, CacheItem, RedisCache};
pub use config::{AppConfig, RedisOptions};
pub use errors::CacheError;
