pub mod address;
pub mod backend;
pub mod connection;
pub mod driver;
pub mod item;
pub mod memory_cache;
pub mod redis_cache;
pub mod traits;

pub use address::{AddressKind, ConnectionTarget, classify};
pub use backend::{CommandSet, Connector};
pub use connection::ConnectionManager;
pub use driver::{CacheDriver, RedisCache};
pub use item::CacheItem;
pub use memory_cache::{MemoryConnection, MemoryConnector};
pub use redis_cache::RedisConnector;
pub use traits::Cache;
