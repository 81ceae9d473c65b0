pub mod args;
mod loader;
pub mod structs;

pub use structs::{AppConfig, LogConfig, RedisOptions, DEFAULT_REDIS_HOST, DEFAULT_REDIS_PORT};
