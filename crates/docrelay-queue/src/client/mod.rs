//! Redis client wrapper and connection management.

mod redis_client;
mod redis_config;

pub use redis_client::RedisClient;
pub use redis_config::RedisConfig;
