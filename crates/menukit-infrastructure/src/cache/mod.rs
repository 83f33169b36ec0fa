//! Cache module (Redis adapters)

pub mod redis_invalidator;

pub use redis_invalidator::{create_redis_pool, RedisNavigationCache};
