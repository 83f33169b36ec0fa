// ============================================================================
// Menukit Infrastructure - Redis Navigation Cache Invalidator
// File: crates/menukit-infrastructure/src/cache/redis_invalidator.rs
// ============================================================================
//! Publishes navigation-cache invalidation events. Downstream navigation
//! caches subscribe to the channel and drop their cached trees on receipt.

use async_trait::async_trait;
use chrono::Utc;
use deadpool_redis::{redis::cmd, Config, CreatePoolError, Pool, PoolConfig, Runtime};
use tracing::debug;

use menukit_core::error::DomainError;
use menukit_core::repositories::NavigationCacheInvalidator;
use menukit_shared::constants::NAVIGATION_INVALIDATION_CHANNEL;

pub fn create_redis_pool(url: &str, max_connections: usize) -> Result<Pool, CreatePoolError> {
    let mut config = Config::from_url(url);
    config.pool = Some(PoolConfig::new(max_connections));
    config.create_pool(Some(Runtime::Tokio1))
}

pub struct RedisNavigationCache {
    pool: Pool,
}

impl RedisNavigationCache {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NavigationCacheInvalidator for RedisNavigationCache {
    async fn invalidate(&self) -> Result<(), DomainError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| DomainError::CacheError(e.to_string()))?;

        cmd("PUBLISH")
            .arg(NAVIGATION_INVALIDATION_CHANNEL)
            .arg(Utc::now().timestamp_millis())
            .query_async::<i64>(&mut conn)
            .await
            .map_err(|e| DomainError::CacheError(e.to_string()))?;

        debug!("Navigation cache invalidation published");
        Ok(())
    }
}
