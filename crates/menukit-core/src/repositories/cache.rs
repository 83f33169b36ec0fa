//! Navigation cache invalidation port

use async_trait::async_trait;

use crate::error::DomainError;

/// Signal consumed by whatever caching layer fronts the navigation read
/// path. Mutating services emit it fire-and-forget after a successful write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NavigationCacheInvalidator: Send + Sync {
    async fn invalidate(&self) -> Result<(), DomainError>;
}
