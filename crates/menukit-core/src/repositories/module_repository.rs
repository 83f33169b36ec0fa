//! Module repository trait (port, read-only)

use async_trait::async_trait;

use crate::domain::Module;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModuleRepository: Send + Sync {
    async fn list_modules(&self) -> Result<Vec<Module>, DomainError>;
}
