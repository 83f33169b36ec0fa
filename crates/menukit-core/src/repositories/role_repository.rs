//! Role repository trait (port, read-only)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Role;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn list_roles(&self) -> Result<Vec<Role>, DomainError>;
    async fn get_role(&self, id: &Uuid) -> Result<Option<Role>, DomainError>;
    async fn list_role_permission_ids(&self, role_id: &Uuid) -> Result<Vec<Uuid>, DomainError>;
}
