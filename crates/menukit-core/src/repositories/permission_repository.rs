//! Permission repository trait (port)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use menukit_shared::{PageResult, Pagination};

use crate::domain::{MenuPermissionLink, Permission, PermissionFilter};
use crate::error::DomainError;

/// Outcome of a link reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkChange {
    pub added: u64,
    pub removed: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn list_permissions(
        &self,
        filter: &PermissionFilter,
        page: Pagination,
    ) -> Result<PageResult<Permission>, DomainError>;
    async fn get_permissions_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Permission>, DomainError>;
    async fn list_menu_permission_ids(&self, menu_id: &Uuid) -> Result<Vec<Uuid>, DomainError>;
    /// All live menu-permission links, for gate attachment across the forest.
    async fn list_menu_permission_links(&self) -> Result<Vec<MenuPermissionLink>, DomainError>;
    /// Insert `add` (conflict-tolerant on the pair) and delete `remove` in
    /// one transaction where the store allows it. Adds run before removes, so
    /// a partial failure can only leave the link set too permissive.
    async fn reconcile_menu_permissions(
        &self,
        menu_id: &Uuid,
        add: &[Uuid],
        remove: &[Uuid],
    ) -> Result<LinkChange, DomainError>;
}
