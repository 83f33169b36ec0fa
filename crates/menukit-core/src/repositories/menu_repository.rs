//! Menu node repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{MenuHistoryEntry, MenuNode};
use crate::error::DomainError;
use crate::tree::NodePlacement;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// All live (not soft-deleted) nodes, active or not.
    async fn list_nodes(&self) -> Result<Vec<MenuNode>, DomainError>;
    async fn get_node(&self, id: &Uuid) -> Result<Option<MenuNode>, DomainError>;
    /// Apply a move plan in one transaction. Every placement carries the row
    /// version it was computed against; a stale row aborts the whole write
    /// with `ConflictStale`.
    async fn upsert_placements(&self, placements: &[NodePlacement]) -> Result<(), DomainError>;
    async fn create_node(&self, node: &MenuNode) -> Result<MenuNode, DomainError>;
    async fn update_node(&self, node: &MenuNode) -> Result<MenuNode, DomainError>;
    async fn soft_delete_node(
        &self,
        id: &Uuid,
        removed_by: Option<Uuid>,
    ) -> Result<(), DomainError>;
    async fn list_history(&self, limit: i64) -> Result<Vec<MenuHistoryEntry>, DomainError>;
}
