// ============================================================================
// Menukit Core - Visibility Service
// File: crates/menukit-core/src/services/visibility_service.rs
// ============================================================================
//! Role-based visibility simulation: resolves a role's permission set and
//! prunes the menu forest the same way the runtime navigation does.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::Role;
use crate::error::DomainError;
use crate::repositories::{MenuRepository, PermissionRepository, RoleRepository};
use crate::tree::{attach_permission_gates, build_forest, filter_forest, MenuTreeNode};

pub struct VisibilityService<M, P, R> {
    menu_repo: Arc<M>,
    permission_repo: Arc<P>,
    role_repo: Arc<R>,
}

impl<M, P, R> VisibilityService<M, P, R>
where
    M: MenuRepository,
    P: PermissionRepository,
    R: RoleRepository,
{
    pub fn new(menu_repo: Arc<M>, permission_repo: Arc<P>, role_repo: Arc<R>) -> Self {
        Self {
            menu_repo,
            permission_repo,
            role_repo,
        }
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, DomainError> {
        self.role_repo.list_roles().await
    }

    /// The navigation forest a holder of `granted` would see. This is the
    /// reference computation for runtime menu filtering.
    pub async fn visible_tree(
        &self,
        granted: &HashSet<Uuid>,
    ) -> Result<Vec<MenuTreeNode>, DomainError> {
        let nodes = self.menu_repo.list_nodes().await?;
        let links = self.permission_repo.list_menu_permission_links().await?;

        let mut forest = build_forest(nodes);
        attach_permission_gates(&mut forest, &links);
        Ok(filter_forest(&forest, granted))
    }

    /// Admin-side "preview as role X".
    pub async fn preview_as_role(
        &self,
        role_id: &Uuid,
    ) -> Result<Vec<MenuTreeNode>, DomainError> {
        let role = self
            .role_repo
            .get_role(role_id)
            .await?
            .ok_or(DomainError::RoleNotFound(*role_id))?;

        let granted: HashSet<Uuid> = self
            .role_repo
            .list_role_permission_ids(role_id)
            .await?
            .into_iter()
            .collect();

        info!(
            "Previewing navigation as role {} ({} permissions)",
            role.code,
            granted.len()
        );
        self.visible_tree(&granted).await
    }
}
