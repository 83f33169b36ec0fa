// ============================================================================
// Menukit Core - Menu Service
// File: crates/menukit-core/src/services/menu_service.rs
// ============================================================================
//! Administrative operations on the menu tree: listing, CRUD, drag-and-drop
//! moves, and the change-history panel. Every successful mutation emits a
//! fire-and-forget navigation-cache invalidation.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use menukit_shared::constants::ORDER_INDEX_STEP;

use crate::domain::{MenuHistoryEntry, MenuNode, MenuNodeInput, NodeFilter};
use crate::error::DomainError;
use crate::repositories::{MenuRepository, ModuleRepository, NavigationCacheInvalidator};
use crate::tree::{build_forest, plan_move, MenuTreeNode};

pub struct MenuService<R, M, C> {
    menu_repo: Arc<R>,
    module_repo: Arc<M>,
    invalidator: Arc<C>,
}

impl<R, M, C> MenuService<R, M, C>
where
    R: MenuRepository,
    M: ModuleRepository,
    C: NavigationCacheInvalidator + 'static,
{
    pub fn new(menu_repo: Arc<R>, module_repo: Arc<M>, invalidator: Arc<C>) -> Self {
        Self {
            menu_repo,
            module_repo,
            invalidator,
        }
    }

    /// Flat node list with the stateless filters applied.
    pub async fn list_nodes(&self, filter: &NodeFilter) -> Result<Vec<MenuNode>, DomainError> {
        let nodes = self.menu_repo.list_nodes().await?;
        let modules = if filter.module_group.is_some() {
            self.module_repo.list_modules().await?
        } else {
            Vec::new()
        };
        Ok(crate::domain::filters::filter_nodes(&nodes, filter, &modules))
    }

    /// Filtered nodes assembled into the admin tree view.
    pub async fn build_tree(&self, filter: &NodeFilter) -> Result<Vec<MenuTreeNode>, DomainError> {
        let nodes = self.list_nodes(filter).await?;
        Ok(build_forest(nodes))
    }

    pub async fn get_node(&self, id: &Uuid) -> Result<MenuNode, DomainError> {
        self.menu_repo
            .get_node(id)
            .await?
            .ok_or(DomainError::MenuNodeNotFound(*id))
    }

    /// Create a node at the end of its sibling group.
    pub async fn create_node(
        &self,
        input: MenuNodeInput,
        created_by: Option<Uuid>,
    ) -> Result<MenuNode, DomainError> {
        let nodes = self.menu_repo.list_nodes().await?;
        if let Some(parent_id) = input.parent_id {
            if !nodes.iter().any(|n| n.id == parent_id) {
                return Err(DomainError::MenuNodeNotFound(parent_id));
            }
        }
        let max_sibling_index = nodes
            .iter()
            .filter(|n| n.parent_id == input.parent_id)
            .map(|n| n.order_index)
            .max()
            .unwrap_or(0);

        let node = MenuNode::new(input, max_sibling_index + ORDER_INDEX_STEP, created_by)
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let created = self.menu_repo.create_node(&node).await?;
        info!("Menu node created: {} ({})", created.code, created.id);
        self.spawn_invalidation();
        Ok(created)
    }

    pub async fn update_node(
        &self,
        id: &Uuid,
        input: MenuNodeInput,
        modified_by: Option<Uuid>,
    ) -> Result<MenuNode, DomainError> {
        let mut node = self.get_node(id).await?;
        node.apply(input, modified_by)
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let updated = self.menu_repo.update_node(&node).await?;
        info!("Menu node updated: {} ({})", updated.code, updated.id);
        self.spawn_invalidation();
        Ok(updated)
    }

    /// Soft delete keeps the row for history and link integrity.
    pub async fn soft_delete_node(
        &self,
        id: &Uuid,
        removed_by: Option<Uuid>,
    ) -> Result<(), DomainError> {
        self.get_node(id).await?;
        self.menu_repo.soft_delete_node(id, removed_by).await?;
        info!("Menu node soft-deleted: {}", id);
        self.spawn_invalidation();
        Ok(())
    }

    /// Relocate a node under `new_parent_id` at `target_index`.
    ///
    /// Cycle-inducing moves are rejected before any write. A no-op plan
    /// skips persistence and invalidation entirely.
    pub async fn move_node(
        &self,
        drag_id: Uuid,
        new_parent_id: Option<Uuid>,
        target_index: usize,
    ) -> Result<(), DomainError> {
        let nodes = self.menu_repo.list_nodes().await?;
        let plan = plan_move(&nodes, drag_id, new_parent_id, target_index)?;
        if plan.is_empty() {
            return Ok(());
        }

        self.menu_repo.upsert_placements(&plan).await?;
        info!(
            "Menu node moved: {} -> parent {:?} ({} rows renumbered)",
            drag_id,
            new_parent_id,
            plan.len()
        );
        self.spawn_invalidation();
        Ok(())
    }

    pub async fn list_history(&self, limit: i64) -> Result<Vec<MenuHistoryEntry>, DomainError> {
        self.menu_repo.list_history(limit).await
    }

    fn spawn_invalidation(&self) {
        let invalidator = Arc::clone(&self.invalidator);
        tokio::spawn(async move {
            if let Err(e) = invalidator.invalidate().await {
                warn!("Navigation cache invalidation failed: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::cache::MockNavigationCacheInvalidator;
    use crate::repositories::menu_repository::MockMenuRepository;
    use crate::repositories::module_repository::MockModuleRepository;
    use crate::tree::NodePlacement;

    fn node(name: &str, parent_id: Option<Uuid>, order_index: i32) -> MenuNode {
        MenuNode::new(
            MenuNodeInput {
                code: format!("menu.{}", name.to_lowercase()),
                name: name.to_string(),
                parent_id,
                module_id: None,
                route_path: Some(format!("/{}", name.to_lowercase())),
                icon: None,
                is_active: true,
                metadata: None,
            },
            order_index,
            None,
        )
        .unwrap()
    }

    fn invalidator() -> Arc<MockNavigationCacheInvalidator> {
        let mut mock = MockNavigationCacheInvalidator::new();
        mock.expect_invalidate().returning(|| Ok(()));
        Arc::new(mock)
    }

    fn service(
        menu_repo: MockMenuRepository,
    ) -> MenuService<MockMenuRepository, MockModuleRepository, MockNavigationCacheInvalidator>
    {
        MenuService::new(
            Arc::new(menu_repo),
            Arc::new(MockModuleRepository::new()),
            invalidator(),
        )
    }

    #[tokio::test]
    async fn test_move_rejects_cycle_without_write() {
        let a = node("Alpha", None, 10);
        let b = node("Beta", Some(a.id), 10);
        let nodes = vec![a.clone(), b.clone()];

        let mut repo = MockMenuRepository::new();
        repo.expect_list_nodes()
            .returning(move || Ok(nodes.clone()));
        repo.expect_upsert_placements().times(0);

        let err = service(repo)
            .move_node(a.id, Some(b.id), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::CycleRejected { .. }));
    }

    #[tokio::test]
    async fn test_move_persists_only_changed_rows() {
        let a = node("Alpha", None, 10);
        let b = node("Beta", None, 20);
        let c = node("Gamma", Some(a.id), 10);
        let nodes = vec![a.clone(), b.clone(), c.clone()];
        let drag = c.id;

        let mut repo = MockMenuRepository::new();
        repo.expect_list_nodes()
            .returning(move || Ok(nodes.clone()));
        repo.expect_upsert_placements()
            .withf(move |plan: &[NodePlacement]| {
                plan.iter().any(|p| p.id == drag && p.parent_id.is_none())
                    && plan.iter().all(|p| p.order_index % 10 == 0)
            })
            .times(1)
            .returning(|_| Ok(()));

        service(repo).move_node(drag, None, 1).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_appends_after_existing_siblings() {
        let a = node("Alpha", None, 10);
        let b = node("Beta", None, 20);
        let nodes = vec![a, b];

        let mut repo = MockMenuRepository::new();
        repo.expect_list_nodes()
            .returning(move || Ok(nodes.clone()));
        repo.expect_create_node()
            .withf(|n: &MenuNode| n.order_index == 30)
            .times(1)
            .returning(|n| Ok(n.clone()));

        let input = MenuNodeInput {
            code: "menu.gamma".to_string(),
            name: "Gamma".to_string(),
            parent_id: None,
            module_id: None,
            route_path: Some("/gamma".to_string()),
            icon: None,
            is_active: true,
            metadata: None,
        };
        let created = service(repo).create_node(input, None).await.unwrap();
        assert_eq!(created.order_index, 30);
    }

    #[tokio::test]
    async fn test_create_under_missing_parent_is_not_found() {
        let a = node("Alpha", None, 10);
        let nodes = vec![a];
        let ghost = Uuid::new_v4();

        let mut repo = MockMenuRepository::new();
        repo.expect_list_nodes()
            .returning(move || Ok(nodes.clone()));
        repo.expect_create_node().times(0);

        let input = MenuNodeInput {
            code: "menu.gamma".to_string(),
            name: "Gamma".to_string(),
            parent_id: Some(ghost),
            module_id: None,
            route_path: Some("/gamma".to_string()),
            icon: None,
            is_active: true,
            metadata: None,
        };
        let err = service(repo).create_node(input, None).await.unwrap_err();
        assert!(matches!(err, DomainError::MenuNodeNotFound(id) if id == ghost));
    }

    #[tokio::test]
    async fn test_update_missing_node_is_not_found() {
        let mut repo = MockMenuRepository::new();
        repo.expect_get_node().returning(|_| Ok(None));

        let input = MenuNodeInput {
            code: "menu.gamma".to_string(),
            name: "Gamma".to_string(),
            parent_id: None,
            module_id: None,
            route_path: None,
            icon: None,
            is_active: true,
            metadata: None,
        };
        let err = service(repo)
            .update_node(&Uuid::new_v4(), input, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MenuNodeNotFound(_)));
    }
}
