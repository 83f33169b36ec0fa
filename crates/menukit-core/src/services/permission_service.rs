// ============================================================================
// Menukit Core - Permission Service
// File: crates/menukit-core/src/services/permission_service.rs
// ============================================================================
//! Permission listing, diff-based link reconciliation, resource suggestions,
//! and cross-module mismatch warnings for the permission editor.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use menukit_shared::constants::MAX_PAGE_SIZE;
use menukit_shared::{PageResult, Pagination};

use crate::domain::{MenuNode, Permission, PermissionFilter, StatusFilter};
use crate::error::DomainError;
use crate::repositories::{LinkChange, NavigationCacheInvalidator, PermissionRepository};
use crate::suggest::{suggest_permissions, suggest_resource};

/// One row of the "smart suggestions" view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedPermission {
    pub permission: Permission,
    pub score: u8,
}

pub struct PermissionService<P, C> {
    permission_repo: Arc<P>,
    invalidator: Arc<C>,
}

impl<P, C> PermissionService<P, C>
where
    P: PermissionRepository,
    C: NavigationCacheInvalidator + 'static,
{
    pub fn new(permission_repo: Arc<P>, invalidator: Arc<C>) -> Self {
        Self {
            permission_repo,
            invalidator,
        }
    }

    pub async fn list_permissions(
        &self,
        filter: &PermissionFilter,
        page: Pagination,
    ) -> Result<PageResult<Permission>, DomainError> {
        self.permission_repo
            .list_permissions(filter, page.clamped())
            .await
    }

    pub async fn list_menu_permission_ids(
        &self,
        menu_id: &Uuid,
    ) -> Result<Vec<Uuid>, DomainError> {
        self.permission_repo.list_menu_permission_ids(menu_id).await
    }

    /// Replace a node's permission set with `desired`.
    ///
    /// Only the difference against the currently linked set is written, so
    /// repeating the call with the same set is a no-op. An empty `desired`
    /// removes every link.
    pub async fn set_menu_permissions(
        &self,
        menu_id: &Uuid,
        desired: &[Uuid],
    ) -> Result<LinkChange, DomainError> {
        let current: HashSet<Uuid> = self
            .permission_repo
            .list_menu_permission_ids(menu_id)
            .await?
            .into_iter()
            .collect();
        let desired: HashSet<Uuid> = desired.iter().copied().collect();

        let mut to_add: Vec<Uuid> = desired.difference(&current).copied().collect();
        let mut to_remove: Vec<Uuid> = current.difference(&desired).copied().collect();
        to_add.sort();
        to_remove.sort();

        if to_add.is_empty() && to_remove.is_empty() {
            return Ok(LinkChange::default());
        }

        let change = self
            .permission_repo
            .reconcile_menu_permissions(menu_id, &to_add, &to_remove)
            .await?;
        info!(
            "Menu {} permissions reconciled: +{} -{}",
            menu_id, change.added, change.removed
        );
        self.spawn_invalidation();
        Ok(change)
    }

    /// Assigned permissions whose module differs from the node's module.
    /// A warning for the editor, never an enforcement.
    pub async fn module_mismatch_warnings(
        &self,
        node: &MenuNode,
        permission_ids: &[Uuid],
    ) -> Result<Vec<Permission>, DomainError> {
        let Some(node_module) = node.module_id else {
            return Ok(Vec::new());
        };
        let permissions = self
            .permission_repo
            .get_permissions_by_ids(permission_ids)
            .await?;
        Ok(permissions
            .into_iter()
            .filter(|p| p.module_id.is_some_and(|m| m != node_module))
            .collect())
    }

    /// Smart suggestions for a route path: derive a resource token, score
    /// every active permission against it, keep the convincing ones.
    pub async fn suggest_for_route(
        &self,
        route_path: &str,
    ) -> Result<Vec<SuggestedPermission>, DomainError> {
        let Some(token) = suggest_resource(route_path) else {
            return Ok(Vec::new());
        };

        let filter = PermissionFilter {
            status: StatusFilter::Active,
            ..Default::default()
        };

        // Score the full active set; a single page would silently drop
        // candidates once the catalog outgrows MAX_PAGE_SIZE.
        let mut candidates: Vec<Permission> = Vec::new();
        let mut page_no = 1u32;
        loop {
            let page = self
                .permission_repo
                .list_permissions(
                    &filter,
                    Pagination {
                        page: page_no,
                        per_page: MAX_PAGE_SIZE,
                    },
                )
                .await?;
            let total = page.total;
            let fetched = page.data.len();
            candidates.extend(page.data);
            if fetched == 0 || candidates.len() as i64 >= total {
                break;
            }
            page_no += 1;
        }

        Ok(suggest_permissions(&candidates, &token)
            .into_iter()
            .map(|(p, score)| SuggestedPermission {
                permission: p.clone(),
                score,
            })
            .collect())
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
    use crate::domain::{PermissionAction, PermissionCategory};
    use crate::repositories::cache::MockNavigationCacheInvalidator;
    use crate::repositories::permission_repository::MockPermissionRepository;

    fn permission(code: &str, resource: &str) -> Permission {
        Permission::new(
            code.to_string(),
            format!("{} permission", code),
            None,
            resource.to_string(),
            PermissionAction::Read,
            PermissionCategory::Page,
        )
        .unwrap()
    }

    fn service(
        repo: MockPermissionRepository,
    ) -> PermissionService<MockPermissionRepository, MockNavigationCacheInvalidator> {
        let mut invalidator = MockNavigationCacheInvalidator::new();
        invalidator.expect_invalidate().returning(|| Ok(()));
        PermissionService::new(Arc::new(repo), Arc::new(invalidator))
    }

    #[tokio::test]
    async fn test_reconcile_is_idempotent() {
        let menu_id = Uuid::new_v4();
        let linked = vec![Uuid::new_v4(), Uuid::new_v4()];
        let desired = linked.clone();

        let mut repo = MockPermissionRepository::new();
        let current = linked.clone();
        repo.expect_list_menu_permission_ids()
            .returning(move |_| Ok(current.clone()));
        repo.expect_reconcile_menu_permissions().times(0);

        let change = service(repo)
            .set_menu_permissions(&menu_id, &desired)
            .await
            .unwrap();
        assert_eq!(change, LinkChange::default());
    }

    #[tokio::test]
    async fn test_reconcile_writes_only_the_difference() {
        let menu_id = Uuid::new_v4();
        let keep = Uuid::new_v4();
        let stale = Uuid::new_v4();
        let gain = Uuid::new_v4();

        let mut repo = MockPermissionRepository::new();
        let current = vec![keep, stale];
        repo.expect_list_menu_permission_ids()
            .returning(move |_| Ok(current.clone()));
        repo.expect_reconcile_menu_permissions()
            .withf(move |_, add: &[Uuid], remove: &[Uuid]| add == [gain] && remove == [stale])
            .times(1)
            .returning(|_, add, remove| {
                Ok(LinkChange {
                    added: add.len() as u64,
                    removed: remove.len() as u64,
                })
            });

        let change = service(repo)
            .set_menu_permissions(&menu_id, &[keep, gain])
            .await
            .unwrap();
        assert_eq!(change, LinkChange { added: 1, removed: 1 });
    }

    #[tokio::test]
    async fn test_empty_desired_set_removes_all_links() {
        let menu_id = Uuid::new_v4();
        let mut ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        ids.sort();

        let mut repo = MockPermissionRepository::new();
        let current = ids.clone();
        repo.expect_list_menu_permission_ids()
            .returning(move |_| Ok(current.clone()));
        let expected = ids.clone();
        repo.expect_reconcile_menu_permissions()
            .withf(move |_, add: &[Uuid], remove: &[Uuid]| {
                add.is_empty() && remove == expected.as_slice()
            })
            .times(1)
            .returning(|_, _, remove| {
                Ok(LinkChange {
                    added: 0,
                    removed: remove.len() as u64,
                })
            });

        let change = service(repo)
            .set_menu_permissions(&menu_id, &[])
            .await
            .unwrap();
        assert_eq!(change.removed, 2);
    }

    #[tokio::test]
    async fn test_suggest_for_route_scores_candidates() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_list_permissions().returning(|_, _| {
            Ok(PageResult {
                data: vec![
                    permission("users.read", "users"),
                    permission("audit.read", "audit"),
                ],
                total: 2,
            })
        });

        let out = service(repo)
            .suggest_for_route("/system-admin/iam/users")
            .await
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].permission.code, "users.read");
        assert_eq!(out[0].score, 3);
    }

    #[tokio::test]
    async fn test_suggest_scores_candidates_beyond_the_first_page() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_list_permissions().times(2).returning(|_, page| {
            if page.page == 1 {
                let data = (0..MAX_PAGE_SIZE)
                    .map(|i| permission(&format!("widget.read.{}", i), "widgets"))
                    .collect();
                Ok(PageResult { data, total: 150 })
            } else {
                let mut data: Vec<Permission> = (0..49)
                    .map(|i| permission(&format!("report.read.{}", i), "reports"))
                    .collect();
                data.push(permission("users.read", "users"));
                Ok(PageResult { data, total: 150 })
            }
        });

        let out = service(repo)
            .suggest_for_route("/system-admin/iam/users")
            .await
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].permission.code, "users.read");
        assert_eq!(out[0].score, 3);
    }

    #[tokio::test]
    async fn test_suggest_for_group_node_is_empty() {
        let repo = MockPermissionRepository::new();
        let out = service(repo).suggest_for_route("").await.unwrap();
        assert!(out.is_empty());
    }
}
