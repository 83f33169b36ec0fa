// ============================================================================
// Menukit Infrastructure - PostgreSQL Permission Repository
// File: crates/menukit-infrastructure/src/database/postgres/permission_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use menukit_core::domain::{
    MenuPermissionLink, Permission, PermissionAction, PermissionCategory, PermissionFilter,
};
use menukit_core::error::DomainError;
use menukit_core::repositories::{LinkChange, PermissionRepository};
use menukit_shared::{PageResult, Pagination};

pub struct PgPermissionRepository {
    pool: PgPool,
}

impl PgPermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionRepository for PgPermissionRepository {
    async fn list_permissions(
        &self,
        filter: &PermissionFilter,
        page: Pagination,
    ) -> Result<PageResult<Permission>, DomainError> {
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let category = filter.category.map(|c| c.as_str());
        let active = filter.status.as_active_flag();

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM permissions
            WHERE ($1::text IS NULL
                   OR code ILIKE '%' || $1 || '%'
                   OR name ILIKE '%' || $1 || '%'
                   OR resource ILIKE '%' || $1 || '%')
              AND ($2::uuid IS NULL OR module_id = $2)
              AND ($3::text IS NULL OR category = $3)
              AND ($4::boolean IS NULL OR is_active = $4)
            "#,
        )
        .bind(search)
        .bind(filter.module_id)
        .bind(category)
        .bind(active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error counting permissions: {}", e);
            DomainError::database("list_permissions", e.to_string())
        })?;

        let rows: Vec<PermissionRow> = sqlx::query_as(
            r#"
            SELECT id, code, name, module_id, resource, action, category,
                   is_active, created_at
            FROM permissions
            WHERE ($1::text IS NULL
                   OR code ILIKE '%' || $1 || '%'
                   OR name ILIKE '%' || $1 || '%'
                   OR resource ILIKE '%' || $1 || '%')
              AND ($2::uuid IS NULL OR module_id = $2)
              AND ($3::text IS NULL OR category = $3)
              AND ($4::boolean IS NULL OR is_active = $4)
            ORDER BY code
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(search)
        .bind(filter.module_id)
        .bind(category)
        .bind(active)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing permissions: {}", e);
            DomainError::database("list_permissions", e.to_string())
        })?;

        Ok(PageResult {
            data: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn get_permissions_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Permission>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<PermissionRow> = sqlx::query_as(
            r#"
            SELECT id, code, name, module_id, resource, action, category,
                   is_active, created_at
            FROM permissions
            WHERE id = ANY($1)
            ORDER BY code
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error loading permissions by ids: {}", e);
            DomainError::database("get_permissions_by_ids", e.to_string())
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_menu_permission_ids(&self, menu_id: &Uuid) -> Result<Vec<Uuid>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT permission_id
            FROM menu_permissions
            WHERE menu_id = $1
            "#,
        )
        .bind(menu_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!(
                "Database error listing permission ids for menu {}: {}",
                menu_id, e
            );
            DomainError::database("list_menu_permission_ids", e.to_string())
        })
    }

    async fn list_menu_permission_links(&self) -> Result<Vec<MenuPermissionLink>, DomainError> {
        let rows: Vec<MenuPermissionLinkRow> = sqlx::query_as(
            r#"
            SELECT mp.menu_id, mp.permission_id, mp.created_at, mp.created_by
            FROM menu_permissions mp
            JOIN menu_nodes mn ON mn.id = mp.menu_id
            WHERE mn.removed_at IS NULL
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing menu permission links: {}", e);
            DomainError::database("list_menu_permission_links", e.to_string())
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn reconcile_menu_permissions(
        &self,
        menu_id: &Uuid,
        add: &[Uuid],
        remove: &[Uuid],
    ) -> Result<LinkChange, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Database error starting reconcile transaction: {}", e);
            DomainError::database("reconcile_menu_permissions", e.to_string())
        })?;

        // Adds run first so an interrupted reconcile can only leave the link
        // set too permissive, never too restrictive.
        let mut added = 0u64;
        if !add.is_empty() {
            let result = sqlx::query(
                r#"
                INSERT INTO menu_permissions (menu_id, permission_id, created_at)
                SELECT $1, t.permission_id, NOW()
                FROM UNNEST($2::uuid[]) AS t(permission_id)
                ON CONFLICT (menu_id, permission_id) DO NOTHING
                "#,
            )
            .bind(menu_id)
            .bind(add)
            .execute(&mut *tx)
            .await
            .map_err(|e: sqlx::Error| {
                error!(
                    "Database error adding permission links for menu {}: {}",
                    menu_id, e
                );
                DomainError::database("reconcile_menu_permissions", e.to_string())
            })?;
            added = result.rows_affected();
        }

        let mut removed = 0u64;
        if !remove.is_empty() {
            let result = sqlx::query(
                r#"
                DELETE FROM menu_permissions
                WHERE menu_id = $1 AND permission_id = ANY($2)
                "#,
            )
            .bind(menu_id)
            .bind(remove)
            .execute(&mut *tx)
            .await
            .map_err(|e: sqlx::Error| {
                error!(
                    "Database error removing permission links for menu {}: {}",
                    menu_id, e
                );
                DomainError::database("reconcile_menu_permissions", e.to_string())
            })?;
            removed = result.rows_affected();
        }

        tx.commit().await.map_err(|e| {
            error!("Database error committing reconcile transaction: {}", e);
            DomainError::database("reconcile_menu_permissions", e.to_string())
        })?;

        info!(
            "Reconciled permissions for menu {}: +{} -{}",
            menu_id, added, removed
        );
        Ok(LinkChange { added, removed })
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct PermissionRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub module_id: Option<Uuid>,
    pub resource: String,
    pub action: String,
    pub category: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<PermissionRow> for Permission {
    fn from(row: PermissionRow) -> Self {
        Permission {
            id: row.id,
            code: row.code,
            name: row.name,
            module_id: row.module_id,
            resource: row.resource,
            action: PermissionAction::from_str(&row.action).unwrap_or_default(),
            category: PermissionCategory::from_str(&row.category).unwrap_or_default(),
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct MenuPermissionLinkRow {
    pub menu_id: Uuid,
    pub permission_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

impl From<MenuPermissionLinkRow> for MenuPermissionLink {
    fn from(row: MenuPermissionLinkRow) -> Self {
        MenuPermissionLink {
            menu_id: row.menu_id,
            permission_id: row.permission_id,
            created_at: row.created_at,
            created_by: row.created_by,
        }
    }
}
