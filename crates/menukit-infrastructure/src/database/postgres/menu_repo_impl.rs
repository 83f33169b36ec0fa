// ============================================================================
// Menukit Infrastructure - PostgreSQL Menu Repository
// File: crates/menukit-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info, warn};
use uuid::Uuid;

use menukit_core::domain::{MenuHistoryEntry, MenuNode};
use menukit_core::error::DomainError;
use menukit_core::repositories::MenuRepository;
use menukit_core::tree::NodePlacement;

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn list_nodes(&self) -> Result<Vec<MenuNode>, DomainError> {
        let rows: Vec<MenuNodeRow> = sqlx::query_as(
            r#"
            SELECT
                id, code, name, parent_id, module_id, route_path, icon,
                order_index, is_active, metadata,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM menu_nodes
            WHERE removed_at IS NULL
            ORDER BY order_index, name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing menu nodes: {}", e);
            DomainError::database("list_nodes", e.to_string())
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_node(&self, id: &Uuid) -> Result<Option<MenuNode>, DomainError> {
        let row: Option<MenuNodeRow> = sqlx::query_as(
            r#"
            SELECT
                id, code, name, parent_id, module_id, route_path, icon,
                order_index, is_active, metadata,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            FROM menu_nodes
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding menu node by id {}: {}", id, e);
            DomainError::database("get_node", e.to_string())
        })?;

        Ok(row.map(Into::into))
    }

    async fn upsert_placements(&self, placements: &[NodePlacement]) -> Result<(), DomainError> {
        if placements.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Database error starting move transaction: {}", e);
            DomainError::database("upsert_placements", e.to_string())
        })?;

        for placement in placements {
            let result = sqlx::query(
                r#"
                UPDATE menu_nodes
                SET parent_id = $2, order_index = $3, modified_at = NOW()
                WHERE id = $1
                  AND removed_at IS NULL
                  AND modified_at IS NOT DISTINCT FROM $4
                "#,
            )
            .bind(placement.id)
            .bind(placement.parent_id)
            .bind(placement.order_index)
            .bind(placement.expected_modified_at)
            .execute(&mut *tx)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error writing placement {}: {}", placement.id, e);
                DomainError::database("upsert_placements", e.to_string())
            })?;

            // A guarded update that misses means the row moved on since the
            // plan was computed; dropping the transaction rolls it all back.
            if result.rows_affected() != 1 {
                warn!(
                    "Stale row detected while moving node {}; aborting plan",
                    placement.id
                );
                return Err(DomainError::ConflictStale);
            }
        }

        tx.commit().await.map_err(|e| {
            error!("Database error committing move transaction: {}", e);
            DomainError::database("upsert_placements", e.to_string())
        })?;

        Ok(())
    }

    async fn create_node(&self, node: &MenuNode) -> Result<MenuNode, DomainError> {
        info!("Creating menu node: {}", node.code);

        let row: MenuNodeRow = sqlx::query_as(
            r#"
            INSERT INTO menu_nodes (
                id, code, name, parent_id, module_id, route_path, icon,
                order_index, is_active, metadata,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING
                id, code, name, parent_id, module_id, route_path, icon,
                order_index, is_active, metadata,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            "#,
        )
        .bind(node.id)
        .bind(&node.code)
        .bind(&node.name)
        .bind(node.parent_id)
        .bind(node.module_id)
        .bind(&node.route_path)
        .bind(&node.icon)
        .bind(node.order_index)
        .bind(node.is_active)
        .bind(&node.metadata)
        .bind(node.created_at)
        .bind(node.created_by)
        .bind(node.modified_at)
        .bind(node.modified_by)
        .bind(node.removed_at)
        .bind(node.removed_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating menu node: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::MenuCodeAlreadyExists(node.code.clone())
            } else {
                DomainError::database("create_node", msg)
            }
        })?;

        info!("Menu node created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update_node(&self, node: &MenuNode) -> Result<MenuNode, DomainError> {
        let row: Option<MenuNodeRow> = sqlx::query_as(
            r#"
            UPDATE menu_nodes
            SET code = $2, name = $3, module_id = $4, route_path = $5,
                icon = $6, is_active = $7, metadata = $8,
                modified_at = $9, modified_by = $10
            WHERE id = $1 AND removed_at IS NULL
            RETURNING
                id, code, name, parent_id, module_id, route_path, icon,
                order_index, is_active, metadata,
                created_at, created_by, modified_at, modified_by,
                removed_at, removed_by
            "#,
        )
        .bind(node.id)
        .bind(&node.code)
        .bind(&node.name)
        .bind(node.module_id)
        .bind(&node.route_path)
        .bind(&node.icon)
        .bind(node.is_active)
        .bind(&node.metadata)
        .bind(node.modified_at)
        .bind(node.modified_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating menu node {}: {}", node.id, e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::MenuCodeAlreadyExists(node.code.clone())
            } else {
                DomainError::database("update_node", msg)
            }
        })?;

        row.map(Into::into)
            .ok_or(DomainError::MenuNodeNotFound(node.id))
    }

    async fn soft_delete_node(
        &self,
        id: &Uuid,
        removed_by: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE menu_nodes
            SET removed_at = NOW(), removed_by = $2, is_active = FALSE
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .bind(removed_by)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error soft-deleting menu node {}: {}", id, e);
            DomainError::database("soft_delete_node", e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MenuNodeNotFound(*id));
        }
        Ok(())
    }

    async fn list_history(&self, limit: i64) -> Result<Vec<MenuHistoryEntry>, DomainError> {
        let rows: Vec<MenuHistoryRow> = sqlx::query_as(
            r#"
            SELECT id, code, name, created_at, modified_at AS updated_at
            FROM menu_nodes
            ORDER BY COALESCE(modified_at, created_at) DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing menu history: {}", e);
            DomainError::database("list_history", e.to_string())
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuNodeRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub module_id: Option<Uuid>,
    pub route_path: Option<String>,
    pub icon: Option<String>,
    pub order_index: i32,
    pub is_active: bool,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<Uuid>,
}

impl From<MenuNodeRow> for MenuNode {
    fn from(row: MenuNodeRow) -> Self {
        MenuNode {
            id: row.id,
            code: row.code,
            name: row.name,
            parent_id: row.parent_id,
            module_id: row.module_id,
            route_path: row.route_path,
            icon: row.icon,
            order_index: row.order_index,
            is_active: row.is_active,
            metadata: row.metadata,
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
            modified_by: row.modified_by,
            removed_at: row.removed_at,
            removed_by: row.removed_by,
        }
    }
}

#[derive(Debug, FromRow)]
struct MenuHistoryRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<MenuHistoryRow> for MenuHistoryEntry {
    fn from(row: MenuHistoryRow) -> Self {
        MenuHistoryEntry {
            id: row.id,
            code: row.code,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
