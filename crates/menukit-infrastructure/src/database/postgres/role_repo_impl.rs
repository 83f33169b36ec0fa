// ============================================================================
// Menukit Infrastructure - PostgreSQL Role Repository (read-only)
// File: crates/menukit-infrastructure/src/database/postgres/role_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use menukit_core::domain::Role;
use menukit_core::error::DomainError;
use menukit_core::repositories::RoleRepository;

pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn list_roles(&self) -> Result<Vec<Role>, DomainError> {
        let rows: Vec<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, code, name, is_active
            FROM roles
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing roles: {}", e);
            DomainError::database("list_roles", e.to_string())
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_role(&self, id: &Uuid) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, code, name, is_active
            FROM roles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding role by id {}: {}", id, e);
            DomainError::database("get_role", e.to_string())
        })?;

        Ok(row.map(Into::into))
    }

    async fn list_role_permission_ids(&self, role_id: &Uuid) -> Result<Vec<Uuid>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT permission_id
            FROM role_permissions
            WHERE role_id = $1
            "#,
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!(
                "Database error listing permission ids for role {}: {}",
                role_id, e
            );
            DomainError::database("list_role_permission_ids", e.to_string())
        })
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct RoleRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub is_active: bool,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            code: row.code,
            name: row.name,
            is_active: row.is_active,
        }
    }
}
