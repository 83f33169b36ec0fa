// ============================================================================
// Menukit Infrastructure - PostgreSQL Module Repository (read-only)
// File: crates/menukit-infrastructure/src/database/postgres/module_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use menukit_core::domain::Module;
use menukit_core::error::DomainError;
use menukit_core::repositories::ModuleRepository;

pub struct PgModuleRepository {
    pool: PgPool,
}

impl PgModuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModuleRepository for PgModuleRepository {
    async fn list_modules(&self) -> Result<Vec<Module>, DomainError> {
        let rows: Vec<ModuleRow> = sqlx::query_as(
            r#"
            SELECT id, code, name, group_name, is_active
            FROM modules
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing modules: {}", e);
            DomainError::database("list_modules", e.to_string())
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct ModuleRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub group_name: Option<String>,
    pub is_active: bool,
}

impl From<ModuleRow> for Module {
    fn from(row: ModuleRow) -> Self {
        Module {
            id: row.id,
            code: row.code,
            name: row.name,
            group_name: row.group_name,
            is_active: row.is_active,
        }
    }
}
