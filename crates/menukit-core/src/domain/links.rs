// ============================================================================
// Menukit Core - Link Entities
// File: crates/menukit-core/src/domain/links.rs
// Description: Many-to-many joins between menus/roles and permissions
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Join row gating a menu node behind a permission. Uniqueness is the
/// (menu_id, permission_id) pair; the row has no lifecycle of its own beyond
/// existing or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuPermissionLink {
    pub menu_id: Uuid,
    pub permission_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

impl MenuPermissionLink {
    pub fn new(menu_id: Uuid, permission_id: Uuid, created_by: Option<Uuid>) -> Self {
        Self {
            menu_id,
            permission_id,
            created_at: Utc::now(),
            created_by,
        }
    }
}

/// Join row granting a permission to a role. Read-only here; roles are owned
/// by the external identity system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePermissionLink {
    pub role_id: Uuid,
    pub permission_id: Uuid,
}
