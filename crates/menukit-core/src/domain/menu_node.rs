// ============================================================================
// Menukit Core - Menu Node Entity
// File: crates/menukit-core/src/domain/menu_node.rs
// Description: One entry in the admin-configurable navigation tree
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use menukit_shared::utils::normalize_code;

/// Menu node entity. A node with a route path is a navigable entry; a node
/// without one is a structural group and carries no permission gate.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuNode {
    pub id: Uuid,

    #[validate(length(min = 2, max = 100, message = "Code must be between 2 and 100 characters"))]
    pub code: String,

    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    pub parent_id: Option<Uuid>,
    pub module_id: Option<Uuid>,

    #[validate(length(max = 255, message = "Route path too long"))]
    pub route_path: Option<String>,

    #[validate(length(max = 100, message = "Icon token too long"))]
    pub icon: Option<String>,

    pub order_index: i32,
    pub is_active: bool,
    pub metadata: Option<serde_json::Value>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<Uuid>,
    pub removed_at: Option<DateTime<Utc>>,
    pub removed_by: Option<Uuid>,
}

/// Editor payload for creating or updating a node. The admin form always
/// submits the full editable state, so no field here is a partial patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuNodeInput {
    pub code: String,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub module_id: Option<Uuid>,
    pub route_path: Option<String>,
    pub icon: Option<String>,
    pub is_active: bool,
    pub metadata: Option<serde_json::Value>,
}

impl MenuNode {
    pub fn new(
        input: MenuNodeInput,
        order_index: i32,
        created_by: Option<Uuid>,
    ) -> Result<Self, validator::ValidationErrors> {
        let node = Self {
            id: Uuid::new_v4(),
            code: normalize_code(&input.code),
            name: input.name.trim().to_string(),
            parent_id: input.parent_id,
            module_id: input.module_id,
            route_path: input
                .route_path
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            icon: input.icon.map(|i| i.trim().to_string()),
            order_index,
            is_active: input.is_active,
            metadata: input.metadata,
            created_at: Utc::now(),
            created_by,
            modified_at: None,
            modified_by: None,
            removed_at: None,
            removed_by: None,
        };

        node.validate()?;
        Ok(node)
    }

    /// Apply an editor payload to an existing node. Parent and order are
    /// managed by the move engine, so `input.parent_id` is ignored here.
    pub fn apply(
        &mut self,
        input: MenuNodeInput,
        modified_by: Option<Uuid>,
    ) -> Result<(), validator::ValidationErrors> {
        self.code = normalize_code(&input.code);
        self.name = input.name.trim().to_string();
        self.module_id = input.module_id;
        self.route_path = input
            .route_path
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self.icon = input.icon.map(|i| i.trim().to_string());
        self.is_active = input.is_active;
        self.metadata = input.metadata;
        self.modified_at = Some(Utc::now());
        self.modified_by = modified_by;

        self.validate()
    }

    /// A group node has no route of its own; it exists only to structure the
    /// tree and never carries a permission gate.
    pub fn is_group(&self) -> bool {
        self.route_path
            .as_deref()
            .map_or(true, |p| p.trim().is_empty())
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn soft_delete(&mut self, removed_by: Option<Uuid>) {
        self.removed_at = Some(Utc::now());
        self.removed_by = removed_by;
        self.is_active = false;
    }

    pub fn is_deleted(&self) -> bool {
        self.removed_at.is_some()
    }
}

/// Row of the admin change-history panel, read from the audit columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuHistoryEntry {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> MenuNodeInput {
        MenuNodeInput {
            code: "menu.users".to_string(),
            name: "Users".to_string(),
            parent_id: None,
            module_id: None,
            route_path: Some("/system-admin/iam/users".to_string()),
            icon: Some("people".to_string()),
            is_active: true,
            metadata: None,
        }
    }

    #[test]
    fn test_create_node() {
        let node = MenuNode::new(input(), 10, None).unwrap();
        assert!(node.is_root());
        assert!(!node.is_group());
        assert_eq!(node.order_index, 10);
    }

    #[test]
    fn test_blank_route_becomes_group() {
        let mut i = input();
        i.route_path = Some("   ".to_string());
        let node = MenuNode::new(i, 10, None).unwrap();
        assert!(node.is_group());
        assert_eq!(node.route_path, None);
    }

    #[test]
    fn test_short_code_rejected() {
        let mut i = input();
        i.code = "x".to_string();
        assert!(MenuNode::new(i, 10, None).is_err());
    }

    #[test]
    fn test_soft_delete() {
        let mut node = MenuNode::new(input(), 10, None).unwrap();
        node.soft_delete(Some(Uuid::new_v4()));
        assert!(node.is_deleted());
        assert!(!node.is_active);
    }
}
