// ============================================================================
// Menukit Core - Permission Entity
// File: crates/menukit-core/src/domain/permission.rs
// Description: Atomic capability token (resource + action) gating visibility
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use menukit_shared::utils::normalize_code;

/// Action half of a permission token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionAction {
    #[default]
    Read,
    Create,
    Update,
    Delete,
    Export,
    Restore,
}

impl PermissionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Export => "EXPORT",
            Self::Restore => "RESTORE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "READ" => Some(Self::Read),
            "CREATE" => Some(Self::Create),
            "UPDATE" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            "EXPORT" => Some(Self::Export),
            "RESTORE" => Some(Self::Restore),
            _ => None,
        }
    }
}

/// Coarse classification used by the permission picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionCategory {
    #[default]
    Page,
    Feature,
    System,
}

impl PermissionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "PAGE",
            Self::Feature => "FEATURE",
            Self::System => "SYSTEM",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PAGE" => Some(Self::Page),
            "FEATURE" => Some(Self::Feature),
            "SYSTEM" => Some(Self::System),
            _ => None,
        }
    }
}

/// Permission entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Permission {
    pub id: Uuid,

    #[validate(length(min = 2, max = 100, message = "Code must be between 2 and 100 characters"))]
    pub code: String,

    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    pub module_id: Option<Uuid>,

    #[validate(length(min = 1, max = 100, message = "Resource token must be between 1 and 100 characters"))]
    pub resource: String,

    pub action: PermissionAction,
    pub category: PermissionCategory,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

impl Permission {
    pub fn new(
        code: String,
        name: String,
        module_id: Option<Uuid>,
        resource: String,
        action: PermissionAction,
        category: PermissionCategory,
    ) -> Result<Self, validator::ValidationErrors> {
        let permission = Self {
            id: Uuid::new_v4(),
            code: normalize_code(&code),
            name: name.trim().to_string(),
            module_id,
            resource: resource.trim().to_lowercase(),
            action,
            category,
            is_active: true,
            created_at: Utc::now(),
        };

        permission.validate()?;
        Ok(permission)
    }
}
