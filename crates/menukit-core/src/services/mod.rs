//! Domain services

pub mod menu_service;
pub mod permission_service;
pub mod visibility_service;

pub use menu_service::MenuService;
pub use permission_service::{PermissionService, SuggestedPermission};
pub use visibility_service::VisibilityService;
