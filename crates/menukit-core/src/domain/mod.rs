//! # Menukit Core - Domain Module
//!
//! Domain entities for the menu authorization tree.

pub mod filters;
pub mod links;
pub mod menu_node;
pub mod module;
pub mod permission;
pub mod role;

// Re-export all entities and enums
pub use filters::{NodeFilter, PermissionFilter, StatusFilter};
pub use links::{MenuPermissionLink, RolePermissionLink};
pub use menu_node::{MenuHistoryEntry, MenuNode, MenuNodeInput};
pub use module::Module;
pub use permission::{Permission, PermissionAction, PermissionCategory};
pub use role::Role;
