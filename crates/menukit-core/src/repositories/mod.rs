//! Repository traits (ports)

pub mod cache;
pub mod menu_repository;
pub mod module_repository;
pub mod permission_repository;
pub mod role_repository;

pub use cache::NavigationCacheInvalidator;
pub use menu_repository::MenuRepository;
pub use module_repository::ModuleRepository;
pub use permission_repository::{LinkChange, PermissionRepository};
pub use role_repository::RoleRepository;
