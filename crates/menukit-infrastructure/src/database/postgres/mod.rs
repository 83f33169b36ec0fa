//! PostgreSQL repository implementations

pub mod menu_repo_impl;
pub mod module_repo_impl;
pub mod permission_repo_impl;
pub mod role_repo_impl;

pub use menu_repo_impl::PgMenuRepository;
pub use module_repo_impl::PgModuleRepository;
pub use permission_repo_impl::PgPermissionRepository;
pub use role_repo_impl::PgRoleRepository;
