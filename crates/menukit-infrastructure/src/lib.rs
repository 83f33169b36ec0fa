//! # Menukit Infrastructure
//!
//! PostgreSQL and Redis implementations (adapters) of the core ports.

pub mod cache;
pub mod database;

pub use cache::{create_redis_pool, RedisNavigationCache};
pub use database::{
    create_pool, PgMenuRepository, PgModuleRepository, PgPermissionRepository, PgRoleRepository,
};
