//! # Menukit Shared
//!
//! Configuration, telemetry, and common types shared by the menukit crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use config::AppConfig;
pub use error::AppError;
pub use types::{AuditFields, EntityId, PageResult, Pagination};
