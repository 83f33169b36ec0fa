//! # Menukit Core
//!
//! Domain entities, tree algorithms, services, and repository traits for the
//! menu authorization tree.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;
pub mod suggest;
pub mod tree;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
