//! # Menukit Core - Tree Module
//!
//! Pure tree algorithms: forest assembly, move planning, and role-visibility
//! pruning. No persistence here; services feed these with repository data.

pub mod builder;
pub mod moves;
pub mod visibility;

pub use builder::{attach_permission_gates, build_forest, MenuTreeNode};
pub use moves::{plan_move, NodePlacement};
pub use visibility::filter_forest;
