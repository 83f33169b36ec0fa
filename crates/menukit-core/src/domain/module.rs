//! Module entity: classification grouping for menu nodes and permissions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    /// Coarser grouping above modules, used only for filtering.
    pub group_name: Option<String>,
    pub is_active: bool,
}
