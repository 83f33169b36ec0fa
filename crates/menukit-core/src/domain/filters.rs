// ============================================================================
// Menukit Core - Query/Filter Layer
// File: crates/menukit-core/src/domain/filters.rs
// Description: Stateless filters over flat node and permission lists
// ============================================================================
//! Stateless filter functions applied to the flat lists before the tree
//! builder, move engine, or visibility filter consume them. Filters compose
//! by logical AND and never fail on empty input.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::menu_node::MenuNode;
use super::module::Module;
use super::permission::{Permission, PermissionCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    fn matches(&self, is_active: bool) -> bool {
        self.as_active_flag().map_or(true, |f| f == is_active)
    }

    /// The `is_active` value this filter selects, if it selects one at all.
    /// Useful for pushing the filter down into SQL.
    pub fn as_active_flag(&self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(true),
            Self::Inactive => Some(false),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeFilter {
    /// Case-insensitive substring match over code, name, and route path.
    pub search: Option<String>,
    pub status: StatusFilter,
    pub module_id: Option<Uuid>,
    /// Module group name, resolved through the module list.
    pub module_group: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionFilter {
    /// Case-insensitive substring match over code, name, and resource.
    pub search: Option<String>,
    pub status: StatusFilter,
    pub module_id: Option<Uuid>,
    pub category: Option<PermissionCategory>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Module ids belonging to a group name, for the group filter join.
fn module_ids_in_group(modules: &[Module], group: &str) -> HashSet<Uuid> {
    let group = group.to_lowercase();
    modules
        .iter()
        .filter(|m| {
            m.group_name
                .as_deref()
                .map_or(false, |g| g.to_lowercase() == group)
        })
        .map(|m| m.id)
        .collect()
}

pub fn filter_nodes(nodes: &[MenuNode], filter: &NodeFilter, modules: &[Module]) -> Vec<MenuNode> {
    let search = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let group_ids = filter
        .module_group
        .as_deref()
        .map(|g| module_ids_in_group(modules, g));

    nodes
        .iter()
        .filter(|n| filter.status.matches(n.is_active))
        .filter(|n| filter.module_id.map_or(true, |id| n.module_id == Some(id)))
        .filter(|n| {
            group_ids.as_ref().map_or(true, |ids| {
                n.module_id.map_or(false, |id| ids.contains(&id))
            })
        })
        .filter(|n| {
            search.as_deref().map_or(true, |s| {
                contains_ci(&n.code, s)
                    || contains_ci(&n.name, s)
                    || n.route_path.as_deref().map_or(false, |p| contains_ci(p, s))
            })
        })
        .cloned()
        .collect()
}

pub fn filter_permissions(permissions: &[Permission], filter: &PermissionFilter) -> Vec<Permission> {
    let search = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    permissions
        .iter()
        .filter(|p| filter.status.matches(p.is_active))
        .filter(|p| filter.module_id.map_or(true, |id| p.module_id == Some(id)))
        .filter(|p| filter.category.map_or(true, |c| p.category == c))
        .filter(|p| {
            search.as_deref().map_or(true, |s| {
                contains_ci(&p.code, s) || contains_ci(&p.name, s) || contains_ci(&p.resource, s)
            })
        })
        .cloned()
        .collect()
}
