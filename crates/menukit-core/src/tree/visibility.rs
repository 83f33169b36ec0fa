// ============================================================================
// Menukit Core - Role Visibility Filter
// File: crates/menukit-core/src/tree/visibility.rs
// Description: Prunes the menu forest to what a permission set may see
// ============================================================================
//! Bottom-up pruning of the menu forest against a granted-permission set.
//!
//! Route nodes are self-visible when active and either ungated or granted at
//! least one of their gate permissions. Group nodes are scaffolding: they
//! survive iff a filtered child survives, regardless of their own active
//! flag. A route node with children survives by either rule.
//!
//! This is the same computation the runtime navigation performs for an
//! authenticated user, so it doubles as the admin "preview as role" tool.

use std::collections::HashSet;

use uuid::Uuid;

use super::builder::MenuTreeNode;

pub fn filter_forest(forest: &[MenuTreeNode], granted: &HashSet<Uuid>) -> Vec<MenuTreeNode> {
    forest
        .iter()
        .filter_map(|tree| filter_node(tree, granted))
        .collect()
}

fn filter_node(tree: &MenuTreeNode, granted: &HashSet<Uuid>) -> Option<MenuTreeNode> {
    let children = filter_forest(&tree.children, granted);

    let survives = if tree.node.is_group() {
        !children.is_empty()
    } else {
        let self_visible = tree.node.is_active
            && (tree.permission_ids.is_empty()
                || tree.permission_ids.iter().any(|id| granted.contains(id)));
        self_visible || !children.is_empty()
    };

    survives.then(|| MenuTreeNode {
        node: tree.node.clone(),
        permission_ids: tree.permission_ids.clone(),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MenuNode, MenuNodeInput, MenuPermissionLink};
    use crate::tree::builder::{attach_permission_gates, build_forest};

    fn node(name: &str, parent_id: Option<Uuid>, route: Option<&str>, active: bool) -> MenuNode {
        MenuNode::new(
            MenuNodeInput {
                code: format!("menu.{}", name.to_lowercase()),
                name: name.to_string(),
                parent_id,
                module_id: None,
                route_path: route.map(str::to_string),
                icon: None,
                is_active: active,
                metadata: None,
            },
            10,
            None,
        )
        .unwrap()
    }

    fn forest_with_gates(
        nodes: Vec<MenuNode>,
        links: Vec<MenuPermissionLink>,
    ) -> Vec<MenuTreeNode> {
        let mut forest = build_forest(nodes);
        attach_permission_gates(&mut forest, &links);
        forest
    }

    #[test]
    fn test_ungated_active_leaf_is_visible() {
        let leaf = node("Home", None, Some("/home"), true);
        let forest = forest_with_gates(vec![leaf], vec![]);
        let out = filter_forest(&forest, &HashSet::new());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_inactive_ungated_leaf_is_never_visible() {
        let leaf = node("Home", None, Some("/home"), false);
        let forest = forest_with_gates(vec![leaf], vec![]);
        let out = filter_forest(&forest, &HashSet::new());
        assert!(out.is_empty());
    }

    #[test]
    fn test_gated_leaf_requires_a_granted_permission() {
        let leaf = node("Users", None, Some("/users"), true);
        let perm = Uuid::new_v4();
        let forest = forest_with_gates(
            vec![leaf.clone()],
            vec![MenuPermissionLink::new(leaf.id, perm, None)],
        );

        assert!(filter_forest(&forest, &HashSet::new()).is_empty());
        let granted: HashSet<Uuid> = [perm].into_iter().collect();
        assert_eq!(filter_forest(&forest, &granted).len(), 1);
    }

    #[test]
    fn test_group_survives_only_through_permitted_branch() {
        let group = node("Admin", None, None, true);
        let mid = node("Iam", Some(group.id), None, true);
        let allowed = node("Users", Some(mid.id), Some("/users"), true);
        let denied = node("Secrets", Some(group.id), Some("/secrets"), true);
        let ok_perm = Uuid::new_v4();
        let no_perm = Uuid::new_v4();

        let forest = forest_with_gates(
            vec![group.clone(), mid.clone(), allowed.clone(), denied.clone()],
            vec![
                MenuPermissionLink::new(allowed.id, ok_perm, None),
                MenuPermissionLink::new(denied.id, no_perm, None),
            ],
        );

        let granted: HashSet<Uuid> = [ok_perm].into_iter().collect();
        let out = filter_forest(&forest, &granted);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].node.id, group.id);
        assert_eq!(out[0].children.len(), 1);
        assert_eq!(out[0].children[0].node.id, mid.id);
        assert_eq!(out[0].children[0].children[0].node.id, allowed.id);
    }

    #[test]
    fn test_inactive_group_still_passes_through_visible_children() {
        let group = node("Admin", None, None, false);
        let leaf = node("Users", Some(group.id), Some("/users"), true);
        let forest = forest_with_gates(vec![group, leaf], vec![]);
        let out = filter_forest(&forest, &HashSet::new());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].children.len(), 1);
    }

    #[test]
    fn test_empty_group_is_pruned() {
        let group = node("Admin", None, None, true);
        let forest = forest_with_gates(vec![group], vec![]);
        assert!(filter_forest(&forest, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_hybrid_route_survives_through_child_even_when_denied_itself() {
        let hybrid = node("Reports", None, Some("/reports"), true);
        let child = node("Daily", Some(hybrid.id), Some("/reports/daily"), true);
        let gate = Uuid::new_v4();
        let forest = forest_with_gates(
            vec![hybrid.clone(), child],
            vec![MenuPermissionLink::new(hybrid.id, gate, None)],
        );
        // Not granted the hybrid's own gate, but the child is open.
        let out = filter_forest(&forest, &HashSet::new());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].children.len(), 1);
    }
}
