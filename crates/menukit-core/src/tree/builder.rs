// ============================================================================
// Menukit Core - Tree Builder
// File: crates/menukit-core/src/tree/builder.rs
// Description: Flat node list -> ordered forest
// ============================================================================
//! Builds the nested menu forest from the flat store rows.
//!
//! The builder never rejects input: a node whose parent is missing from the
//! input set becomes a root, so the admin view stays renderable even with
//! dangling references. Sibling lists are sorted by `(order_index, name)`;
//! the name tiebreak keeps the order total when indices collide.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{MenuNode, MenuPermissionLink};

/// One node of the assembled forest, with its permission gate attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuTreeNode {
    pub node: MenuNode,
    /// Permission ids gating this node; empty means publicly visible.
    pub permission_ids: Vec<Uuid>,
    pub children: Vec<MenuTreeNode>,
}

fn sort_siblings(siblings: &mut [MenuNode]) {
    siblings.sort_by(|a, b| {
        a.order_index
            .cmp(&b.order_index)
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn assemble(node: MenuNode, by_parent: &mut BTreeMap<Uuid, Vec<MenuNode>>) -> MenuTreeNode {
    let mut kids = by_parent.remove(&node.id).unwrap_or_default();
    sort_siblings(&mut kids);
    let children = kids.into_iter().map(|k| assemble(k, by_parent)).collect();
    MenuTreeNode {
        node,
        permission_ids: Vec::new(),
        children,
    }
}

/// Convert a flat node list into a forest. Every input node appears exactly
/// once in the output; sorting is recursive and idempotent.
pub fn build_forest(nodes: Vec<MenuNode>) -> Vec<MenuTreeNode> {
    let known: HashSet<Uuid> = nodes.iter().map(|n| n.id).collect();

    let mut roots: Vec<MenuNode> = Vec::new();
    let mut by_parent: BTreeMap<Uuid, Vec<MenuNode>> = BTreeMap::new();
    for node in nodes {
        match node.parent_id {
            Some(p) if p != node.id && known.contains(&p) => {
                by_parent.entry(p).or_default().push(node)
            }
            _ => roots.push(node),
        }
    }

    sort_siblings(&mut roots);
    let mut forest: Vec<MenuTreeNode> = roots
        .into_iter()
        .map(|n| assemble(n, &mut by_parent))
        .collect();

    // Parent chains that loop back on themselves are never reachable from a
    // root; surface them as roots instead of dropping them.
    while let Some((_, mut orphans)) = by_parent.pop_first() {
        sort_siblings(&mut orphans);
        for orphan in orphans {
            forest.push(assemble(orphan, &mut by_parent));
        }
    }

    forest
}

/// Attach permission gates to an already-built forest.
pub fn attach_permission_gates(forest: &mut [MenuTreeNode], links: &[MenuPermissionLink]) {
    let mut by_menu: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for link in links {
        by_menu
            .entry(link.menu_id)
            .or_default()
            .push(link.permission_id);
    }
    for ids in by_menu.values_mut() {
        ids.sort();
        ids.dedup();
    }
    attach(forest, &by_menu);
}

fn attach(forest: &mut [MenuTreeNode], by_menu: &HashMap<Uuid, Vec<Uuid>>) {
    for tree in forest {
        tree.permission_ids = by_menu.get(&tree.node.id).cloned().unwrap_or_default();
        attach(&mut tree.children, by_menu);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MenuNodeInput;

    fn node(name: &str, parent_id: Option<Uuid>, order_index: i32) -> MenuNode {
        MenuNode::new(
            MenuNodeInput {
                code: format!("menu.{}", name.to_lowercase()),
                name: name.to_string(),
                parent_id,
                module_id: None,
                route_path: Some(format!("/{}", name.to_lowercase())),
                icon: None,
                is_active: true,
                metadata: None,
            },
            order_index,
            None,
        )
        .unwrap()
    }

    fn count(forest: &[MenuTreeNode]) -> usize {
        forest.iter().map(|t| 1 + count(&t.children)).sum()
    }

    #[test]
    fn test_every_node_appears_once() {
        let a = node("Alpha", None, 10);
        let b = node("Beta", Some(a.id), 10);
        let c = node("Gamma", Some(a.id), 20);
        let d = node("Delta", Some(b.id), 10);
        let forest = build_forest(vec![d, c, b, a.clone()]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].node.id, a.id);
        assert_eq!(count(&forest), 4);
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        let ghost = Uuid::new_v4();
        let a = node("Alpha", Some(ghost), 10);
        let forest = build_forest(vec![a.clone()]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].node.id, a.id);
        assert!(forest[0].children.is_empty());
    }

    #[test]
    fn test_siblings_sorted_by_order_then_name() {
        let b = node("Beta", None, 10);
        let a = node("Alpha", None, 10);
        let c = node("Gamma", None, 5);
        let forest = build_forest(vec![b, a, c]);
        let names: Vec<_> = forest.iter().map(|t| t.node.name.as_str()).collect();
        assert_eq!(names, vec!["Gamma", "Alpha", "Beta"]);
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let a = node("Alpha", None, 20);
        let b = node("Beta", None, 10);
        let c = node("Gamma", Some(b.id), 10);
        let nodes = vec![a, b, c];
        let once = build_forest(nodes.clone());
        let flat: Vec<MenuNode> = flatten(&once);
        let twice = build_forest(flat);
        let names_once: Vec<_> = once.iter().map(|t| t.node.name.clone()).collect();
        let names_twice: Vec<_> = twice.iter().map(|t| t.node.name.clone()).collect();
        assert_eq!(names_once, names_twice);
    }

    fn flatten(forest: &[MenuTreeNode]) -> Vec<MenuNode> {
        let mut out = Vec::new();
        for tree in forest {
            out.push(tree.node.clone());
            out.extend(flatten(&tree.children));
        }
        out
    }

    #[test]
    fn test_parent_cycle_in_data_still_yields_every_node() {
        let mut a = node("Alpha", None, 10);
        let mut b = node("Beta", None, 20);
        a.parent_id = Some(b.id);
        b.parent_id = Some(a.id);
        let forest = build_forest(vec![a, b]);
        assert_eq!(count(&forest), 2);
    }

    #[test]
    fn test_attach_permission_gates() {
        let a = node("Alpha", None, 10);
        let b = node("Beta", Some(a.id), 10);
        let perm = Uuid::new_v4();
        let mut forest = build_forest(vec![a, b.clone()]);
        attach_permission_gates(
            &mut forest,
            &[MenuPermissionLink::new(b.id, perm, None)],
        );
        assert!(forest[0].permission_ids.is_empty());
        assert_eq!(forest[0].children[0].permission_ids, vec![perm]);
    }
}
