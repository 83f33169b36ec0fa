// ============================================================================
// Menukit Core - Move/Reorder Planner
// File: crates/menukit-core/src/tree/moves.rs
// Description: Drag-and-drop relocation with sibling renumbering
// ============================================================================
//! Plans a node relocation as a set of `(id, parent_id, order_index)`
//! placements. The plan is computed in two phases: the vacated sibling group
//! is renumbered first, then the target group is renumbered with the moved
//! node spliced in. Renumbering both groups from scratch guarantees unique,
//! strictly increasing indices regardless of the previous distribution, and
//! bounds each move to two sibling groups.
//!
//! Cycle-inducing moves are rejected before anything is planned, so a
//! rejected move changes nothing.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use menukit_shared::constants::ORDER_INDEX_STEP;

use crate::domain::MenuNode;
use crate::error::DomainError;

/// One changed row to persist after a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePlacement {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub order_index: i32,
    /// Row version the plan was computed against; the store must refuse the
    /// write if the row has moved on (`ConflictStale`).
    pub expected_modified_at: Option<DateTime<Utc>>,
}

fn fresh_index(position: usize) -> i32 {
    (position as i32 + 1) * ORDER_INDEX_STEP
}

/// Record a placement, keeping only the final value when the same node is
/// renumbered by both phases.
fn place(
    planned: &mut Vec<(Uuid, Option<Uuid>, i32)>,
    position_of: &mut HashMap<Uuid, usize>,
    id: Uuid,
    parent_id: Option<Uuid>,
    order_index: i32,
) {
    if let Some(&i) = position_of.get(&id) {
        planned[i] = (id, parent_id, order_index);
    } else {
        position_of.insert(id, planned.len());
        planned.push((id, parent_id, order_index));
    }
}

/// Plan moving `drag_id` under `new_parent_id` at `target_index`.
///
/// Returns only the placements that actually differ from the current rows;
/// an empty plan means the move is a no-op.
pub fn plan_move(
    nodes: &[MenuNode],
    drag_id: Uuid,
    new_parent_id: Option<Uuid>,
    target_index: usize,
) -> Result<Vec<NodePlacement>, DomainError> {
    let by_id: HashMap<Uuid, &MenuNode> = nodes.iter().map(|n| (n.id, n)).collect();

    let drag = *by_id
        .get(&drag_id)
        .ok_or(DomainError::MenuNodeNotFound(drag_id))?;

    if let Some(parent_id) = new_parent_id {
        if parent_id == drag_id {
            return Err(DomainError::CycleRejected { drag_id });
        }
        if !by_id.contains_key(&parent_id) {
            return Err(DomainError::MenuNodeNotFound(parent_id));
        }
        // Walk the ancestor chain of the target parent; finding the dragged
        // node means the move would create a cycle.
        let mut cursor = Some(parent_id);
        let mut seen: HashSet<Uuid> = HashSet::new();
        while let Some(current) = cursor {
            if current == drag_id {
                return Err(DomainError::CycleRejected { drag_id });
            }
            if !seen.insert(current) {
                break;
            }
            cursor = by_id.get(&current).and_then(|n| n.parent_id);
        }
    }

    let old_parent_id = drag.parent_id;

    let siblings_of = |parent_id: Option<Uuid>| -> Vec<&MenuNode> {
        let mut siblings: Vec<&MenuNode> = nodes
            .iter()
            .filter(|n| n.parent_id == parent_id && n.id != drag_id)
            .collect();
        siblings.sort_by(|a, b| {
            a.order_index
                .cmp(&b.order_index)
                .then_with(|| a.name.cmp(&b.name))
        });
        siblings
    };

    let mut planned: Vec<(Uuid, Option<Uuid>, i32)> = Vec::new();
    let mut position_of: HashMap<Uuid, usize> = HashMap::new();

    // Phase 1: close the gap in the vacated group.
    if old_parent_id != new_parent_id {
        for (i, sibling) in siblings_of(old_parent_id).iter().enumerate() {
            place(
                &mut planned,
                &mut position_of,
                sibling.id,
                old_parent_id,
                fresh_index(i),
            );
        }
    }

    // Phase 2: splice into the target group.
    let new_siblings = siblings_of(new_parent_id);
    let insert_at = target_index.min(new_siblings.len());
    let mut sequence: Vec<Uuid> = new_siblings.iter().map(|n| n.id).collect();
    sequence.insert(insert_at, drag_id);
    for (i, id) in sequence.into_iter().enumerate() {
        place(
            &mut planned,
            &mut position_of,
            id,
            new_parent_id,
            fresh_index(i),
        );
    }

    Ok(planned
        .into_iter()
        .filter(|(id, parent_id, order_index)| {
            let current = by_id[id];
            current.parent_id != *parent_id || current.order_index != *order_index
        })
        .map(|(id, parent_id, order_index)| NodePlacement {
            id,
            parent_id,
            order_index,
            expected_modified_at: by_id[&id].modified_at,
        })
        .collect())
}
