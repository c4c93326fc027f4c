//! Mind-map tree operations over parent-pointer node lists.
//!
//! # Responsibility
//! - Enumerate the descendants of a node.
//! - Remove a node together with its whole subtree.
//!
//! # Invariants
//! - Nodes only know their parent; each traversal builds a throwaway
//!   parent-to-children index, so the saved shape never changes.
//! - Traversal is child-lookup driven: nodes with a dangling parent are
//!   simply unreachable, and a corrupted parent cycle still terminates.

use crate::model::mindmap::{MindMap, MindMapNode};
use crate::model::EntityId;
use std::collections::{HashMap, HashSet};

/// Builds a parent id -> direct child ids index, children in list order.
pub fn children_index(nodes: &[MindMapNode]) -> HashMap<EntityId, Vec<EntityId>> {
    let mut index: HashMap<EntityId, Vec<EntityId>> = HashMap::new();
    for node in nodes {
        if let Some(parent_id) = node.parent_id {
            index.entry(parent_id).or_default().push(node.id);
        }
    }
    index
}

/// Returns every node transitively below `target`, depth-first pre-order.
///
/// `target` itself is never part of the result.
pub fn descendant_ids(nodes: &[MindMapNode], target: EntityId) -> Vec<EntityId> {
    let index = children_index(nodes);
    let mut visited = HashSet::from([target]);
    let mut descendants = Vec::new();
    let mut stack: Vec<EntityId> = index
        .get(&target)
        .map(|children| children.iter().rev().copied().collect())
        .unwrap_or_default();

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        descendants.push(current);
        if let Some(children) = index.get(&current) {
            stack.extend(children.iter().rev().copied());
        }
    }

    descendants
}

/// Removes `target` and all its descendants in one pass.
///
/// Returns the number of removed nodes; `0` when `target` is not in `nodes`.
pub fn cascade_delete(nodes: &mut Vec<MindMapNode>, target: EntityId) -> usize {
    if !nodes.iter().any(|node| node.id == target) {
        return 0;
    }

    let mut doomed: HashSet<EntityId> = descendant_ids(nodes, target).into_iter().collect();
    doomed.insert(target);

    let before = nodes.len();
    nodes.retain(|node| !doomed.contains(&node.id));
    before - nodes.len()
}

/// Root nodes of a map in list order.
pub fn root_nodes(map: &MindMap) -> Vec<&MindMapNode> {
    map.nodes.iter().filter(|node| node.is_root()).collect()
}

/// Direct children of `node_id` in list order.
pub fn children_of(map: &MindMap, node_id: EntityId) -> Vec<&MindMapNode> {
    map.nodes
        .iter()
        .filter(|node| node.parent_id == Some(node_id))
        .collect()
}
