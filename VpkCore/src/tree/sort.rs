//! Canonical display ordering

use std::cmp::Ordering;

use super::node::{DisplayTree, NodeId};

/// Reorder every level of the tree: folders before files, then by label.
///
/// Labels compare byte-wise (case-sensitive, no locale collation). The sort
/// is stable and idempotent.
pub fn sort_tree(tree: &mut DisplayTree) {
    let order: Vec<NodeId> = tree.walk().into_iter().map(|(id, _)| id).collect();

    // Children before parents, so each level is ordered after its subtrees.
    for &id in order.iter().rev() {
        let Some(node) = tree.get(id) else { continue };
        let mut children = node.children().to_vec();
        children.sort_by(|&a, &b| compare(tree, a, b));
        tree.set_children(id, children);
    }

    tracing::debug!("Sorted tree for {}", tree.root_label());
}

fn compare(tree: &DisplayTree, a: NodeId, b: NodeId) -> Ordering {
    tree.is_leaf(a)
        .cmp(&tree.is_leaf(b))
        .then_with(|| label(tree, a).cmp(label(tree, b)))
}

fn label(tree: &DisplayTree, id: NodeId) -> &str {
    tree.get(id).map_or("", |n| n.label())
}
