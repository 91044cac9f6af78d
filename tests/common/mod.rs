//! Shared helpers for tree integration tests

#![allow(dead_code)]

use avl_dealer::tree::NodeId;
use avl_dealer::{AvlTree, Comparator};

/// In-order contents
pub fn in_order<T: Clone, C: Comparator<T>>(tree: &AvlTree<T, C>) -> Vec<T> {
    tree.iter().cloned().collect()
}

/// Panic with the tree dump if any invariant is broken
pub fn assert_valid<T: std::fmt::Debug, C: Comparator<T>>(tree: &AvlTree<T, C>) {
    if let Err(violation) = tree.validate() {
        panic!("{}\n{}", violation, tree.render());
    }
}

/// Count nodes by walking child edges through the public node API
pub fn count_nodes<T, C: Comparator<T>>(tree: &AvlTree<T, C>) -> usize {
    fn walk<T, C: Comparator<T>>(tree: &AvlTree<T, C>, id: Option<NodeId>) -> usize {
        let Some(id) = id else { return 0 };
        let node = tree.node(id).expect("reachable node is live");
        1 + walk(tree, node.left()) + walk(tree, node.right())
    }
    walk(tree, tree.root_id())
}

/// Tree built by inserting `values` one at a time
pub fn tree_of(values: &[i32]) -> AvlTree<i32> {
    let mut tree = AvlTree::new();
    for &v in values {
        tree.insert(v).expect("insert succeeds");
    }
    tree
}
