//! Linear-time construction from sorted input
//!
//! Same midpoint recursion as a height-compressed interval tree:
//!   range [lo, hi], m = ⌊(lo + hi) / 2⌋
//!   left subtree from [lo, m-1], right subtree from [m+1, hi]
//! Geometry alone keeps it balanced: height = ⌊log2 n⌋, no rotations.

use tracing::trace;

use super::node::{Node, NodeId, Side};
use super::{AvlTree, TreeError};
use crate::compare::Comparator;

impl<T, C: Comparator<T>> AvlTree<T, C> {
    /// Build a balanced tree from items already sorted by `compare`
    ///
    /// Storage for every node is reserved before anything is linked.
    pub fn from_sorted(items: Vec<T>, compare: C) -> Result<Self, TreeError> {
        debug_assert!(
            items.windows(2).all(|pair| !compare.less(&pair[1], &pair[0])),
            "from_sorted input is not sorted"
        );

        let mut tree = Self::with_comparator(compare);
        let n = items.len();
        if n == 0 {
            return Ok(tree);
        }
        tree.arena.reserve(n)?;

        // Slot i holds item i, so a contiguous index range is a sorted run
        let mut ids = Vec::new();
        ids.try_reserve_exact(n)?;
        for item in items {
            ids.push(tree.arena.alloc(Node::leaf(item))?);
        }

        let root = tree.link(&ids, 0, n - 1);
        tree.arena[root].set_parent(None);
        tree.root = Some(root);
        tree.len = n;
        tree.refresh_extremes();

        trace!(len = n, height = tree.height(), "built from sorted input");
        Ok(tree)
    }

    /// Link `ids[lo..=hi]` into a subtree and return its root
    fn link(&mut self, ids: &[NodeId], lo: usize, hi: usize) -> NodeId {
        let mid = lo + (hi - lo) / 2;
        let id = ids[mid];

        let left = (mid > lo).then(|| self.link(ids, lo, mid - 1));
        let right = (mid < hi).then(|| self.link(ids, mid + 1, hi));
        self.attach(id, Side::Left, left);
        self.attach(id, Side::Right, right);
        self.update_height(id);
        id
    }
}

impl<T, C: Comparator<T> + Default> AvlTree<T, C> {
    /// [`AvlTree::from_sorted`] with the default comparator
    pub fn from_sorted_default(items: Vec<T>) -> Result<Self, TreeError> {
        Self::from_sorted(items, C::default())
    }
}
