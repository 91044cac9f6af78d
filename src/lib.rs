//! # Parent-linked AVL tree with bounded extremal traversal
//!
//! This library implements a height-balanced binary search tree whose nodes
//! carry parent back-references, plus cached min/max nodes, and uses it as
//! the only index of a small record-management layer.
//!
//! ## Core Algorithm
//!
//! 1. **AVL balancing**: every insert/remove restores |h(left) - h(right)| ≤ 1
//!    with single or double rotations on the way back up
//! 2. **Bulk build**: sorted input → balanced tree by midpoint recursion, O(n)
//! 3. **Extremal cache**: leftmost/rightmost nodes re-derived after each change
//! 4. **Bounded traversal**: k smallest (or largest) in O(k + log n) by
//!    climbing parent links from the cached extreme
//!
//! ## Usage Example
//!
//! ```
//! use avl_dealer::{AvlTree, Direction};
//!
//! let mut tree = AvlTree::new();
//! for v in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(v)?;
//! }
//! assert_eq!(tree.bounded_traversal(Direction::Ascending, 3), vec![&1, &3, &4]);
//! assert_eq!(tree.height(), 2);
//! # Ok::<(), avl_dealer::TreeError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules
pub mod compare;    // Ordering policies
pub mod tree;       // AVL tree, bulk build, bounded traversal
pub mod dealership; // Multi-index record layer

// Re-exports for convenience
pub use compare::{Comparator, FnComparator, NaturalOrder};
pub use tree::{AvlTree, Direction, InvariantViolation, TreeError};
pub use dealership::{Dealership, DealershipConfig, DealershipError, ModelRef};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_compose() {
        let mut tree: AvlTree<i32> = AvlTree::new();
        tree.insert(1).unwrap();
        assert_eq!(tree.bounded_traversal(Direction::Descending, 1), vec![&1]);

        let mut dealership = Dealership::with_config(DealershipConfig::default());
        dealership.add_car_type(1, 1).unwrap();
        assert_eq!(dealership.best_seller(1), Ok(ModelRef { type_id: 1, model_id: 0 }));
    }
}
