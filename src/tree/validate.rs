//! Structural self-check
//!
//! Walks owning edges only and verifies, for every node:
//! parent mirroring, cached height, AVL balance and in-order order.
//! Then checks the extremal caches and the live count.

use std::fmt::Write as _;

use thiserror::Error;

use super::node::{NodeId, Side};
use super::traversal::Direction;
use super::AvlTree;
use crate::compare::Comparator;

/// A broken tree invariant found by [`AvlTree::validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Child does not point back at the node holding it
    #[error("node {child} has parent {found:?}, expected {expected:?}")]
    ParentMismatch {
        /// Offending child
        child: NodeId,
        /// Parent link stored on the child
        found: Option<NodeId>,
        /// Node whose slot holds the child
        expected: Option<NodeId>,
    },

    /// Cached height disagrees with the children
    #[error("node {node} caches height {cached}, actual {actual}")]
    HeightMismatch {
        /// Offending node
        node: NodeId,
        /// Stored value
        cached: i32,
        /// Recomputed value
        actual: i32,
    },

    /// Subtree heights differ by more than one
    #[error("node {node} has balance factor {balance}")]
    Unbalanced {
        /// Offending node
        node: NodeId,
        /// `height(left) - height(right)`
        balance: i32,
    },

    /// In-order walk goes backwards
    #[error("in-order walk decreases at position {position}")]
    OutOfOrder {
        /// Index of the first element smaller than its predecessor
        position: usize,
    },

    /// Min or max cache does not point at the true extreme
    #[error("stale {0:?} extremal cache")]
    StaleCache(Direction),

    /// Live node count disagrees with the reachable count
    #[error("tree reports {reported} nodes but {reachable} are reachable")]
    LengthMismatch {
        /// `len()`
        reported: usize,
        /// Nodes reachable from the root
        reachable: usize,
    },
}

impl<T, C: Comparator<T>> AvlTree<T, C> {
    /// Check every structural invariant
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if let Some(root) = self.root {
            let found = self.arena[root].parent();
            if found.is_some() {
                return Err(InvariantViolation::ParentMismatch {
                    child: root,
                    found,
                    expected: None,
                });
            }
        }

        let mut count = 0;
        self.check_subtree(self.root, &mut count)?;
        if count != self.len || count != self.arena.live() {
            return Err(InvariantViolation::LengthMismatch {
                reported: self.len,
                reachable: count,
            });
        }

        let mut previous: Option<&T> = None;
        for (position, value) in self.iter().enumerate() {
            if let Some(prev) = previous {
                if self.compare.less(value, prev) {
                    return Err(InvariantViolation::OutOfOrder { position });
                }
            }
            previous = Some(value);
        }

        for (direction, side) in [
            (Direction::Ascending, Side::Left),
            (Direction::Descending, Side::Right),
        ] {
            let expected = self.root.map(|root| self.outermost(root, side));
            if self.extreme(direction) != expected {
                return Err(InvariantViolation::StaleCache(direction));
            }
        }

        Ok(())
    }

    /// Returns the verified height of the subtree
    fn check_subtree(&self, id: Option<NodeId>, count: &mut usize) -> Result<i32, InvariantViolation> {
        let Some(id) = id else { return Ok(-1) };
        *count += 1;
        let node = &self.arena[id];

        for child in [node.left(), node.right()].into_iter().flatten() {
            let found = self.arena[child].parent();
            if found != Some(id) {
                return Err(InvariantViolation::ParentMismatch {
                    child,
                    found,
                    expected: Some(id),
                });
            }
        }

        let left = self.check_subtree(node.left(), count)?;
        let right = self.check_subtree(node.right(), count)?;

        let actual = 1 + left.max(right);
        if node.height() != actual {
            return Err(InvariantViolation::HeightMismatch {
                node: id,
                cached: node.height(),
                actual,
            });
        }
        let balance = left - right;
        if balance.abs() > 1 {
            return Err(InvariantViolation::Unbalanced { node: id, balance });
        }
        Ok(actual)
    }

    /// Indented structure dump, right subtree on top
    pub fn render(&self) -> String
    where
        T: std::fmt::Debug,
    {
        let mut out = String::new();
        self.render_into(self.root, 0, &mut out);
        out
    }

    fn render_into(&self, id: Option<NodeId>, depth: usize, out: &mut String)
    where
        T: std::fmt::Debug,
    {
        let Some(id) = id else { return };
        let node = &self.arena[id];
        self.render_into(node.right(), depth + 1, out);
        let _ = writeln!(out, "{:indent$}{:?} (h={})", "", node.payload(), node.height(), indent = depth * 4);
        self.render_into(node.left(), depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_corrupted_height() {
        let mut tree = AvlTree::new();
        for v in [2, 1, 3] {
            tree.insert(v).unwrap();
        }
        assert!(tree.validate().is_ok());

        let root = tree.root.unwrap();
        tree.arena[root].set_height(5);
        assert!(matches!(
            tree.validate(),
            Err(InvariantViolation::HeightMismatch { cached: 5, actual: 1, .. })
        ));
    }

    #[test]
    fn test_detects_broken_parent_link() {
        let mut tree = AvlTree::new();
        for v in [2, 1, 3] {
            tree.insert(v).unwrap();
        }
        let left = tree.arena[tree.root.unwrap()].left().unwrap();
        tree.arena[left].set_parent(None);
        assert!(matches!(
            tree.validate(),
            Err(InvariantViolation::ParentMismatch { found: None, .. })
        ));
    }

    #[test]
    fn test_render_lists_every_node() {
        let mut tree = AvlTree::new();
        for v in [2, 1, 3] {
            tree.insert(v).unwrap();
        }
        let dump = tree.render();
        assert_eq!(dump.lines().count(), 3);
        assert!(dump.lines().nth(1).unwrap().starts_with("2 (h=1)"));
    }
}
