//! Parent-linked AVL tree with extremal caches
//!
//! Height-balanced BST over an injected comparator:
//!   - O(log n) find / insert / remove with rotation rebalancing
//!   - O(n) bulk build from sorted input, no rotations
//!   - O(k + log n) bounded traversal from the cached min or max
//!
//! Nodes live in an arena. Child edges own, parent links only point back,
//! and teardown follows child edges alone.

mod arena;
mod balance;
mod build;
mod node;
mod traversal;
mod validate;

pub use node::{Node, NodeId, Side, EMPTY_HEIGHT};
pub use traversal::{Direction, Iter};
pub use validate::InvariantViolation;

use std::cmp::Ordering;
use std::collections::TryReserveError;

use thiserror::Error;

use crate::compare::{Comparator, NaturalOrder};
use arena::Arena;

/// Errors raised by tree operations
///
/// None of them leave the tree in a modified state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No element compares equal to the key
    #[error("key not found")]
    NotFound,

    /// `min`/`max` on a tree with no elements
    #[error("tree is empty")]
    EmptyTree,

    /// Node storage could not be obtained
    #[error("node allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

/// AVL tree ordered by `C`
#[derive(Debug, Clone)]
pub struct AvlTree<T, C = NaturalOrder> {
    arena: Arena<T>,

    /// Owning entry point
    root: Option<NodeId>,

    /// Leftmost node (non-owning)
    min: Option<NodeId>,

    /// Rightmost node (non-owning)
    max: Option<NodeId>,

    len: usize,

    compare: C,
}

impl<T: Ord> AvlTree<T, NaturalOrder> {
    /// Create empty tree ordered by `T: Ord`
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C: Comparator<T> + Default> Default for AvlTree<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Comparator<T>> AvlTree<T, C> {
    /// Create empty tree ordered by `compare`
    pub fn with_comparator(compare: C) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            min: None,
            max: None,
            len: 0,
            compare,
        }
    }

    /// Number of stored elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree (-1 when empty)
    #[inline]
    pub fn height(&self) -> i32 {
        self.height_of(self.root)
    }

    /// Value at the root
    pub fn root(&self) -> Option<&T> {
        self.root.map(|id| self.arena[id].payload())
    }

    /// Handle of the root node
    ///
    /// Handles are only meaningful until the next mutation.
    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    /// Node behind a handle, for structural inspection
    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.arena.get(id)
    }

    /// The ordering policy
    pub fn comparator(&self) -> &C {
        &self.compare
    }

    /// Smallest element, from the cache
    pub fn min(&self) -> Result<&T, TreeError> {
        self.min
            .map(|id| self.arena[id].payload())
            .ok_or(TreeError::EmptyTree)
    }

    /// Largest element, from the cache
    pub fn max(&self) -> Result<&T, TreeError> {
        self.max
            .map(|id| self.arena[id].payload())
            .ok_or(TreeError::EmptyTree)
    }

    /// Element comparing equal to `key`
    pub fn find(&self, key: &T) -> Result<&T, TreeError> {
        self.locate(key)
            .map(|id| self.arena[id].payload())
            .ok_or(TreeError::NotFound)
    }

    /// Mutable access to the element comparing equal to `key`
    ///
    /// The caller must leave the comparison key unchanged.
    pub fn find_mut(&mut self, key: &T) -> Result<&mut T, TreeError> {
        match self.locate(key) {
            Some(id) => Ok(self.arena[id].payload_mut()),
            None => Err(TreeError::NotFound),
        }
    }

    /// Check if some element compares equal to `key`
    pub fn contains(&self, key: &T) -> bool {
        self.locate(key).is_some()
    }

    fn locate(&self, key: &T) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.arena[id];
            cursor = match self.compare.compare(key, node.payload()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Reserve storage so the next `additional` inserts cannot fail
    pub fn reserve(&mut self, additional: usize) -> Result<(), TreeError> {
        self.arena.reserve(additional)?;
        Ok(())
    }

    /// Insert `value`; equal keys are kept and placed to the right
    ///
    /// The leaf is allocated before the tree is touched, so on
    /// `Allocation` failure the tree is unchanged.
    pub fn insert(&mut self, value: T) -> Result<(), TreeError> {
        let leaf = self.arena.alloc(Node::leaf(value))?;
        let root = self.insert_at(self.root, leaf);
        self.arena[root].set_parent(None);
        self.root = Some(root);
        self.len += 1;
        self.refresh_extremes();
        Ok(())
    }

    fn insert_at(&mut self, node: Option<NodeId>, leaf: NodeId) -> NodeId {
        let Some(id) = node else { return leaf };

        let side = if self.less_at(leaf, id) {
            Side::Left
        } else {
            Side::Right
        };
        let child = self.insert_at(self.arena[id].child(side), leaf);
        self.attach(id, side, Some(child));
        self.rebalance_after_insert(id, leaf)
    }

    /// Remove the first element comparing equal to `key`
    ///
    /// Absent keys are a no-op and return `None`.
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let mut removed = None;
        let root = self.remove_at(self.root, key, &mut removed);
        if removed.is_none() {
            return None;
        }
        if let Some(root) = root {
            self.arena[root].set_parent(None);
        }
        self.root = root;
        self.len -= 1;
        self.refresh_extremes();
        removed
    }

    fn remove_at(&mut self, node: Option<NodeId>, key: &T, removed: &mut Option<T>) -> Option<NodeId> {
        let id = node?;

        let side = match self.compare.compare(key, self.arena[id].payload()) {
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
            Ordering::Equal => return self.remove_node(id, removed),
        };

        let child = self.remove_at(self.arena[id].child(side), key, removed);
        if removed.is_none() {
            // Nothing changed below; skip the rebalance walk
            return Some(id);
        }
        self.attach(id, side, child);
        Some(self.rebalance_after_remove(id))
    }

    /// Unlink `id`, returning the subtree root that replaces it
    fn remove_node(&mut self, id: NodeId, removed: &mut Option<T>) -> Option<NodeId> {
        let node = &self.arena[id];
        match (node.left(), node.right()) {
            (None, None) => {
                *removed = Some(self.arena.release(id).into_payload());
                None
            }
            // Single child moves up into the vacated slot; the caller
            // re-points its parent link
            (Some(child), None) | (None, Some(child)) => {
                *removed = Some(self.arena.release(id).into_payload());
                Some(child)
            }
            (Some(_), Some(right)) => {
                let (new_right, successor) = self.take_outermost(right, Side::Left);
                *removed = Some(self.arena[id].replace_payload(successor));
                self.attach(id, Side::Right, new_right);
                Some(self.rebalance_after_remove(id))
            }
        }
    }

    /// Detach the outermost `side` node of the subtree at `id`
    ///
    /// Returns the rebalanced subtree root and the detached payload.
    fn take_outermost(&mut self, id: NodeId, side: Side) -> (Option<NodeId>, T) {
        match self.arena[id].child(side) {
            None => {
                let rest = self.arena[id].child(side.opposite());
                (rest, self.arena.release(id).into_payload())
            }
            Some(next) => {
                let (child, payload) = self.take_outermost(next, side);
                self.attach(id, side, child);
                (Some(self.rebalance_after_remove(id)), payload)
            }
        }
    }

    /// Re-derive the min/max caches from the current root
    fn refresh_extremes(&mut self) {
        self.min = self.root.map(|root| self.outermost(root, Side::Left));
        self.max = self.root.map(|root| self.outermost(root, Side::Right));
    }

    /// Release every node, post-order over owning edges
    pub fn clear(&mut self) {
        let mut stack: Vec<(NodeId, bool)> = self.root.into_iter().map(|id| (id, false)).collect();
        while let Some((id, children_done)) = stack.pop() {
            if children_done {
                drop(self.arena.release(id));
                continue;
            }
            let node = &self.arena[id];
            stack.push((id, true));
            stack.extend(node.right().map(|r| (r, false)));
            stack.extend(node.left().map(|l| (l, false)));
        }
        self.arena.reset();
        self.root = None;
        self.min = None;
        self.max = None;
        self.len = 0;
    }
}
