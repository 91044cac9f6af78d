//! Bounded extremal traversal
//!
//! Key idea: the k smallest elements sit around the leftmost path.
//! Start at the cached minimum, then repeatedly
//!   emit cursor -> scan cursor.right in order -> climb to cursor.parent
//! until k elements are out or the root has been passed.
//!
//! Work: O(k + height). A full scan is never needed for small k.
//! Descending order is the same walk with left and right swapped.

use super::node::{NodeId, Side};
use super::AvlTree;
use crate::compare::Comparator;

/// Walk order for bounded traversal and iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Smallest first, starting from the cached minimum
    Ascending,

    /// Largest first, starting from the cached maximum
    Descending,
}

impl Direction {
    /// Side visited first in this order
    #[inline]
    pub fn near(self) -> Side {
        match self {
            Direction::Ascending => Side::Left,
            Direction::Descending => Side::Right,
        }
    }

    /// Side visited last in this order
    #[inline]
    pub fn far(self) -> Side {
        self.near().opposite()
    }

    /// Reverse order
    #[inline]
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

impl<T, C: Comparator<T>> AvlTree<T, C> {
    /// Up to `k` extreme elements, in `direction` order
    ///
    /// Returns fewer than `k` elements only when the tree holds fewer.
    pub fn bounded_traversal(&self, direction: Direction, k: usize) -> Vec<&T> {
        let mut out = Vec::with_capacity(k.min(self.len));
        let mut budget = k;
        let mut cursor = self.extreme(direction);

        while let Some(id) = cursor {
            if budget == 0 {
                break;
            }
            let node = &self.arena[id];
            out.push(node.payload());
            budget -= 1;

            self.scan(node.child(direction.far()), direction, &mut budget, &mut out);

            // Cursor is always a near-side child or the root, so its parent
            // has not been emitted yet
            cursor = node.parent();
        }

        out
    }

    /// In-order scan of one subtree, stopping when the budget runs out
    fn scan<'a>(
        &'a self,
        id: Option<NodeId>,
        direction: Direction,
        budget: &mut usize,
        out: &mut Vec<&'a T>,
    ) {
        let Some(id) = id else { return };
        if *budget == 0 {
            return;
        }
        let node = &self.arena[id];

        self.scan(node.child(direction.near()), direction, budget, out);
        if *budget == 0 {
            return;
        }
        out.push(node.payload());
        *budget -= 1;
        self.scan(node.child(direction.far()), direction, budget, out);
    }

    /// Cached extreme for `direction` (min when ascending)
    #[inline]
    pub(super) fn extreme(&self, direction: Direction) -> Option<NodeId> {
        match direction {
            Direction::Ascending => self.min,
            Direction::Descending => self.max,
        }
    }

    /// Last node reached by following `side` links from `id`
    pub(super) fn outermost(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(next) = self.arena[id].child(side) {
            id = next;
        }
        id
    }

    /// Next node in `direction` order, via parent links
    pub(super) fn step(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        let far = direction.far();
        if let Some(child) = self.arena[id].child(far) {
            return Some(self.outermost(child, direction.near()));
        }

        // Climb while we are the far child of our parent
        let mut current = id;
        let mut parent = self.arena[current].parent();
        while let Some(p) = parent {
            if self.arena[p].child(far) != Some(current) {
                break;
            }
            current = p;
            parent = self.arena[p].parent();
        }
        parent
    }

    /// Lazy in-order iterator, smallest first
    pub fn iter(&self) -> Iter<'_, T, C> {
        self.walk(Direction::Ascending)
    }

    /// Lazy reverse in-order iterator, largest first
    pub fn iter_desc(&self) -> Iter<'_, T, C> {
        self.walk(Direction::Descending)
    }

    /// Lazy iterator in the given order
    pub fn walk(&self, direction: Direction) -> Iter<'_, T, C> {
        Iter {
            tree: self,
            next: self.extreme(direction),
            direction,
            remaining: self.len,
        }
    }
}

/// In-order iterator stepping through parent links
#[derive(Debug)]
pub struct Iter<'a, T, C> {
    tree: &'a AvlTree<T, C>,
    next: Option<NodeId>,
    direction: Direction,
    remaining: usize,
}

impl<'a, T, C: Comparator<T>> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.next?;
        self.next = self.tree.step(id, self.direction);
        self.remaining = self.remaining.saturating_sub(1);
        Some(self.tree.arena[id].payload())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, C: Comparator<T>> ExactSizeIterator for Iter<'_, T, C> {}

impl<T, C: Comparator<T>> std::iter::FusedIterator for Iter<'_, T, C> {}

impl<'a, T, C: Comparator<T>> IntoIterator for &'a AvlTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Iter<'a, T, C> {
        self.iter()
    }
}
