//! Height bookkeeping and rotations
//!
//! Every structural change is followed, in this order, by:
//!   1. child slot assignment (`attach`), which also fixes the parent link
//!   2. height recomputation, lower node first
//! so no node is left with a stale parent or height once a helper returns.

use tracing::trace;

use super::node::{NodeId, Side, EMPTY_HEIGHT};
use super::AvlTree;
use crate::compare::Comparator;

impl<T, C: Comparator<T>> AvlTree<T, C> {
    /// Height of an optional subtree (missing = -1)
    #[inline]
    pub(super) fn height_of(&self, id: Option<NodeId>) -> i32 {
        id.map_or(EMPTY_HEIGHT, |id| self.arena[id].height())
    }

    /// Recompute cached height from the children
    #[inline]
    pub(super) fn update_height(&mut self, id: NodeId) {
        let node = &self.arena[id];
        let height = 1 + self.height_of(node.left()).max(self.height_of(node.right()));
        self.arena[id].set_height(height);
    }

    /// `height(left) - height(right)`
    #[inline]
    pub(super) fn balance_factor(&self, id: NodeId) -> i32 {
        let node = &self.arena[id];
        self.height_of(node.left()) - self.height_of(node.right())
    }

    /// Put `child` into `parent`'s slot and point it back at `parent`
    #[inline]
    pub(super) fn attach(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        self.arena[parent].set_child(side, child);
        if let Some(child) = child {
            self.arena[child].set_parent(Some(parent));
        }
    }

    /// Child that must exist because its side is the heavy one
    fn heavy_child(&self, id: NodeId, side: Side) -> NodeId {
        match self.arena[id].child(side) {
            Some(child) => child,
            None => unreachable!("node {id} is {side:?}-heavy without a {side:?} child"),
        }
    }

    /// Lift the `lift`-side child of `top` into `top`'s position
    ///
    /// `lift = Left` is a right rotation, `lift = Right` a left rotation.
    /// The lifted node inherits `top`'s parent link; the caller stores the
    /// returned id in whatever slot held `top`.
    pub(super) fn rotate(&mut self, top: NodeId, lift: Side) -> NodeId {
        let up = self.heavy_child(top, lift);
        let inner = self.arena[up].child(lift.opposite());
        let parent = self.arena[top].parent();

        self.arena[up].set_child(lift.opposite(), Some(top));
        self.arena[up].set_parent(parent);
        self.arena[top].set_parent(Some(up));
        self.arena[top].set_child(lift, inner);
        if let Some(inner) = inner {
            self.arena[inner].set_parent(Some(top));
        }

        self.update_height(top);
        self.update_height(up);
        up
    }

    /// Lift the left child (right rotation)
    #[inline]
    pub(super) fn rotate_right(&mut self, y: NodeId) -> NodeId {
        self.rotate(y, Side::Left)
    }

    /// Lift the right child (left rotation)
    #[inline]
    pub(super) fn rotate_left(&mut self, x: NodeId) -> NodeId {
        self.rotate(x, Side::Right)
    }

    /// Single or double rotation towards the `heavy` side
    ///
    /// `outer` selects the single rotation (LL / RR); otherwise the heavy
    /// child is first rotated the other way (LR / RL).
    fn restore(&mut self, id: NodeId, heavy: Side, outer: bool) -> NodeId {
        trace!(node = %id, ?heavy, outer, "rebalance");
        if !outer {
            let child = self.heavy_child(id, heavy);
            let lifted = self.rotate(child, heavy.opposite());
            self.attach(id, heavy, Some(lifted));
        }
        self.rotate(id, heavy)
    }

    /// Rebalance `id` on the way back up from inserting `inserted`
    ///
    /// Inner vs outer case is decided by where the inserted value sits
    /// relative to the heavy child. Equal values were routed right, so
    /// "not less" means the right side of that child.
    pub(super) fn rebalance_after_insert(&mut self, id: NodeId, inserted: NodeId) -> NodeId {
        self.update_height(id);
        let balance = self.balance_factor(id);

        if balance > 1 {
            let left = self.heavy_child(id, Side::Left);
            let outer = self.less_at(inserted, left);
            return self.restore(id, Side::Left, outer);
        }
        if balance < -1 {
            let right = self.heavy_child(id, Side::Right);
            let outer = !self.less_at(inserted, right);
            return self.restore(id, Side::Right, outer);
        }
        id
    }

    /// Rebalance `id` on the way back up from a removal
    ///
    /// The heavy child's own balance factor picks the case: a child leaning
    /// the same way as `id` (or balanced) takes a single rotation.
    pub(super) fn rebalance_after_remove(&mut self, id: NodeId) -> NodeId {
        self.update_height(id);
        let balance = self.balance_factor(id);

        if balance > 1 {
            let left = self.heavy_child(id, Side::Left);
            let outer = self.balance_factor(left) >= 0;
            return self.restore(id, Side::Left, outer);
        }
        if balance < -1 {
            let right = self.heavy_child(id, Side::Right);
            let outer = self.balance_factor(right) <= 0;
            return self.restore(id, Side::Right, outer);
        }
        id
    }

    /// `compare(payload(a), payload(b)) == Less`
    #[inline]
    pub(super) fn less_at(&self, a: NodeId, b: NodeId) -> bool {
        self.compare
            .less(self.arena[a].payload(), self.arena[b].payload())
    }
}
