//! Slot storage for tree nodes
//!
//! Nodes live in a `Vec` of slots addressed by `NodeId`. Vacated slots go on
//! a free list and are reused by the next allocation. All growth goes through
//! `try_reserve`, so running out of memory is reported before the tree links
//! anything.

use std::collections::TryReserveError;
use std::ops::{Index, IndexMut};

use super::node::{Node, NodeId};

/// Node arena with slot reuse
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,

    /// Vacant slot indices, most recently freed last
    free: Vec<NodeId>,

    /// Occupied slot count
    live: usize,
}

impl<T> Arena<T> {
    /// Create empty arena
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Reserve room for `additional` more nodes
    ///
    /// Also reserves free-list room so that a later `release` never has to
    /// allocate.
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let reusable = self.free.len().min(additional);
        let fresh = additional - reusable;
        self.slots.try_reserve(fresh)?;
        let free_needed = (self.slots.len() + fresh).saturating_sub(self.free.len());
        self.free.try_reserve(free_needed)?;
        Ok(())
    }

    /// Store a node, returning its handle
    pub(crate) fn alloc(&mut self, node: Node<T>) -> Result<NodeId, TryReserveError> {
        if let Some(id) = self.free.pop() {
            self.slots[id.0] = Some(node);
            self.live += 1;
            return Ok(id);
        }

        self.reserve(1)?;
        let id = NodeId(self.slots.len());
        self.slots.push(Some(node));
        self.live += 1;
        Ok(id)
    }

    /// Vacate a slot, returning its node
    pub(crate) fn release(&mut self, id: NodeId) -> Node<T> {
        let node = match self.slots.get_mut(id.0).and_then(Option::take) {
            Some(node) => node,
            None => panic!("release of vacant node slot {id}"),
        };
        self.free.push(id);
        self.live -= 1;
        node
    }

    /// Node in slot `id`, if occupied
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Number of live nodes
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    /// Drop every node and forget all slots
    pub(crate) fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<T> {
        match self.slots.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("dangling node id {id}"),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("dangling node id {id}"),
        }
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
