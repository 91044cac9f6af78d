//! Tree vertex
//!
//! Node = payload + owning child edges + non-owning parent link + height
//!   Child edges own the subtree below them.
//!   The parent link only mirrors the slot that owns this node.
//!
//! Setters are raw: changing a child slot does not touch the child's parent
//! link or this node's height. The tree fixes both right after every
//! structural change.

use std::fmt;

/// Handle to a node slot in the tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw slot index
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Child slot selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Smaller-side child
    Left,

    /// Larger-side child
    Right,
}

impl Side {
    /// The mirror slot
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Height assigned to a missing subtree
pub const EMPTY_HEIGHT: i32 = -1;

/// AVL tree node
#[derive(Debug, Clone)]
pub struct Node<T> {
    payload: T,

    /// Owning edge to the left subtree
    left: Option<NodeId>,

    /// Owning edge to the right subtree
    right: Option<NodeId>,

    /// Non-owning back-reference; `None` only for the root
    parent: Option<NodeId>,

    /// Cached subtree height (leaf = 0)
    height: i32,
}

impl<T> Node<T> {
    /// Create a detached leaf
    pub fn leaf(payload: T) -> Self {
        Self {
            payload,
            left: None,
            right: None,
            parent: None,
            height: 0,
        }
    }

    /// Stored value
    #[inline]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Stored value, mutably. Must not change the value's ordering key.
    #[inline]
    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    /// Swap in a new payload, returning the old one
    #[inline]
    pub fn replace_payload(&mut self, payload: T) -> T {
        std::mem::replace(&mut self.payload, payload)
    }

    /// Consume the node, keeping only its payload
    #[inline]
    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Left child
    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Set left child (does not update the child's parent link)
    #[inline]
    pub fn set_left(&mut self, child: Option<NodeId>) {
        self.left = child;
    }

    /// Right child
    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Set right child (does not update the child's parent link)
    #[inline]
    pub fn set_right(&mut self, child: Option<NodeId>) {
        self.right = child;
    }

    /// Child in the given slot
    #[inline]
    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Set the child in the given slot
    #[inline]
    pub fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Parent back-reference
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Set parent back-reference
    #[inline]
    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    /// Cached height
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Overwrite cached height
    #[inline]
    pub fn set_height(&mut self, height: i32) {
        self.height = height;
    }

    /// Check if leaf (no children)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
