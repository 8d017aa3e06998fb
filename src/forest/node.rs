//! Node.

use alloc::vec::Vec;

use crate::id::{NodeId, TreeId};

/// A peer in the overlay.
///
/// Nodes are owned by the [`Forest`][`crate::Forest`] and are only mutated
/// through it, so the values read here always satisfy the forest invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Node ID.
    id: NodeId,
    /// Maximum number of children.
    capacity: usize,
    /// Parent, or `None` for the root of a tree.
    pub(super) parent: Option<NodeId>,
    /// Direct children in attachment order.
    pub(super) children: Vec<NodeId>,
    /// Distance from the root of the tree.
    pub(super) depth: usize,
    /// Tree containing the node.
    pub(super) tree: TreeId,
}

impl Node {
    /// Creates a new root node.
    #[must_use]
    pub(super) fn new_root(id: NodeId, capacity: usize, tree: TreeId) -> Self {
        Self {
            id,
            capacity,
            parent: None,
            children: Vec::new(),
            depth: 0,
            tree,
        }
    }

    /// Returns the node ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the maximum number of children.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the node ID of the parent.
    #[inline]
    #[must_use]
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the node IDs of the children, in the order they were attached.
    #[inline]
    #[must_use]
    pub fn child_ids(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the distance from the root of the tree.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the ID of the tree containing the node.
    #[inline]
    #[must_use]
    pub fn tree_id(&self) -> TreeId {
        self.tree
    }

    /// Returns the number of children the node can still accept.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.children.len())
    }

    /// Returns true if the node has no parent.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Appends a child.
    ///
    /// # Panics
    ///
    /// Panics if the node has no spare capacity.
    pub(super) fn push_child(&mut self, child: NodeId) {
        assert!(
            self.remaining() > 0,
            "[precondition] {} has no spare capacity for {}",
            self.id,
            child
        );
        debug_assert!(
            !self.children.contains(&child),
            "[precondition] {} is already a child of {}",
            child,
            self.id
        );
        self.children.push(child);
    }

    /// Removes a child, keeping the order of the others.
    ///
    /// Returns false if the node was not a child.
    pub(super) fn remove_child(&mut self, child: NodeId) -> bool {
        match self.children.iter().position(|&c| c == child) {
            Some(pos) => {
                self.children.remove(pos);
                true
            }
            None => false,
        }
    }
}
