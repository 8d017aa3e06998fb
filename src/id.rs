//! Node and tree IDs.

use core::fmt;
use core::num::NonZeroUsize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Node ID.
///
/// IDs are issued in strictly increasing order starting at 1, so the
/// ordering (`PartialOrd` and `Ord`) of node IDs is the creation order of the
/// nodes.
///
/// `Display` renders the display name used by [`TreeView`][`crate::TreeView`],
/// i.e. `N` followed by the number.
///
/// ```
/// use peerforest::NodeId;
///
/// let id = NodeId::new(7).expect("7 is non-zero");
/// assert_eq!(id.to_string(), "N7");
/// assert_eq!(id.get(), 7);
/// assert!(NodeId::new(0).is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct NodeId(NonZeroUsize);

impl NodeId {
    /// Creates a node ID from the raw value.
    ///
    /// Returns `None` if the given value is zero.
    #[inline]
    #[must_use]
    pub fn new(v: usize) -> Option<Self> {
        NonZeroUsize::new(v).map(Self)
    }

    /// Returns the raw `usize` value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Returns the index of the node in the registry storage.
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.0.get() - 1
    }
}

// Prevent `{:#?}` from printing the value in redundant 3 lines.
impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// Tree ID.
///
/// Like [`NodeId`], tree IDs are issued in creation order starting at 1.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct TreeId(NonZeroUsize);

impl TreeId {
    /// Creates a tree ID from the raw value.
    ///
    /// Returns `None` if the given value is zero.
    #[inline]
    #[must_use]
    pub fn new(v: usize) -> Option<Self> {
        NonZeroUsize::new(v).map(Self)
    }

    /// Returns the raw `usize` value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Returns the index of the tree in the registry storage.
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Debug for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TreeId({})", self.0)
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Issuer of node and tree IDs.
///
/// Counters only move forward: an ID is never issued twice, even after the
/// entity it named is removed.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdAllocator {
    /// Number of node IDs issued so far.
    nodes_issued: usize,
    /// Number of tree IDs issued so far.
    trees_issued: usize,
}

impl IdAllocator {
    /// Issues the next node ID.
    ///
    /// # Panics
    ///
    /// Panics if the node ID overflows.
    pub(crate) fn next_node_id(&mut self) -> NodeId {
        self.nodes_issued = self
            .nodes_issued
            .checked_add(1)
            .expect("[precondition] node ID overflowed presumably due to too many node creations");
        NodeId::new(self.nodes_issued).expect("[validity] incremented counter is non-zero")
    }

    /// Issues the next tree ID.
    ///
    /// # Panics
    ///
    /// Panics if the tree ID overflows.
    pub(crate) fn next_tree_id(&mut self) -> TreeId {
        self.trees_issued = self
            .trees_issued
            .checked_add(1)
            .expect("[precondition] tree ID overflowed presumably due to too many tree creations");
        TreeId::new(self.trees_issued).expect("[validity] incremented counter is non-zero")
    }
}
