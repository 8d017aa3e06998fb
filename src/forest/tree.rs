//! Tree.

use alloc::collections::BTreeSet;

use crate::id::{NodeId, TreeId};

/// One connected component of the forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    /// Tree ID.
    id: TreeId,
    /// Members.
    pub(super) nodes: BTreeSet<NodeId>,
    /// Root node.
    pub(super) root: NodeId,
}

impl Tree {
    /// Creates a tree with the single root node.
    #[must_use]
    pub(super) fn with_root(id: TreeId, root: NodeId) -> Self {
        let mut nodes = BTreeSet::new();
        nodes.insert(root);
        Self { id, nodes, root }
    }

    /// Returns the tree ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Returns the root node ID.
    #[inline]
    #[must_use]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Returns the member node IDs in ascending order.
    #[inline]
    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Returns the number of members.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no members.
    ///
    /// Trees in a consistent forest are never empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if the node belongs to the tree.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }
}
