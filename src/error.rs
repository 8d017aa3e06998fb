//! Error types.

use thiserror::Error;

use crate::id::{NodeId, TreeId};

/// Result type alias for forest operations.
pub type Result<T> = core::result::Result<T, ForestError>;

/// Errors reported by forest operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestError {
    /// The node does not exist, or has already left.
    #[error("node not found: {0}")]
    NotFound(NodeId),
}

/// Structure inconsistency found by [`Forest::validate`][`crate::Forest::validate`].
///
/// Any of these means the forest was corrupted by a defect in the forest
/// mutation code.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyError {
    /// A node has more children than its capacity.
    #[error("{node} has {children} children but capacity {capacity}")]
    OverCapacity {
        /// Node.
        node: NodeId,
        /// Number of children.
        children: usize,
        /// Capacity of the node.
        capacity: usize,
    },
    /// A node refers to a tree which does not list it.
    #[error("{node} claims tree {tree} which does not contain it")]
    NotInTree {
        /// Node.
        node: NodeId,
        /// Tree recorded on the node.
        tree: TreeId,
    },
    /// A tree lists a node which is missing or belongs to another tree.
    #[error("tree {tree} lists {node} which is not its member")]
    StrayMember {
        /// Tree.
        tree: TreeId,
        /// Node listed by the tree.
        node: NodeId,
    },
    /// A tree has no members.
    #[error("tree {0} is empty")]
    EmptyTree(TreeId),
    /// The root of a tree has a parent, or is not a member of the tree.
    #[error("tree {tree} has invalid root {root}")]
    InvalidRoot {
        /// Tree.
        tree: TreeId,
        /// Root recorded on the tree.
        root: NodeId,
    },
    /// Parent and child links disagree.
    #[error("{child} and its parent {parent} disagree about their link")]
    BrokenLink {
        /// Parent.
        parent: NodeId,
        /// Child.
        child: NodeId,
    },
    /// A node is not reachable from the root of its tree.
    #[error("{node} is unreachable from the root of tree {tree}")]
    Unreachable {
        /// Tree.
        tree: TreeId,
        /// Node.
        node: NodeId,
    },
    /// The recorded depth does not match the distance from the root.
    #[error("{node} records depth {recorded} but is at depth {actual}")]
    WrongDepth {
        /// Node.
        node: NodeId,
        /// Depth recorded on the node.
        recorded: usize,
        /// Distance from the root.
        actual: usize,
    },
}
