//! Tree traversal.
//!
//! Traversers keep an explicit stack instead of recursing, so deep trees do
//! not exhaust the call stack. Children are always visited in ascending ID
//! order regardless of the order they were attached in.

use core::iter;

use alloc::vec::Vec;

use crate::forest::Forest;
use crate::id::NodeId;

/// Depth-first traverseal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DftEvent<T> {
    /// Node open.
    Open(T),
    /// Node close.
    Close(T),
}

impl<T> DftEvent<T> {
    /// Converts the internal value.
    pub fn map<F, U>(self, f: F) -> DftEvent<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Open(v) => DftEvent::Open(f(v)),
            Self::Close(v) => DftEvent::Close(f(v)),
        }
    }
}

/// A node on the traversal stack.
#[derive(Debug, Clone)]
struct Frame {
    /// Node.
    id: NodeId,
    /// Children not yet visited, in descending ID order.
    pending: Vec<NodeId>,
}

impl Frame {
    /// Creates a frame for the node.
    fn new(forest: &Forest, id: NodeId) -> Self {
        let mut pending = forest
            .node(id)
            .expect("[consistency] the node being traversed must be alive")
            .child_ids()
            .to_vec();
        // Popping from the back yields the smallest ID first.
        pending.sort_unstable_by(|a, b| b.cmp(a));
        Self { id, pending }
    }
}

/// Iterator for depth-first traversal.
///
/// # Examples
///
/// ```
/// use peerforest::traverse::DftEvent;
/// use peerforest::Forest;
///
/// let mut forest = Forest::new();
/// let root = forest.join(2);
/// let child = forest.join(0);
///
/// let events = forest.depth_first_traverse(root).collect::<Vec<_>>();
/// assert_eq!(
///     events,
///     [
///         DftEvent::Open(root),
///         DftEvent::Open(child),
///         DftEvent::Close(child),
///         DftEvent::Close(root),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DepthFirstTraverse<'a> {
    /// Forest.
    forest: &'a Forest,
    /// Toplevel node, until it is opened.
    toplevel: Option<NodeId>,
    /// Open nodes, from the toplevel to the most recently opened node.
    stack: Vec<Frame>,
}

impl<'a> DepthFirstTraverse<'a> {
    /// Creates a traverser from a toplevel node.
    ///
    /// The toplevel does not need to be the root of a tree.
    ///
    /// # Panics
    ///
    /// Panics if the node does not exist.
    #[must_use]
    pub(crate) fn with_toplevel(forest: &'a Forest, id: NodeId) -> Self {
        assert!(
            forest.node(id).is_some(),
            "[precondition] the toplevel node must be alive"
        );
        Self {
            forest,
            toplevel: Some(id),
            stack: Vec::new(),
        }
    }

    /// Returns the depth of the most recently opened node, relative to the
    /// toplevel.
    ///
    /// Returns `None` before the first event and after the last event.
    #[must_use]
    pub fn depth(&self) -> Option<usize> {
        self.stack.len().checked_sub(1)
    }

    /// Returns the ID of the parent of the most recently opened node inside
    /// the traversed subtree.
    #[must_use]
    pub fn parent_in_subtree(&self) -> Option<NodeId> {
        let len = self.stack.len();
        len.checked_sub(2).map(|i| self.stack[i].id)
    }
}

impl Iterator for DepthFirstTraverse<'_> {
    type Item = DftEvent<NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(toplevel) = self.toplevel.take() {
            self.stack.push(Frame::new(self.forest, toplevel));
            return Some(DftEvent::Open(toplevel));
        }
        let top = self.stack.last_mut()?;
        match top.pending.pop() {
            Some(child) => {
                self.stack.push(Frame::new(self.forest, child));
                Some(DftEvent::Open(child))
            }
            None => {
                let closed = self.stack.pop()?;
                Some(DftEvent::Close(closed.id))
            }
        }
    }
}

impl iter::FusedIterator for DepthFirstTraverse<'_> {}

/// Returns the nodes under the toplevel (inclusive) in pre-order, paired with
/// their depths relative to the toplevel.
#[must_use]
pub(crate) fn preorder_with_depth(forest: &Forest, toplevel: NodeId) -> Vec<(NodeId, usize)> {
    let mut traverser = DepthFirstTraverse::with_toplevel(forest, toplevel);
    let mut visited = Vec::new();
    while let Some(ev) = traverser.next() {
        if let DftEvent::Open(id) = ev {
            let depth = traverser
                .depth()
                .expect("[consistency] the opened node is on the stack");
            visited.push((id, depth));
        }
    }

    visited
}
