//! Forest.

#[cfg(feature = "debug-print")]
mod debug_print;
mod merge;
mod node;
mod partition;
mod replay;
pub mod traverse;
mod tree;
mod validate;
mod view;

use alloc::vec::Vec;

use tracing::debug;

use crate::error::{ForestError, Result};
use crate::id::{IdAllocator, NodeId, TreeId};

use self::partition::{partition, Group};
use self::traverse::DepthFirstTraverse;

#[cfg(feature = "debug-print")]
pub use self::debug_print::DebugPrint;
pub use self::node::Node;
pub use self::replay::Action;
pub use self::tree::Tree;
pub use self::view::TreeView;

/// Forest of capacity-bounded trees.
///
/// Nodes and trees are stored in arenas indexed by their IDs. IDs are never
/// reused, so removed entries stay as `None`.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    /// ID issuer.
    ids: IdAllocator,
    /// Nodes.
    ///
    /// `None` is used for removed nodes.
    nodes: Vec<Option<Node>>,
    /// Trees.
    ///
    /// `None` is used for removed trees.
    trees: Vec<Option<Tree>>,
    /// Number of alive nodes.
    len: usize,
}

impl Forest {
    /// Creates a new empty forest.
    ///
    /// # Examples
    ///
    /// ```
    /// use peerforest::Forest;
    ///
    /// let forest = Forest::new();
    /// assert!(forest.is_empty());
    /// assert!(forest.info().is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node if it exists and has not left yet.
    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(|entry| entry.as_ref())
    }

    /// Returns the tree if it exists.
    #[inline]
    #[must_use]
    pub fn tree(&self, id: TreeId) -> Option<&Tree> {
        self.trees.get(id.index()).and_then(|entry| entry.as_ref())
    }

    /// Returns the alive nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter_map(Option::as_ref)
    }

    /// Returns the trees in creation order.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> + '_ {
        self.trees.iter().filter_map(Option::as_ref)
    }

    /// Returns the number of alive nodes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the forest has no nodes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of trees.
    #[must_use]
    pub fn num_trees(&self) -> usize {
        self.trees().count()
    }

    /// Returns the maximum depth among the members of the tree.
    ///
    /// Returns `None` if the tree does not exist.
    #[must_use]
    pub fn tree_height(&self, id: TreeId) -> Option<usize> {
        let tree = self.tree(id)?;
        tree.node_ids()
            .filter_map(|node| self.node(node))
            .map(Node::depth)
            .max()
    }

    /// Returns a depth-first traverser over the subtree under the node.
    ///
    /// Children are visited in ascending ID order.
    ///
    /// # Panics
    ///
    /// Panics if the node does not exist.
    #[must_use]
    pub fn depth_first_traverse(&self, id: NodeId) -> DepthFirstTraverse<'_> {
        DepthFirstTraverse::with_toplevel(self, id)
    }

    /// Adds a new node with the given capacity.
    ///
    /// The node is attached under the node with the most spare capacity in
    /// the whole forest (the earliest created one on ties). If no node has
    /// spare capacity, the new node becomes the root of a new tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use peerforest::Forest;
    ///
    /// let mut forest = Forest::new();
    /// let first = forest.join(1);
    /// let second = forest.join(2);
    ///
    /// let second = forest.node(second).expect("should never fail: node exists");
    /// assert_eq!(second.parent_id(), Some(first));
    /// assert_eq!(second.depth(), 1);
    /// assert_eq!(forest.node(first).map(|n| n.remaining()), Some(0));
    /// ```
    pub fn join(&mut self, capacity: usize) -> NodeId {
        let id = self.ids.next_node_id();
        assert_eq!(
            self.nodes.len(),
            id.index(),
            "[consistency] node ID must be able to be used as an index for the vec"
        );

        match self.best_fit() {
            Some(parent_id) => {
                let parent = self
                    .node_mut(parent_id)
                    .expect("[consistency] the best fitting node must be alive");
                parent.push_child(id);
                let (tree_id, depth) = (parent.tree, parent.depth + 1);

                let mut node = Node::new_root(id, capacity, tree_id);
                node.parent = Some(parent_id);
                node.depth = depth;
                self.nodes.push(Some(node));
                self.tree_mut(tree_id)
                    .expect("[consistency] the tree of an alive node must exist")
                    .nodes
                    .insert(id);
                debug!(node = %id, capacity, parent = %parent_id, tree = %tree_id, depth, "node attached");
            }
            None => {
                let tree_id = self.create_tree(id);
                self.nodes.push(Some(Node::new_root(id, capacity, tree_id)));
                debug!(node = %id, capacity, tree = %tree_id, "node started a new tree");
            }
        }
        self.len += 1;

        id
    }

    /// Removes the node and reconnects the nodes left behind.
    ///
    /// Subtrees under the removed node (and the rest of its tree, if the node
    /// was not the root) are merged back so that the resulting trees stay as
    /// few and as shallow as possible.
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::NotFound`] if the node does not exist. The
    /// forest is not modified in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use peerforest::{Forest, ForestError};
    ///
    /// let mut forest = Forest::new();
    /// let root = forest.join(1);
    /// let child = forest.join(2);
    ///
    /// forest.leave(root).expect("node exists");
    /// let tree = forest.trees().next().expect("one tree is left");
    /// assert_eq!(tree.root_id(), child);
    ///
    /// assert_eq!(forest.leave(root), Err(ForestError::NotFound(root)));
    /// ```
    pub fn leave(&mut self, id: NodeId) -> Result<()> {
        let node = self.node(id).ok_or(ForestError::NotFound(id))?;
        let tree_id = node.tree;
        let parent = node.parent;
        let children = node.children.clone();
        let is_root = self
            .tree(tree_id)
            .expect("[consistency] the tree of an alive node must exist")
            .root
            == id;
        debug_assert_eq!(
            is_root,
            parent.is_none(),
            "[consistency] only the root of a tree has no parent"
        );
        debug!(node = %id, tree = %tree_id, is_root, children = children.len(), "node leaving");

        // Cut every link to the leaving node.
        if let Some(parent) = parent {
            let removed = self
                .node_mut(parent)
                .expect("[consistency] the parent must be alive")
                .remove_child(id);
            debug_assert!(removed, "[consistency] the parent must list the child");
        }
        for &child in &children {
            self.node_mut(child)
                .expect("[consistency] the child must be alive")
                .parent = None;
        }
        self.nodes[id.index()] = None;
        self.len -= 1;
        self.tree_mut(tree_id)
            .expect("[consistency] the tree of an alive node must exist")
            .nodes
            .remove(&id);

        match (is_root, children.as_slice()) {
            (true, []) => {
                self.trees[tree_id.index()] = None;
                debug!(tree = %tree_id, "tree removed");
            }
            (true, &[child]) => {
                self.tree_mut(tree_id)
                    .expect("[consistency] the tree must still exist")
                    .root = child;
                Group::collect(self, child).rebase(self, 0);
                debug!(tree = %tree_id, root = %child, "child promoted to root");
            }
            (false, []) => {}
            _ => {
                let remainder = (!is_root).then(|| {
                    self.tree(tree_id)
                        .expect("[consistency] the tree must still exist")
                        .root
                });
                let groups = partition(self, remainder, &children);
                self.fold_groups(tree_id, groups);
            }
        }

        Ok(())
    }

    /// Returns the node with the most spare capacity, or `None` if no node
    /// has spare capacity.
    ///
    /// Ties are broken by the creation order.
    #[must_use]
    fn best_fit(&self) -> Option<NodeId> {
        self.nodes()
            .map(|node| (node.id(), node.remaining()))
            .reduce(|best, cand| if cand.1 > best.1 { cand } else { best })
            .filter(|&(_, remaining)| remaining > 0)
            .map(|(id, _)| id)
    }

    /// Registers a new tree with the given root.
    ///
    /// The caller is responsible to set the tree of the root node.
    fn create_tree(&mut self, root: NodeId) -> TreeId {
        let id = self.ids.next_tree_id();
        assert_eq!(
            self.trees.len(),
            id.index(),
            "[consistency] tree ID must be able to be used as an index for the vec"
        );
        self.trees.push(Some(Tree::with_root(id, root)));

        id
    }

    /// Returns a mutable reference to the node.
    #[inline]
    #[must_use]
    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(|entry| entry.as_mut())
    }

    /// Returns a mutable reference to the tree.
    #[inline]
    #[must_use]
    fn tree_mut(&mut self, id: TreeId) -> Option<&mut Tree> {
        self.trees.get_mut(id.index()).and_then(|entry| entry.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nid(v: usize) -> NodeId {
        NodeId::new(v).expect("non-zero")
    }

    /// Builds a forest by joining nodes with the given capacities.
    fn forest_of(capacities: &[usize]) -> Forest {
        let mut forest = Forest::new();
        for &capacity in capacities {
            forest.join(capacity);
        }
        forest.validate().expect("joins keep the forest consistent");
        forest
    }

    fn parent_of(forest: &Forest, id: usize) -> Option<usize> {
        forest
            .node(nid(id))
            .expect("node exists")
            .parent_id()
            .map(NodeId::get)
    }

    #[test]
    fn first_join_creates_tree() {
        let forest = forest_of(&[3]);
        assert_eq!(forest.num_trees(), 1);
        let node = forest.node(nid(1)).expect("node exists");
        assert!(node.is_root());
        assert_eq!(node.depth(), 0);
        assert_eq!(node.remaining(), 3);
        let tree = forest.tree(node.tree_id()).expect("tree exists");
        assert_eq!(tree.root_id(), nid(1));
        assert_eq!(tree.node_ids().collect::<Vec<_>>(), [nid(1)]);
    }

    #[test]
    fn best_fit_prefers_most_spare_capacity() {
        // N1(1) <- N2(3); N2 has more spare capacity than anyone afterwards.
        let forest = forest_of(&[1, 3, 0, 0]);
        assert_eq!(parent_of(&forest, 2), Some(1));
        assert_eq!(parent_of(&forest, 3), Some(2));
        assert_eq!(parent_of(&forest, 4), Some(2));
        assert_eq!(forest.node(nid(4)).map(Node::depth), Some(2));
    }

    #[test]
    fn best_fit_ties_pick_earliest() {
        // N2 goes under N1, then N3 under N2 (2 spare against 1).
        // Now N1 and N2 both have 1 spare: N1 wins the tie.
        let forest = forest_of(&[2, 2, 0, 0]);
        assert_eq!(parent_of(&forest, 3), Some(2));
        assert_eq!(parent_of(&forest, 4), Some(1));
    }

    #[test]
    fn no_spare_capacity_starts_new_tree() {
        let forest = forest_of(&[1, 0, 0]);
        assert_eq!(forest.num_trees(), 2);
        let node = forest.node(nid(3)).expect("node exists");
        assert!(node.is_root());
        assert_eq!(node.tree_id().get(), 2);
    }

    #[test]
    fn leave_missing_node_is_noop() {
        let mut forest = forest_of(&[1, 1]);
        let before = forest.info();
        assert_eq!(forest.leave(nid(9)), Err(ForestError::NotFound(nid(9))));
        assert_eq!(forest.info(), before);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn leave_leaf_frees_parent_slot() {
        let mut forest = forest_of(&[2, 0]);
        assert_eq!(forest.node(nid(1)).map(Node::remaining), Some(1));
        forest.leave(nid(2)).expect("node exists");
        assert_eq!(forest.node(nid(1)).map(Node::remaining), Some(2));
        assert!(forest.node(nid(2)).is_none());
        forest.validate().expect("consistent");

        // The ID is never reissued.
        assert_eq!(forest.join(0), nid(3));
    }

    #[test]
    fn leave_last_root_removes_tree() {
        let mut forest = forest_of(&[0, 0]);
        assert_eq!(forest.num_trees(), 2);
        forest.leave(nid(1)).expect("node exists");
        assert_eq!(forest.num_trees(), 1);
        assert!(forest.tree(TreeId::new(1).expect("non-zero")).is_none());
        forest.validate().expect("consistent");
    }

    #[test]
    fn leave_root_promotes_only_child() {
        // N1 -> N2 -> N3
        let mut forest = forest_of(&[1, 1, 1]);
        forest.leave(nid(1)).expect("node exists");
        forest.validate().expect("consistent");
        let tree = forest.trees().next().expect("one tree");
        assert_eq!(tree.root_id(), nid(2));
        assert_eq!(forest.node(nid(2)).map(Node::depth), Some(0));
        assert_eq!(forest.node(nid(3)).map(Node::depth), Some(1));
    }

    #[test]
    fn leave_inner_node_reattaches_subtree() {
        // N1(1) -> N2(1) -> N3(1) -> N4(0)
        let mut forest = forest_of(&[1, 1, 1, 0]);
        forest.leave(nid(2)).expect("node exists");
        forest.validate().expect("consistent");
        assert_eq!(forest.num_trees(), 1);
        // N1 has a free slot again and the subtree of N3 hangs below it.
        assert_eq!(parent_of(&forest, 3), Some(1));
        assert_eq!(parent_of(&forest, 4), Some(3));
        assert_eq!(forest.node(nid(4)).map(Node::depth), Some(2));
        let tree = forest.node(nid(1)).expect("node exists").tree_id();
        assert_eq!(forest.tree_height(tree), Some(2));
        assert_eq!(forest.tree(tree).map(Tree::len), Some(3));
    }
}
