//! Consistency check.

use alloc::collections::BTreeSet;

use crate::error::ConsistencyError;
use crate::forest::traverse::DftEvent;
use crate::forest::Forest;

impl Forest {
    /// Checks every structural invariant of the forest.
    ///
    /// A forest only mutated through its public methods always passes this
    /// check; a failure means a defect in this crate.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConsistencyError> {
        for node in self.nodes() {
            let id = node.id();
            if node.child_ids().len() > node.capacity() {
                return Err(ConsistencyError::OverCapacity {
                    node: id,
                    children: node.child_ids().len(),
                    capacity: node.capacity(),
                });
            }
            if !self
                .tree(node.tree_id())
                .map_or(false, |tree| tree.contains(id))
            {
                return Err(ConsistencyError::NotInTree {
                    node: id,
                    tree: node.tree_id(),
                });
            }
            for &child in node.child_ids() {
                if self.node(child).and_then(|c| c.parent_id()) != Some(id) {
                    return Err(ConsistencyError::BrokenLink { parent: id, child });
                }
            }
            if let Some(parent) = node.parent_id() {
                if !self
                    .node(parent)
                    .map_or(false, |p| p.child_ids().contains(&id))
                {
                    return Err(ConsistencyError::BrokenLink { parent, child: id });
                }
            }
        }

        for tree in self.trees() {
            let tree_id = tree.id();
            if tree.is_empty() {
                return Err(ConsistencyError::EmptyTree(tree_id));
            }
            for member in tree.node_ids() {
                if self.node(member).map(|n| n.tree_id()) != Some(tree_id) {
                    return Err(ConsistencyError::StrayMember {
                        tree: tree_id,
                        node: member,
                    });
                }
            }
            let root = tree.root_id();
            if !tree.contains(root) || self.node(root).map_or(true, |n| !n.is_root()) {
                return Err(ConsistencyError::InvalidRoot {
                    tree: tree_id,
                    root,
                });
            }

            // Walk down from the root. Links were checked to be symmetric
            // above, so every node has at most one parent and the walk ends.
            let mut reached = BTreeSet::new();
            let mut traverser = self.depth_first_traverse(root);
            while let Some(ev) = traverser.next() {
                let DftEvent::Open(id) = ev else {
                    continue;
                };
                if !tree.contains(id) || !reached.insert(id) {
                    return Err(ConsistencyError::StrayMember {
                        tree: tree_id,
                        node: id,
                    });
                }
                let actual = traverser
                    .depth()
                    .expect("[consistency] the opened node is on the stack");
                let recorded = self
                    .node(id)
                    .expect("[consistency] members were checked to be alive")
                    .depth();
                if recorded != actual {
                    return Err(ConsistencyError::WrongDepth {
                        node: id,
                        recorded,
                        actual,
                    });
                }
            }
            if let Some(node) = tree.node_ids().find(|id| !reached.contains(id)) {
                return Err(ConsistencyError::Unreachable {
                    tree: tree_id,
                    node,
                });
            }
        }

        Ok(())
    }
}
