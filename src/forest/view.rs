//! Serializable view of the forest.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::forest::traverse::DftEvent;
use crate::forest::{Forest, Tree};

/// Nodes and edges of a tree, keyed by display names.
///
/// With the `serde` feature this serializes as
/// `{"nodes": {"N1": 1, "N2": 2}, "edges": [["N1", "N2"]]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeView {
    /// Capacity of each node, in ascending node ID order.
    pub nodes: IndexMap<String, usize>,
    /// Parent-child pairs in depth-first pre-order, children visited in
    /// ascending node ID order.
    pub edges: Vec<(String, String)>,
}

impl TreeView {
    /// Creates the view of the tree.
    #[must_use]
    fn new(forest: &Forest, tree: &Tree) -> Self {
        let nodes = tree
            .node_ids()
            .map(|id| {
                let node = forest
                    .node(id)
                    .expect("[consistency] tree members must be alive");
                (id.to_string(), node.capacity())
            })
            .collect();

        let mut edges = Vec::with_capacity(tree.len().saturating_sub(1));
        let mut traverser = forest.depth_first_traverse(tree.root_id());
        while let Some(ev) = traverser.next() {
            if let DftEvent::Open(child) = ev {
                if let Some(parent) = traverser.parent_in_subtree() {
                    edges.push((parent.to_string(), child.to_string()));
                }
            }
        }

        Self { nodes, edges }
    }
}

impl Forest {
    /// Returns the view of every tree, in the order the trees were created.
    ///
    /// # Examples
    ///
    /// ```
    /// use peerforest::Forest;
    ///
    /// let mut forest = Forest::new();
    /// forest.join(1);
    /// forest.join(2);
    ///
    /// let info = forest.info();
    /// assert_eq!(info.len(), 1);
    /// assert_eq!(info[0].nodes.get("N1"), Some(&1));
    /// assert_eq!(info[0].nodes.get("N2"), Some(&2));
    /// assert_eq!(info[0].edges, [("N1".to_owned(), "N2".to_owned())]);
    /// ```
    #[must_use]
    pub fn info(&self) -> Vec<TreeView> {
        self.trees().map(|tree| TreeView::new(self, tree)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(parent: &str, child: &str) -> (String, String) {
        (parent.to_string(), child.to_string())
    }

    #[test]
    fn edges_in_preorder() {
        // N1(2)
        // |-- N2(2)
        // |   |-- N3(0)
        // |   `-- N5(0)
        // `-- N4(0)
        let mut forest = Forest::new();
        for capacity in [2, 2, 0, 0, 0] {
            forest.join(capacity);
        }
        let info = forest.info();
        assert_eq!(info.len(), 1);
        assert_eq!(
            info[0].nodes.keys().map(String::as_str).collect::<Vec<_>>(),
            ["N1", "N2", "N3", "N4", "N5"]
        );
        assert_eq!(
            info[0].edges,
            [
                edge("N1", "N2"),
                edge("N2", "N3"),
                edge("N2", "N5"),
                edge("N1", "N4"),
            ]
        );
    }

    #[test]
    fn node_names_sort_numerically() {
        let mut forest = Forest::new();
        for _ in 0..11 {
            forest.join(0);
        }
        forest.leave(crate::NodeId::new(1).expect("non-zero")).expect("exists");
        let info = forest.info();
        let names = info
            .iter()
            .flat_map(|view| view.nodes.keys().cloned())
            .collect::<Vec<_>>();
        assert_eq!(names.first().map(String::as_str), Some("N2"));
        assert_eq!(names.last().map(String::as_str), Some("N11"));
    }

    #[test]
    fn info_is_repeatable() {
        let mut forest = Forest::new();
        for capacity in [1, 3, 0, 2, 1, 0] {
            forest.join(capacity);
        }
        assert_eq!(forest.info(), forest.info());
    }
}
