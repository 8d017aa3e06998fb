//! Re-attachment of groups left behind by a leaving node.

use alloc::vec::Vec;

use tracing::trace;

use crate::forest::partition::Group;
use crate::forest::Forest;
use crate::id::{NodeId, TreeId};

/// Side of the pair a connecting node was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// Left group.
    Left,
    /// Right group.
    Right,
}

/// Result of merging two groups.
#[derive(Debug)]
enum Merged {
    /// One group was hung below a node of the other.
    Joined(Group),
    /// Neither group had spare capacity.
    Split {
        /// Group which stays in the current tree.
        kept: Group,
        /// Group which needs a tree of its own.
        rest: Group,
    },
}

impl Forest {
    /// Merges the groups back into as few trees as possible.
    ///
    /// Groups are folded from left to right: the first group is merged with
    /// the second, the result with the third, and so on. A group which cannot
    /// be attached becomes a new tree. Whatever is accumulated at the end
    /// stays in the given tree.
    ///
    /// # Panics
    ///
    /// Panics if `groups` is empty.
    pub(super) fn fold_groups(&mut self, tree: TreeId, groups: Vec<Group>) {
        let mut groups = groups.into_iter();
        let mut acc = groups
            .next()
            .expect("[precondition] there must be at least one group to merge");
        acc.rebase(self, 0);

        for group in groups {
            group.rebase(self, 0);
            acc = match self.merge_pair(acc, group) {
                Merged::Joined(joined) => joined,
                Merged::Split { kept, rest } => {
                    self.plant(rest);
                    kept
                }
            };
        }

        let survivor = self
            .tree_mut(tree)
            .expect("[consistency] the tree being rebuilt must exist");
        survivor.root = acc.root();
        survivor.nodes = acc.member_ids().collect();
        trace!(tree = %tree, root = %survivor.root, len = survivor.nodes.len(), "tree rebuilt");
    }

    /// Merges two groups, each placed with its local root at depth 0.
    ///
    /// The connecting node is the member with spare capacity that minimizes
    /// its own depth plus the height of the other group. Left candidates come
    /// before right ones and each side is scanned in ascending ID order; the
    /// first minimum wins.
    fn merge_pair(&mut self, left: Group, right: Group) -> Merged {
        let spare = left.spare_capacity(self) + right.spare_capacity(self);
        if spare == 0 {
            trace!(left = %left.root(), right = %right.root(), "no spare capacity, splitting");
            return Merged::Split {
                kept: left,
                rest: right,
            };
        }

        let (left_height, right_height) = (left.height(), right.height());
        let left_slots = left
            .open_slots(self)
            .into_iter()
            .map(|(id, depth)| (Side::Left, id, depth + right_height));
        let right_slots = right
            .open_slots(self)
            .into_iter()
            .map(|(id, depth)| (Side::Right, id, depth + left_height));
        let (side, connecting, score) = left_slots
            .chain(right_slots)
            .reduce(|best, cand| if cand.2 < best.2 { cand } else { best })
            .expect("[consistency] spare capacity implies a node with an open slot");
        trace!(node = %connecting, ?side, score, "connecting node chosen");

        let (mut host, guest) = match side {
            Side::Left => (left, right),
            Side::Right => (right, left),
        };
        self.attach(&mut host, guest, connecting);

        Merged::Joined(host)
    }

    /// Hangs the guest group below the connecting node of the host group.
    fn attach(&mut self, host: &mut Group, guest: Group, connecting: NodeId) {
        let guest_root = guest.root();
        let parent = self
            .node_mut(connecting)
            .expect("[consistency] the connecting node must be alive");
        parent.push_child(guest_root);
        let base = parent.depth + 1;

        let root = self
            .node_mut(guest_root)
            .expect("[consistency] the local root must be alive");
        debug_assert!(root.parent.is_none(), "[consistency] local roots are detached");
        root.parent = Some(connecting);
        guest.rebase(self, base);
        host.absorb(guest, connecting);
    }

    /// Moves the group into a new tree of its own.
    fn plant(&mut self, group: Group) -> TreeId {
        let id = self.create_tree(group.root());
        self.tree_mut(id)
            .expect("[consistency] the tree has just been created")
            .nodes = group.member_ids().collect();
        for member in group.member_ids() {
            self.node_mut(member)
                .expect("[consistency] group members must be alive")
                .tree = id;
        }
        trace!(tree = %id, root = %group.root(), "group planted as a new tree");

        id
    }
}

#[cfg(test)]
mod tests {
    use crate::forest::{Forest, Node};
    use crate::id::NodeId;

    fn nid(v: usize) -> NodeId {
        NodeId::new(v).expect("non-zero")
    }

    fn parent_of(forest: &Forest, id: usize) -> Option<usize> {
        forest
            .node(nid(id))
            .expect("node exists")
            .parent_id()
            .map(NodeId::get)
    }

    #[test]
    fn root_with_two_children_merges_into_shallower_side() {
        // N1(2)
        // |-- N2(1)
        // |   `-- N4(0)
        // `-- N3(1)
        let mut forest = Forest::new();
        for capacity in [2, 1, 1, 0] {
            forest.join(capacity);
        }
        assert_eq!(parent_of(&forest, 4), Some(2));

        forest.leave(nid(1)).expect("node exists");
        forest.validate().expect("consistent");

        // Only N3 has spare capacity: N2's subtree hangs below it.
        assert_eq!(forest.num_trees(), 1);
        let tree = forest.trees().next().expect("one tree");
        assert_eq!(tree.root_id(), nid(3));
        assert_eq!(parent_of(&forest, 2), Some(3));
        assert_eq!(forest.node(nid(4)).map(Node::depth), Some(2));
    }

    #[test]
    fn no_spare_capacity_splits_tree() {
        // N1(2) with two leaves of capacity 0.
        let mut forest = Forest::new();
        for capacity in [2, 0, 0] {
            forest.join(capacity);
        }
        forest.leave(nid(1)).expect("node exists");
        forest.validate().expect("consistent");

        let trees = forest.trees().collect::<Vec<_>>();
        assert_eq!(trees.len(), 2);
        // The tree of the removed root keeps the first group.
        assert_eq!(trees[0].id().get(), 1);
        assert_eq!(trees[0].root_id(), nid(2));
        assert_eq!(trees[1].id().get(), 2);
        assert_eq!(trees[1].root_id(), nid(3));
        assert_eq!(forest.node(nid(3)).map(|n| n.tree_id().get()), Some(2));
    }

    #[test]
    fn score_ties_prefer_left_group() {
        // N1(1) -> N2(2) -> {N3(1), N4(1)}
        let mut forest = Forest::new();
        for capacity in [1, 2, 1, 1] {
            forest.join(capacity);
        }
        assert_eq!(parent_of(&forest, 3), Some(2));
        assert_eq!(parent_of(&forest, 4), Some(2));

        forest.leave(nid(2)).expect("node exists");
        forest.validate().expect("consistent");

        // Groups: {N1}, {N3}, {N4}. Every candidate scores the same, so the
        // left side wins each time and everything hangs from the remainder.
        assert_eq!(forest.num_trees(), 1);
        assert_eq!(parent_of(&forest, 3), Some(1));
        // N1 is full after taking N3; N3 is the first open slot.
        assert_eq!(parent_of(&forest, 4), Some(3));
        assert_eq!(forest.node(nid(4)).map(Node::depth), Some(2));
    }

    #[test]
    fn three_way_fold_plants_unattachable_groups() {
        // N1(3) with three leaves of capacity 0.
        let mut forest = Forest::new();
        for capacity in [3, 0, 0, 0] {
            forest.join(capacity);
        }
        forest.leave(nid(1)).expect("node exists");
        forest.validate().expect("consistent");

        let roots = forest.trees().map(|t| t.root_id()).collect::<Vec<_>>();
        assert_eq!(roots, [nid(2), nid(3), nid(4)]);
    }
}
