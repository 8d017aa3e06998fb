//! Node groups left behind by a leaving node.

use alloc::vec::Vec;

use crate::forest::traverse::preorder_with_depth;
use crate::forest::Forest;
use crate::id::NodeId;

/// A connected set of nodes hanging from a local root.
///
/// Depths stored here are relative to the local root, so they stay valid
/// wherever the group is placed later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Group {
    /// Local root.
    root: NodeId,
    /// Members in pre-order (the local root first), with relative depths.
    members: Vec<(NodeId, usize)>,
}

impl Group {
    /// Collects the subtree under the given node.
    #[must_use]
    pub(super) fn collect(forest: &Forest, root: NodeId) -> Self {
        Self {
            root,
            members: preorder_with_depth(forest, root),
        }
    }

    /// Returns the local root.
    #[inline]
    #[must_use]
    pub(super) fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the member IDs in pre-order.
    pub(super) fn member_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.members.iter().map(|&(id, _)| id)
    }

    /// Returns the greatest relative depth among the members.
    #[must_use]
    pub(super) fn height(&self) -> usize {
        self.members
            .iter()
            .map(|&(_, depth)| depth)
            .max()
            .unwrap_or(0)
    }

    /// Returns the sum of spare capacity over the members.
    #[must_use]
    pub(super) fn spare_capacity(&self, forest: &Forest) -> usize {
        self.member_ids()
            .map(|id| {
                forest
                    .node(id)
                    .expect("[consistency] group members must be alive")
                    .remaining()
            })
            .sum()
    }

    /// Returns the members with spare capacity in ascending ID order, paired
    /// with their relative depths.
    #[must_use]
    pub(super) fn open_slots(&self, forest: &Forest) -> Vec<(NodeId, usize)> {
        let mut slots = self
            .members
            .iter()
            .copied()
            .filter(|&(id, _)| {
                forest
                    .node(id)
                    .expect("[consistency] group members must be alive")
                    .remaining()
                    > 0
            })
            .collect::<Vec<_>>();
        slots.sort_unstable_by_key(|&(id, _)| id);
        slots
    }

    /// Returns the relative depth of the member.
    #[must_use]
    pub(super) fn depth_of(&self, id: NodeId) -> Option<usize> {
        self.members
            .iter()
            .find(|&&(member, _)| member == id)
            .map(|&(_, depth)| depth)
    }

    /// Places the group so that the local root is at the given depth.
    pub(super) fn rebase(&self, forest: &mut Forest, base: usize) {
        for &(id, depth) in &self.members {
            forest
                .node_mut(id)
                .expect("[consistency] group members must be alive")
                .depth = base + depth;
        }
    }

    /// Hangs `other` below `connecting`, a member of this group.
    ///
    /// Relative depths of `other` are shifted below the connecting node.
    pub(super) fn absorb(&mut self, other: Group, connecting: NodeId) {
        let base = self
            .depth_of(connecting)
            .expect("[precondition] the connecting node must be a member")
            + 1;
        self.members.extend(
            other
                .members
                .into_iter()
                .map(|(id, depth)| (id, base + depth)),
        );
    }
}

/// Splits what is left of a tree after a node left into groups.
///
/// `remainder` is the root of the tree when the leaving node was not the root
/// itself; the rest of the tree hanging from it comes first. Each orphaned
/// child subtree follows, in the order the children were attached.
///
/// Links to the leaving node must already be cut.
#[must_use]
pub(super) fn partition(
    forest: &Forest,
    remainder: Option<NodeId>,
    orphans: &[NodeId],
) -> Vec<Group> {
    remainder
        .into_iter()
        .chain(orphans.iter().copied())
        .map(|root| Group::collect(forest, root))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nid(v: usize) -> NodeId {
        NodeId::new(v).expect("non-zero")
    }

    #[test]
    fn collect_subtree() {
        // N1 -> N2 -> {N3, N4}
        let mut forest = Forest::new();
        forest.join(1);
        forest.join(2);
        forest.join(0);
        forest.join(0);

        let group = Group::collect(&forest, nid(2));
        assert_eq!(group.root(), nid(2));
        assert_eq!(group.member_ids().collect::<Vec<_>>(), [nid(2), nid(3), nid(4)]);
        assert_eq!(group.height(), 1);
        assert_eq!(group.spare_capacity(&forest), 0);
        assert!(group.open_slots(&forest).is_empty());

        let whole = Group::collect(&forest, nid(1));
        assert_eq!(whole.height(), 2);
        assert_eq!(whole.depth_of(nid(4)), Some(2));
        assert_eq!(whole.depth_of(nid(9)), None);
    }

    #[test]
    fn absorb_shifts_depths() {
        let mut forest = Forest::new();
        forest.join(3);
        forest.join(0);
        let mut left = Group::collect(&forest, nid(1));
        let right = Group {
            root: nid(7),
            members: alloc::vec![(nid(7), 0), (nid(8), 1)],
        };
        left.absorb(right, nid(2));
        assert_eq!(left.depth_of(nid(7)), Some(2));
        assert_eq!(left.depth_of(nid(8)), Some(3));
        assert_eq!(left.height(), 3);
    }
}
