//! Scripted forest operations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::forest::Forest;
use crate::id::NodeId;

/// A mutating operation on the forest.
///
/// With the `serde` feature, actions use the externally tagged form
/// `{"join": {"capacity": 1}}` and `{"leave": {"id": 2}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Action {
    /// Adds a node.
    Join {
        /// Capacity of the new node.
        #[cfg_attr(feature = "serde", serde(default))]
        capacity: usize,
    },
    /// Removes a node.
    Leave {
        /// Node to remove.
        id: NodeId,
    },
}

impl Forest {
    /// Applies the action.
    ///
    /// Returns the ID of the new node for [`Action::Join`].
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::NotFound`][`crate::ForestError::NotFound`] if a
    /// leaving node does not exist.
    pub fn apply(&mut self, action: Action) -> Result<Option<NodeId>> {
        match action {
            Action::Join { capacity } => Ok(Some(self.join(capacity))),
            Action::Leave { id } => self.leave(id).map(|()| None),
        }
    }

    /// Applies the actions in order.
    ///
    /// Leave actions for missing nodes are logged and skipped. Returns the
    /// number of skipped actions.
    ///
    /// # Examples
    ///
    /// ```
    /// use peerforest::{Action, Forest, NodeId};
    ///
    /// let n1 = NodeId::new(1).expect("non-zero");
    /// let mut forest = Forest::new();
    /// let skipped = forest.replay([
    ///     Action::Join { capacity: 1 },
    ///     Action::Join { capacity: 2 },
    ///     Action::Leave { id: n1 },
    ///     Action::Leave { id: n1 },
    /// ]);
    /// assert_eq!(skipped, 1);
    /// assert_eq!(forest.len(), 1);
    /// ```
    pub fn replay<I>(&mut self, actions: I) -> usize
    where
        I: IntoIterator<Item = Action>,
    {
        let mut skipped = 0;
        for action in actions {
            if let Err(e) = self.apply(action) {
                warn!(?action, error = %e, "action skipped");
                skipped += 1;
            }
        }

        skipped
    }
}
