//! Forest of capacity-bounded trees for overlay peer attachment.
//!
//! Each peer (node) can host a bounded number of children. Peers join and
//! leave at any time while the forest is kept as few and as shallow trees as
//! possible:
//!
//! * [`Forest::join`] attaches a new node below the node with the most spare
//!   capacity in the whole forest, or starts a new tree when nobody has any.
//! * [`Forest::leave`] removes a node and merges the subtrees left behind
//!   (and the rest of its tree) back, picking connecting nodes which keep the
//!   resulting trees shallow.
//! * [`Forest::info`] returns a deterministic node/edge view of every tree.
//!
//! ```
//! use peerforest::Forest;
//!
//! let mut forest = Forest::new();
//! let n1 = forest.join(1);
//! forest.join(2);
//! forest.leave(n1).expect("node exists");
//!
//! let info = forest.info();
//! assert_eq!(info.len(), 1);
//! assert_eq!(info[0].nodes.get("N2"), Some(&2));
//! assert!(info[0].edges.is_empty());
//! ```
//!
//! The forest is a plain value: mutations take `&mut self`, so callers
//! sharing it across threads put it behind their own lock.
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

extern crate alloc;

mod error;
mod forest;
mod id;

pub use self::error::{ConsistencyError, ForestError, Result};
#[cfg(feature = "debug-print")]
pub use self::forest::DebugPrint;
pub use self::forest::{traverse, Action, Forest, Node, Tree, TreeView};
pub use self::id::{NodeId, TreeId};
