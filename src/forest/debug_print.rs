//! Debug printer.

use core::fmt;

use alloc::vec::Vec;

use crate::forest::traverse::DftEvent;
use crate::forest::{Forest, Node, Tree};
use crate::id::NodeId;

/// Forest printer for debugging.
///
/// Each tree is printed as an indented diagram, one node per line, labelled
/// with the display name, the capacity and the spare capacity:
///
/// ```text
/// N1 (cap 2, free 0)
/// |-- N2 (cap 2, free 1)
/// |   `-- N3 (cap 0, free 0)
/// `-- N4 (cap 0, free 0)
/// ```
///
/// This is provided mainly for debugging purpose. Note that the output format
/// is not guaranteed to be stable.
pub struct DebugPrint<'a> {
    /// Forest to print.
    forest: &'a Forest,
}

impl Forest {
    /// Returns the printer of the whole forest.
    #[inline]
    #[must_use]
    pub fn debug_print(&self) -> DebugPrint<'_> {
        DebugPrint { forest: self }
    }
}

impl DebugPrint<'_> {
    /// Writes a single tree.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, tree: &Tree) -> fmt::Result {
        // Whether the open node at each level is the last among its siblings.
        let mut is_last = Vec::new();
        for ev in self.forest.depth_first_traverse(tree.root_id()) {
            let id = match ev {
                DftEvent::Open(id) => id,
                DftEvent::Close(_) => {
                    is_last.pop();
                    continue;
                }
            };
            let node = self.node(id);
            if let Some(parent) = node.parent_id() {
                let last = self.node(parent).child_ids().iter().max() == Some(&id);
                if let Some((_, ancestors)) = is_last.split_first() {
                    for &ancestor_last in ancestors {
                        f.write_str(if ancestor_last { "    " } else { "|   " })?;
                    }
                }
                f.write_str(if last { "`-- " } else { "|-- " })?;
                is_last.push(last);
            } else {
                is_last.push(true);
            }
            writeln!(
                f,
                "{} (cap {}, free {})",
                id,
                node.capacity(),
                node.remaining()
            )?;
        }

        Ok(())
    }

    /// Returns the node, which must be alive.
    fn node(&self, id: NodeId) -> &Node {
        self.forest
            .node(id)
            .expect("[consistency] the node being printed must be alive")
    }
}

impl fmt::Display for DebugPrint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tree) in self.forest.trees().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            self.fmt_tree(f, tree)?;
        }

        Ok(())
    }
}

impl fmt::Debug for DebugPrint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_forest() {
        let mut forest = Forest::new();
        for capacity in [2, 2, 0, 0, 0] {
            forest.join(capacity);
        }
        forest.join(0);
        let expected = "\
N1 (cap 2, free 0)
|-- N2 (cap 2, free 0)
|   |-- N3 (cap 0, free 0)
|   `-- N5 (cap 0, free 0)
`-- N4 (cap 0, free 0)

N6 (cap 0, free 0)
";
        assert_eq!(forest.debug_print().to_string(), expected);
    }
}
