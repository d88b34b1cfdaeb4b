//! Volume analysis operations: depth, node counts, type checks, and traversal.
//!
//! Counts treat the volume as a tree: a leaf shared by two parents is
//! counted twice. See [`VolumeGraph`](super::graph::VolumeGraph) for the
//! deduplicated view.

use super::volume::Volume;
use crate::cv::SharedCv;

impl<P> Volume<P> {
    /// Returns the depth of this volume.
    ///
    /// - Leaves (including `Empty` and `Full`) have depth 1
    /// - Combinators have depth = 1 + max(operand depths)
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            for child in node.children().into_iter().flatten() {
                stack.push((child, level + 1));
            }
        }
        deepest
    }

    /// Returns the total number of nodes in this volume.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.visit_preorder(&mut |_: &Volume<P>| count += 1);
        count
    }

    /// Returns the number of leaves in this volume.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.visit_leaves(&mut |_: &Volume<P>| count += 1);
        count
    }

    /// Direct operands, left first; both `None` for leaves.
    fn children(&self) -> [Option<&Volume<P>>; 2] {
        match self {
            Volume::Not(neg) => [Some(neg.inner()), None],
            _ => match self.operands() {
                Some((left, right)) => [Some(left), Some(right)],
                None => [None, None],
            },
        }
    }

    /// Returns whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Volume::Empty | Volume::Full | Volume::Interval(_) | Volume::Periodic(_)
        )
    }

    /// Returns whether this node is a combinator (binary or `Not`).
    pub fn is_combinator(&self) -> bool {
        !self.is_leaf()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Volume::Empty)
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Volume::Full)
    }

    /// Visits all nodes in pre-order (depth-first, left before right).
    pub fn visit_preorder<F>(&self, visitor: &mut F)
    where
        F: FnMut(&Volume<P>),
    {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            visitor(node);
            stack.extend(node.children().into_iter().rev().flatten());
        }
    }

    /// Visits all leaf nodes, left to right.
    pub fn visit_leaves<F>(&self, visitor: &mut F)
    where
        F: FnMut(&Volume<P>),
    {
        self.visit_preorder(&mut |node: &Volume<P>| {
            if node.is_leaf() {
                visitor(node);
            }
        });
    }

    /// Returns the distinct collective variables used by this volume, in
    /// first-seen order.
    pub fn collective_variables(&self) -> Vec<SharedCv<P>> {
        let mut found: Vec<SharedCv<P>> = Vec::new();
        self.visit_leaves(&mut |leaf: &Volume<P>| {
            let cv = match leaf {
                Volume::Interval(l) => l.cv(),
                Volume::Periodic(l) => l.cv(),
                _ => return,
            };
            if !found.iter().any(|seen| seen.id() == cv.id()) {
                found.push(cv.clone());
            }
        });
        found
    }

    /// Prints the volume structure in a human-readable format.
    ///
    /// # Arguments
    ///
    /// * `indent` - The current indentation level (use 0 for the root)
    pub fn print_tree(&self, indent: usize) {
        print!("{}", self.tree_string(indent));
    }

    /// Renders the structure printed by [`Volume::print_tree`].
    pub fn tree_string(&self, indent: usize) -> String {
        let mut out = String::new();
        let mut stack = vec![(self, indent)];
        while let Some((node, level)) = stack.pop() {
            out.push_str(&"  ".repeat(level));
            if node.is_leaf() {
                out.push_str(&format!("└─ {}\n", node));
            } else {
                out.push_str(&format!("└─ {:?}\n", node.kind()));
            }
            for child in node.children().into_iter().rev().flatten() {
                stack.push((child, level + 1));
            }
        }
        out
    }
}
