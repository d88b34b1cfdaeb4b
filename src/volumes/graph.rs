//! DAG export of a volume.
//!
//! [`VolumeGraph`] merges structurally equal subvolumes into a single node,
//! making the sharing inside a volume explicit: a state reused by several
//! interfaces appears once, with one incoming edge per use.

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};

use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use super::volume::Volume;

/// Position of a child below its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    Left,
    Right,
    Inner,
}

impl Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operand::Left => "left",
            Operand::Right => "right",
            Operand::Inner => "inner",
        };
        f.write_str(label)
    }
}

/// Deduplicated directed graph of a volume; edges point parent → child.
pub struct VolumeGraph<P> {
    graph: DiGraph<Volume<P>, Operand>,
    root: NodeIndex,
}

impl<P> Clone for VolumeGraph<P> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            root: self.root,
        }
    }
}

impl<P> Debug for VolumeGraph<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumeGraph")
            .field("graph", &self.graph)
            .field("root", &self.root)
            .finish()
    }
}

impl<P> VolumeGraph<P> {
    pub fn from_volume(volume: &Volume<P>) -> Self {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();
        let root = insert(&mut graph, &mut index, volume);
        Self { graph, root }
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn graph(&self) -> &DiGraph<Volume<P>, Operand> {
        &self.graph
    }

    /// Number of distinct subvolumes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn volume(&self, index: NodeIndex) -> Option<&Volume<P>> {
        self.graph.node_weight(index)
    }

    /// Number of parents referencing the node at `index`.
    pub fn in_degree(&self, index: NodeIndex) -> usize {
        self.graph
            .neighbors_directed(index, Direction::Incoming)
            .count()
    }

    /// Distinct leaves of the volume.
    pub fn leaves(&self) -> impl Iterator<Item = &Volume<P>> + '_ {
        self.graph
            .node_indices()
            .filter(move |&i| self.graph.neighbors(i).next().is_none())
            .map(move |i| &self.graph[i])
    }

    /// Renders the graph in Graphviz DOT format.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.graph))
    }
}

/// Adds `volume` and every distinct subvolume below it, returning the
/// index of `volume`. Structurally equal subvolumes map to one node.
fn insert<P>(
    graph: &mut DiGraph<Volume<P>, Operand>,
    index: &mut HashMap<Volume<P>, NodeIndex>,
    volume: &Volume<P>,
) -> NodeIndex {
    if let Some(&existing) = index.get(volume) {
        return existing;
    }
    let root = graph.add_node(volume.clone());
    index.insert(volume.clone(), root);

    let mut pending = Vec::new();
    push_children(&mut pending, volume, root);
    while let Some((child, parent, operand)) = pending.pop() {
        let node = match index.get(child) {
            Some(&existing) => existing,
            None => {
                let node = graph.add_node(child.clone());
                index.insert(child.clone(), node);
                push_children(&mut pending, child, node);
                node
            }
        };
        graph.add_edge(parent, node, operand);
    }
    root
}

/// Queues the operands of `volume` so that the left one is taken first.
fn push_children<'a, P>(
    pending: &mut Vec<(&'a Volume<P>, NodeIndex, Operand)>,
    volume: &'a Volume<P>,
    node: NodeIndex,
) {
    if let Some(inner) = volume.negated() {
        pending.push((inner, node, Operand::Inner));
    } else if let Some((left, right)) = volume.operands() {
        pending.push((right, node, Operand::Right));
        pending.push((left, node, Operand::Left));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::Identity;

    #[test]
    fn shared_leaves_merge() {
        let cv = Identity::new("Id").shared();
        let a = Volume::interval(cv.clone(), 0.0, 1.0).unwrap();
        let b = Volume::interval(cv.clone(), 2.0, 3.0).unwrap();
        // structurally equal copy of `a`
        let a2 = Volume::interval(cv, 0.0, 1.0).unwrap();
        let v = (&a & &b) | (&a2 ^ &b);

        assert_eq!(v.node_count(), 7);
        let g = VolumeGraph::from_volume(&v);
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 6);
        assert_eq!(g.leaves().count(), 2);

        let a_index = g
            .graph()
            .node_indices()
            .find(|&i| g.volume(i) == Some(&a))
            .unwrap();
        assert_eq!(g.in_degree(a_index), 2);
        assert_eq!(g.in_degree(g.root()), 0);
        assert_eq!(g.volume(g.root()), Some(&v));
    }

    #[test]
    fn single_leaf_graph() {
        let g = VolumeGraph::from_volume(&Volume::<f64>::full());
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.leaves().count(), 1);
    }

    #[test]
    fn dot_output_labels_nodes_and_edges() {
        let cv = Identity::new("Id").shared();
        let a = Volume::interval(cv, 0.0, 1.0).unwrap();
        let dot = VolumeGraph::from_volume(&!&a).to_dot();
        assert!(dot.contains("digraph"));
        assert!(dot.contains("inner"));
        assert!(dot.contains("not"));
    }

    #[test]
    fn long_chains_export_every_link() {
        let cv = Identity::new("Id").shared();
        let mut v = Volume::interval(cv.clone(), 0.0, 0.5).unwrap();
        for i in 1..20_000 {
            let lo = i as f64;
            v = &v | &Volume::interval(cv.clone(), lo, lo + 0.5).unwrap();
        }
        let g = VolumeGraph::from_volume(&v);
        assert_eq!(g.node_count(), 39_999);
        assert_eq!(g.edge_count(), 39_998);
        assert_eq!(g.leaves().count(), 20_000);
        assert_eq!(g.in_degree(g.root()), 0);
    }

    #[test]
    fn clone_and_debug_without_point_bounds() {
        // neither Debug nor Clone
        struct Frame {
            x: f64,
        }

        let x = crate::cv::CvFunction::new("x", |p: &Frame| p.x).shared();
        let a = Volume::interval(x.clone(), 0.0, 1.0).unwrap();
        let b = Volume::interval(x, 2.0, 3.0).unwrap();
        let g = VolumeGraph::from_volume(&(&a | &b));
        let copy = g.clone();

        assert_eq!(copy.node_count(), 3);
        assert_eq!(copy.root(), g.root());
        assert!(copy.volume(copy.root()).unwrap().evaluate(&Frame { x: 2.5 }));
        let text = format!("{:?}", copy);
        assert!(text.starts_with("VolumeGraph"));
        assert!(text.contains("root"));
    }
}
