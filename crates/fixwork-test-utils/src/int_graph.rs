use fixwork_fixpoint::{Graph, SourcedGraph};
use rustc_hash::FxHashMap;

use crate::GraphError;

/// Edge of an [`IntGraph`]: `(source, target)`.
pub type IntEdge = (i64, i64);

/// A small directed graph over integer nodes, stored as adjacency lists.
///
/// Out-edges are reported in the order the targets were given, which lets
/// tests build the same graph with different edge orders.
#[derive(Clone, Debug, Default)]
pub struct IntGraph {
    adjacency: FxHashMap<i64, Vec<i64>>,
}

impl IntGraph {
    /// Build a graph from `(node, targets)` pairs. Every target must itself be
    /// declared as a node.
    pub fn new(
        adjacency: impl IntoIterator<Item = (i64, Vec<i64>)>,
    ) -> Result<Self, GraphError> {
        let mut graph = IntGraph::default();
        for (node, targets) in adjacency {
            if graph.adjacency.insert(node, targets).is_some() {
                return Err(GraphError::DuplicateNode(node));
            }
        }
        for (&from, targets) in &graph.adjacency {
            if let Some(&to) = targets.iter().find(|&&t| !graph.adjacency.contains_key(&t)) {
                return Err(GraphError::UnknownTarget { from, to });
            }
        }
        Ok(graph)
    }

    /// Build a graph from an edge list, declaring every endpoint as a node.
    pub fn from_edges(edges: impl IntoIterator<Item = IntEdge>) -> Self {
        let mut adjacency: FxHashMap<i64, Vec<i64>> = FxHashMap::default();
        for (from, to) in edges {
            adjacency.entry(from).or_default().push(to);
            adjacency.entry(to).or_default();
        }
        IntGraph { adjacency }
    }

    /// Add a node without edges. Returns `false` if it already existed.
    pub fn add_node(&mut self, node: i64) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, Vec::new());
        true
    }

    /// The same graph with every adjacency list reversed.
    pub fn with_reversed_edge_order(&self) -> Self {
        let mut adjacency = FxHashMap::default();
        for (&node, targets) in &self.adjacency {
            adjacency.insert(node, targets.iter().rev().copied().collect());
        }
        IntGraph { adjacency }
    }

    pub fn contains(&self, node: i64) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// All nodes in ascending order.
    pub fn nodes(&self) -> Vec<i64> {
        let mut nodes: Vec<i64> = self.adjacency.keys().copied().collect();
        nodes.sort_unstable();
        nodes
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}

impl Graph for IntGraph {
    type Node = i64;
    type Edge = IntEdge;

    /// # Panics
    ///
    /// Panics if `node` is not part of the graph.
    fn out_edges(&self, node: &i64) -> impl Iterator<Item = IntEdge> {
        let from = *node;
        let targets = self
            .adjacency
            .get(node)
            .unwrap_or_else(|| panic!("out_edges: node {from} is not in the graph"));
        targets.iter().map(move |&to| (from, to))
    }

    fn edge_target(&self, edge: &IntEdge) -> i64 {
        edge.1
    }
}

impl SourcedGraph for IntGraph {
    fn edge_source(&self, edge: &IntEdge) -> i64 {
        edge.0
    }
}
