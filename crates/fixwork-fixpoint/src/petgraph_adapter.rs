use petgraph::Directed;
use petgraph::graph::{EdgeIndex, IndexType, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::{Graph, SourcedGraph};

/// Directed petgraph graphs are walked by index; node and edge weights stay
/// reachable through the graph for interpreters that hold a reference to it.
impl<N, E, Ix: IndexType> Graph for petgraph::Graph<N, E, Directed, Ix> {
    type Node = NodeIndex<Ix>;
    type Edge = EdgeIndex<Ix>;

    fn out_edges(&self, node: &NodeIndex<Ix>) -> impl Iterator<Item = EdgeIndex<Ix>> {
        self.edges(*node).map(|edge| edge.id())
    }

    fn edge_target(&self, edge: &EdgeIndex<Ix>) -> NodeIndex<Ix> {
        self.raw_edges()[edge.index()].target()
    }
}

impl<N, E, Ix: IndexType> SourcedGraph for petgraph::Graph<N, E, Directed, Ix> {
    fn edge_source(&self, edge: &EdgeIndex<Ix>) -> NodeIndex<Ix> {
        self.raw_edges()[edge.index()].source()
    }
}

#[cfg(test)]
mod tests {
    use petgraph::graph::DiGraph;

    use super::*;

    #[test]
    fn out_edges_resolve_to_endpoints() {
        let mut graph = DiGraph::<&str, ()>::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        graph.add_edge(a, b, ());
        graph.add_edge(a, c, ());
        graph.add_edge(c, a, ());

        let mut targets: Vec<_> = Graph::out_edges(&graph, &a)
            .map(|edge| graph.edge_target(&edge))
            .collect();
        targets.sort();
        assert_eq!(targets, vec![b, c]);

        let back = Graph::out_edges(&graph, &c).next().unwrap();
        assert_eq!(graph.edge_source(&back), c);
        assert_eq!(graph.edge_target(&back), a);
        assert_eq!(Graph::out_edges(&graph, &b).count(), 0);
    }
}
