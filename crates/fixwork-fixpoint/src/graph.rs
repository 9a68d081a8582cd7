use std::hash::Hash;

/// A directed graph the worklist engine can walk.
///
/// Nodes are opaque identities: the engine only hashes and compares them, so
/// two node values must be equal exactly when they denote the same vertex.
/// Edges are opaque too and only need to resolve to a target.
pub trait Graph {
    type Node: Clone + Eq + Hash;
    type Edge;

    /// Outgoing edges of `node`. Order is not significant.
    fn out_edges(&self, node: &Self::Node) -> impl Iterator<Item = Self::Edge>;

    fn edge_target(&self, edge: &Self::Edge) -> Self::Node;
}

/// A [`Graph`] whose edges also know where they start.
///
/// The engine never asks for edge sources; interpreters often do, e.g. to
/// label facts with the edge they flowed along.
pub trait SourcedGraph: Graph {
    fn edge_source(&self, edge: &Self::Edge) -> Self::Node;
}

impl<G: Graph + ?Sized> Graph for &G {
    type Node = G::Node;
    type Edge = G::Edge;

    fn out_edges(&self, node: &Self::Node) -> impl Iterator<Item = Self::Edge> {
        (**self).out_edges(node)
    }

    fn edge_target(&self, edge: &Self::Edge) -> Self::Node {
        (**self).edge_target(edge)
    }
}

impl<G: SourcedGraph + ?Sized> SourcedGraph for &G {
    fn edge_source(&self, edge: &Self::Edge) -> Self::Node {
        (**self).edge_source(edge)
    }
}
