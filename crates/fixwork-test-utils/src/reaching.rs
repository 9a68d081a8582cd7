use fixwork_fixpoint::{AbstractInterpreter, DataflowSemantics, Graph, SourcedGraph};
use fixwork_lattice::{Lattice, PowerSet};

use crate::{IntEdge, IntGraph, Module, OperationId, ValueId};

/// Collects every node and edge that can reach a node.
///
/// Nodes are recorded by id, edges as `source * 1000 + target`. A node starts
/// out knowing only itself; the node transformer adds the node, the edge
/// transformer adds the edge, and states merge by union.
#[derive(Clone, Debug)]
pub struct ReachingNodesAndEdges<'g> {
    graph: &'g IntGraph,
    entries: Vec<i64>,
}

impl<'g> ReachingNodesAndEdges<'g> {
    pub fn new(graph: &'g IntGraph, entries: impl IntoIterator<Item = i64>) -> Self {
        Self {
            graph,
            entries: entries.into_iter().collect(),
        }
    }

    /// Encoding of an edge inside a state.
    pub fn edge_marker(source: i64, target: i64) -> i64 {
        source * 1000 + target
    }
}

impl AbstractInterpreter<IntGraph> for ReachingNodesAndEdges<'_> {
    type State = PowerSet<i64>;

    fn entry_nodes(&self) -> impl IntoIterator<Item = i64> {
        self.entries.iter().copied()
    }

    fn initial_state(&self, node: &i64) -> PowerSet<i64> {
        PowerSet::singleton(*node)
    }

    fn apply_node_transformer(&self, node: &i64, state: &PowerSet<i64>) -> PowerSet<i64> {
        state.with(*node)
    }

    fn apply_edge_transformer(&self, edge: &IntEdge, state: &PowerSet<i64>) -> PowerSet<i64> {
        let marker = Self::edge_marker(self.graph.edge_source(edge), self.graph.edge_target(edge));
        state.with(marker)
    }

    fn are_states_equal(&self, lhs: &PowerSet<i64>, rhs: &PowerSet<i64>) -> bool {
        lhs == rhs
    }

    fn combine_states(&self, incoming: &PowerSet<i64>, existing: &PowerSet<i64>) -> PowerSet<i64> {
        incoming.join(existing)
    }
}

/// Tracks, for every value of a [`Module`], the names of the values it was
/// computed from.
///
/// A free value starts as `{"Initial_<name>"}`. An operation's results all
/// receive the union of its operand states plus the operand names.
#[derive(Clone, Copy, Debug)]
pub struct ReachingOperations<'m> {
    module: &'m Module,
}

impl<'m> ReachingOperations<'m> {
    pub fn new(module: &'m Module) -> Self {
        Self { module }
    }
}

impl DataflowSemantics<Module> for ReachingOperations<'_> {
    type State = PowerSet<String>;

    fn initial_state(&self, value: &ValueId) -> PowerSet<String> {
        PowerSet::singleton(format!("Initial_{}", self.module.value_name(*value)))
    }

    fn apply_operation_transformer(
        &self,
        operation: &OperationId,
        inputs: &[PowerSet<String>],
    ) -> Vec<PowerSet<String>> {
        let mut reached = inputs
            .iter()
            .fold(PowerSet::new(), |so_far, input| so_far.join(input));
        reached.extend(
            self.module
                .operands(*operation)
                .iter()
                .map(|&input| self.module.value_name(input).to_owned()),
        );
        vec![reached; self.module.results_of(*operation).len()]
    }
}
