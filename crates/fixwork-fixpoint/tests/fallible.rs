use std::cell::RefCell;

use fixwork_fixpoint::{Graph, SourcedGraph, TryAbstractInterpreter, WorklistFixpointIterator};
use fixwork_test_utils::{IntEdge, IntGraph};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
enum CountError {
    #[error("counter overflowed on edge {from} -> {to}")]
    Overflow { from: i64, to: i64 },
    #[error("node {0} is forbidden")]
    Forbidden(i64),
}

/// Counts path lengths with a ceiling that is reported as an error.
struct BoundedDistance<'g> {
    graph: &'g IntGraph,
    limit: u32,
    forbidden: Option<i64>,
    visits: RefCell<Vec<i64>>,
}

impl<'g> BoundedDistance<'g> {
    fn new(graph: &'g IntGraph, limit: u32) -> Self {
        Self {
            graph,
            limit,
            forbidden: None,
            visits: RefCell::new(Vec::new()),
        }
    }
}

impl TryAbstractInterpreter<IntGraph> for BoundedDistance<'_> {
    type State = u32;
    type Error = CountError;

    fn entry_nodes(&self) -> impl IntoIterator<Item = i64> {
        [1]
    }

    fn initial_state(&self, _node: &i64) -> u32 {
        0
    }

    fn apply_node_transformer(&self, node: &i64, state: &u32) -> Result<u32, CountError> {
        self.visits.borrow_mut().push(*node);
        if self.forbidden == Some(*node) {
            return Err(CountError::Forbidden(*node));
        }
        Ok(*state)
    }

    fn apply_edge_transformer(&self, edge: &IntEdge, state: &u32) -> Result<u32, CountError> {
        let next = state + 1;
        if next > self.limit {
            return Err(CountError::Overflow {
                from: self.graph.edge_source(edge),
                to: self.graph.edge_target(edge),
            });
        }
        Ok(next)
    }

    fn are_states_equal(&self, lhs: &u32, rhs: &u32) -> bool {
        lhs == rhs
    }

    fn combine_states(&self, incoming: &u32, existing: &u32) -> Result<u32, CountError> {
        Ok(*incoming.max(existing))
    }
}

#[test]
fn acyclic_graph_succeeds() {
    let graph = IntGraph::from_edges([(1, 2), (2, 3), (1, 3)]);
    let interpreter = BoundedDistance::new(&graph, 10);
    let result = WorklistFixpointIterator::new()
        .try_compute_fixpoint(&graph, &interpreter)
        .unwrap();
    assert_eq!(result[&1], 0);
    assert_eq!(result[&2], 1);
    assert_eq!(result[&3], 2);
}

#[test]
fn edge_error_is_returned_unchanged() {
    // The cycle keeps increasing the distance until the limit trips.
    let graph = IntGraph::from_edges([(1, 2), (2, 1)]);
    let interpreter = BoundedDistance::new(&graph, 3);
    let err = WorklistFixpointIterator::new()
        .try_compute_fixpoint(&graph, &interpreter)
        .unwrap_err();
    assert_eq!(err, CountError::Overflow { from: 2, to: 1 });
    assert_eq!(err.to_string(), "counter overflowed on edge 2 -> 1");
}

#[test]
fn node_error_stops_iteration() {
    let graph = IntGraph::from_edges([(1, 2), (2, 3)]);
    let mut interpreter = BoundedDistance::new(&graph, 10);
    interpreter.forbidden = Some(2);
    let err = WorklistFixpointIterator::new()
        .try_compute_fixpoint(&graph, &interpreter)
        .unwrap_err();
    assert_eq!(err, CountError::Forbidden(2));
    assert_eq!(*interpreter.visits.borrow(), vec![1, 2]);
}

#[test]
fn revisited_nodes_run_their_transformer_again() {
    let graph = IntGraph::from_edges([(1, 2), (2, 1)]);
    let interpreter = BoundedDistance::new(&graph, 4);
    let err = WorklistFixpointIterator::new()
        .try_compute_fixpoint(&graph, &interpreter)
        .unwrap_err();
    assert_eq!(err, CountError::Overflow { from: 1, to: 2 });
    assert_eq!(*interpreter.visits.borrow(), vec![1, 2, 1, 2, 1]);
}
