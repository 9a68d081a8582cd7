//! Fixpoint iteration over SSA-style dataflow graphs.
//!
//! Here the graph is bipartite: values flow into operations, operations
//! produce result values. States live on values; operations are the unit of
//! work on the worklist.

use std::hash::Hash;

use fixwork_lattice::{HasBottom, Lattice};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, debug_span, trace};

use crate::worklist::Worklist;

/// Final abstract state of every value the iteration reached.
pub type ValueStateMap<V, S> = FxHashMap<V, S>;

/// A module viewed as a graph of values and the operations that read and
/// produce them.
pub trait DataflowGraph {
    type Value: Clone + Eq + Hash;
    type Operation: Clone + Eq + Hash;

    /// Every value in the module, each exactly once.
    fn values(&self) -> impl Iterator<Item = Self::Value>;

    fn operations(&self) -> impl Iterator<Item = Self::Operation>;

    /// The operation producing `value`, or `None` for free values such as
    /// block arguments and literal inputs.
    fn defining_operation(&self, value: &Self::Value) -> Option<Self::Operation>;

    /// Operand values of `operation`, in operand order.
    fn inputs(&self, operation: &Self::Operation) -> impl Iterator<Item = Self::Value>;

    /// `(result index, value)` pairs for the results of `operation`.
    fn results(&self, operation: &Self::Operation) -> impl Iterator<Item = (usize, Self::Value)>;

    fn result_count(&self, operation: &Self::Operation) -> usize;

    /// Operations reading `value`.
    fn uses(&self, value: &Self::Value) -> impl Iterator<Item = Self::Operation>;
}

/// Abstract semantics of the operations of a [`DataflowGraph`].
pub trait DataflowSemantics<G: DataflowGraph + ?Sized> {
    type State: HasBottom + Clone;

    /// State of a free value.
    fn initial_state(&self, value: &G::Value) -> Self::State;

    /// Map the states of the operands to one state per result.
    ///
    /// Operands that have not been reached yet are passed as bottom. The
    /// returned vector must have exactly [`DataflowGraph::result_count`]
    /// entries.
    fn apply_operation_transformer(
        &self,
        operation: &G::Operation,
        inputs: &[Self::State],
    ) -> Vec<Self::State>;
}

/// Least-fixpoint solver over a [`DataflowGraph`].
///
/// Free values are seeded with their initial state and their users queued,
/// together with every operation that has no operands. Popping an operation
/// runs its transformer and joins each output into the state of the
/// corresponding result; users of a result whose state changed are queued
/// again.
#[derive(Clone, Copy, Debug, Default)]
pub struct DataflowFixpointIterator;

impl DataflowFixpointIterator {
    pub fn new() -> Self {
        Self
    }

    /// # Panics
    ///
    /// Panics if `values()` reports a free value twice, or if a transformer
    /// returns a number of states different from the operation's result
    /// count.
    pub fn compute_fixpoint<G, S>(
        &self,
        graph: &G,
        semantics: &S,
    ) -> ValueStateMap<G::Value, S::State>
    where
        G: DataflowGraph + ?Sized,
        S: DataflowSemantics<G>,
    {
        let _span = debug_span!("dataflow_fixpoint").entered();

        let mut value_states: ValueStateMap<G::Value, S::State> = FxHashMap::default();
        let mut worklist = Worklist::new();

        for value in graph.values() {
            if graph.defining_operation(&value).is_some() {
                continue;
            }
            let previous = value_states.insert(value.clone(), semantics.initial_state(&value));
            assert!(
                previous.is_none(),
                "duplicate entry value during fixpoint iteration"
            );
            for user in graph.uses(&value) {
                worklist.insert(user);
            }
        }
        for operation in graph.operations() {
            if graph.inputs(&operation).next().is_none() {
                worklist.insert(operation);
            }
        }
        debug!(
            free_values = value_states.len(),
            seeded = worklist.len(),
            "seeded worklist"
        );

        let mut visits = 0usize;
        let mut updates = 0usize;
        while let Some(operation) = worklist.pop() {
            visits += 1;
            trace!(visits, pending = worklist.len(), "visiting operation");

            let inputs: SmallVec<[S::State; 4]> = graph
                .inputs(&operation)
                .map(|value| {
                    value_states
                        .get(&value)
                        .cloned()
                        .unwrap_or_else(S::State::bottom)
                })
                .collect();

            let outputs = semantics.apply_operation_transformer(&operation, &inputs);
            let expected = graph.result_count(&operation);
            assert_eq!(
                outputs.len(),
                expected,
                "transformer returned {} states for an operation with {} results",
                outputs.len(),
                expected
            );

            for (index, result) in graph.results(&operation) {
                let output = outputs
                    .get(index)
                    .expect("result index out of bounds for transformer outputs");

                let merged = match value_states.get(&result) {
                    Some(existing) => {
                        let merged = existing.join(output);
                        if merged.is_equivalent(existing) {
                            continue;
                        }
                        merged
                    }
                    None => S::State::bottom().join(output),
                };

                updates += 1;
                value_states.insert(result.clone(), merged);
                for user in graph.uses(&result) {
                    worklist.insert(user);
                }
            }
        }

        debug!(
            visits,
            updates,
            values = value_states.len(),
            "dataflow fixpoint reached"
        );
        value_states
    }

    /// Build the semantics for `graph` once, then compute its fixpoint.
    pub fn compute_fixpoint_with<'g, G, S>(
        &self,
        graph: &'g G,
        make_semantics: impl FnOnce(&'g G) -> S,
    ) -> ValueStateMap<G::Value, S::State>
    where
        G: DataflowGraph + ?Sized,
        S: DataflowSemantics<G>,
    {
        let semantics = make_semantics(graph);
        self.compute_fixpoint(graph, &semantics)
    }
}

#[cfg(test)]
mod tests {
    use fixwork_lattice::Flat;

    use super::*;

    /// `%0 = const 3`, `%1 = const 4`, `%2 = add %0 %1`, plus a free `%3`
    /// that feeds `%4 = add %3 %0`.
    struct Adds;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Op {
        Three,
        Four,
        Sum,
        FreeSum,
    }

    impl DataflowGraph for Adds {
        type Value = u32;
        type Operation = Op;

        fn values(&self) -> impl Iterator<Item = u32> {
            0..5
        }

        fn operations(&self) -> impl Iterator<Item = Op> {
            [Op::Three, Op::Four, Op::Sum, Op::FreeSum].into_iter()
        }

        fn defining_operation(&self, value: &u32) -> Option<Op> {
            match value {
                0 => Some(Op::Three),
                1 => Some(Op::Four),
                2 => Some(Op::Sum),
                4 => Some(Op::FreeSum),
                _ => None,
            }
        }

        fn inputs(&self, operation: &Op) -> impl Iterator<Item = u32> {
            let inputs: &[u32] = match operation {
                Op::Three | Op::Four => &[],
                Op::Sum => &[0, 1],
                Op::FreeSum => &[3, 0],
            };
            inputs.iter().copied()
        }

        fn results(&self, operation: &Op) -> impl Iterator<Item = (usize, u32)> {
            let value = match operation {
                Op::Three => 0,
                Op::Four => 1,
                Op::Sum => 2,
                Op::FreeSum => 4,
            };
            std::iter::once((0, value))
        }

        fn result_count(&self, _operation: &Op) -> usize {
            1
        }

        fn uses(&self, value: &u32) -> impl Iterator<Item = Op> {
            let users: &[Op] = match value {
                0 => &[Op::Sum, Op::FreeSum],
                1 => &[Op::Sum],
                3 => &[Op::FreeSum],
                _ => &[],
            };
            users.iter().copied()
        }
    }

    struct ConstantFolding;

    impl DataflowSemantics<Adds> for ConstantFolding {
        type State = Flat<i64>;

        fn initial_state(&self, _value: &u32) -> Flat<i64> {
            Flat::Top
        }

        fn apply_operation_transformer(
            &self,
            operation: &Op,
            inputs: &[Flat<i64>],
        ) -> Vec<Flat<i64>> {
            let out = match operation {
                Op::Three => Flat::Value(3),
                Op::Four => Flat::Value(4),
                Op::Sum | Op::FreeSum => match (&inputs[0], &inputs[1]) {
                    (Flat::Value(a), Flat::Value(b)) => Flat::Value(a + b),
                    (Flat::Bottom, _) | (_, Flat::Bottom) => Flat::Bottom,
                    _ => Flat::Top,
                },
            };
            vec![out]
        }
    }

    #[test]
    fn folds_constants_and_keeps_free_values_top() {
        let result = DataflowFixpointIterator.compute_fixpoint(&Adds, &ConstantFolding);
        assert_eq!(result[&0], Flat::Value(3));
        assert_eq!(result[&1], Flat::Value(4));
        assert_eq!(result[&2], Flat::Value(7));
        assert_eq!(result[&3], Flat::Top);
        assert_eq!(result[&4], Flat::Top);
    }

    struct WrongArity;

    impl DataflowSemantics<Adds> for WrongArity {
        type State = Flat<i64>;

        fn initial_state(&self, _value: &u32) -> Flat<i64> {
            Flat::Top
        }

        fn apply_operation_transformer(
            &self,
            _operation: &Op,
            _inputs: &[Flat<i64>],
        ) -> Vec<Flat<i64>> {
            Vec::new()
        }
    }

    #[test]
    #[should_panic(expected = "transformer returned 0 states")]
    fn output_count_mismatch_is_fatal() {
        DataflowFixpointIterator.compute_fixpoint(&Adds, &WrongArity);
    }
}
