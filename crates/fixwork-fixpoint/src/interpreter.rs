use std::convert::Infallible;

use crate::Graph;

/// Transfer functions and initial-state policy of one dataflow analysis over
/// graphs of type `G`.
///
/// The engine drives the analysis; the interpreter only describes it. For the
/// iteration to terminate, `combine_states` must be monotone and the states
/// reachable from the initial ones must not form an infinite ascending chain.
/// Neither property is checked.
///
/// Implementors are usually bound to one graph (holding `&G`) so that the
/// transformers can inspect edge endpoints or node payloads.
pub trait AbstractInterpreter<G: Graph + ?Sized> {
    type State;

    /// Nodes iteration starts from. An empty set yields an empty result.
    fn entry_nodes(&self) -> impl IntoIterator<Item = G::Node>;

    /// State of `node` before anything has flowed into it.
    fn initial_state(&self, node: &G::Node) -> Self::State;

    fn apply_node_transformer(&self, node: &G::Node, state: &Self::State) -> Self::State;

    fn apply_edge_transformer(&self, edge: &G::Edge, state: &Self::State) -> Self::State;

    fn are_states_equal(&self, lhs: &Self::State, rhs: &Self::State) -> bool;

    /// Merge a state arriving along an edge into the state already stored for
    /// its target. The engine always calls this as `combine_states(incoming,
    /// existing)`.
    fn combine_states(&self, incoming: &Self::State, existing: &Self::State) -> Self::State;
}

/// An [`AbstractInterpreter`] whose transformers may fail.
///
/// The first error aborts the fixpoint computation and is handed back to the
/// caller unchanged by
/// [`WorklistFixpointIterator::try_compute_fixpoint`](crate::WorklistFixpointIterator::try_compute_fixpoint).
///
/// Every [`AbstractInterpreter`] is a `TryAbstractInterpreter` with
/// `Error = Infallible`.
pub trait TryAbstractInterpreter<G: Graph + ?Sized> {
    type State;
    type Error;

    fn entry_nodes(&self) -> impl IntoIterator<Item = G::Node>;

    fn initial_state(&self, node: &G::Node) -> Self::State;

    fn apply_node_transformer(
        &self,
        node: &G::Node,
        state: &Self::State,
    ) -> Result<Self::State, Self::Error>;

    fn apply_edge_transformer(
        &self,
        edge: &G::Edge,
        state: &Self::State,
    ) -> Result<Self::State, Self::Error>;

    fn are_states_equal(&self, lhs: &Self::State, rhs: &Self::State) -> bool;

    fn combine_states(
        &self,
        incoming: &Self::State,
        existing: &Self::State,
    ) -> Result<Self::State, Self::Error>;
}

impl<G, I> TryAbstractInterpreter<G> for I
where
    G: Graph + ?Sized,
    I: AbstractInterpreter<G>,
{
    type State = I::State;
    type Error = Infallible;

    fn entry_nodes(&self) -> impl IntoIterator<Item = G::Node> {
        <I as AbstractInterpreter<G>>::entry_nodes(self)
    }

    fn initial_state(&self, node: &G::Node) -> Self::State {
        <I as AbstractInterpreter<G>>::initial_state(self, node)
    }

    fn apply_node_transformer(
        &self,
        node: &G::Node,
        state: &Self::State,
    ) -> Result<Self::State, Infallible> {
        Ok(<I as AbstractInterpreter<G>>::apply_node_transformer(self, node, state))
    }

    fn apply_edge_transformer(
        &self,
        edge: &G::Edge,
        state: &Self::State,
    ) -> Result<Self::State, Infallible> {
        Ok(<I as AbstractInterpreter<G>>::apply_edge_transformer(self, edge, state))
    }

    fn are_states_equal(&self, lhs: &Self::State, rhs: &Self::State) -> bool {
        <I as AbstractInterpreter<G>>::are_states_equal(self, lhs, rhs)
    }

    fn combine_states(
        &self,
        incoming: &Self::State,
        existing: &Self::State,
    ) -> Result<Self::State, Infallible> {
        Ok(<I as AbstractInterpreter<G>>::combine_states(self, incoming, existing))
    }
}
