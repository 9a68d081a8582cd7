use rustc_hash::FxHashMap;
use tracing::{debug, debug_span, trace};

use crate::worklist::Worklist;
use crate::{AbstractInterpreter, Graph, TryAbstractInterpreter};

/// Final abstract state of every node the iteration reached.
pub type NodeStateMap<N, S> = FxHashMap<N, S>;

/// Chaotic-iteration solver over an arbitrary [`Graph`].
///
/// Starting from the interpreter's entry nodes, the solver repeatedly takes a
/// pending node, runs the node transformer on its stored state, pushes the
/// result along every outgoing edge through the edge transformer, and merges
/// it into the target's stored state. A target is queued again whenever its
/// state changes (or on its first visit). Iteration stops when nothing is
/// pending.
///
/// The solver keeps nothing between calls. Termination is the interpreter's
/// responsibility: a monotone merge over a lattice of finite height always
/// converges, anything else may loop forever.
///
/// Only states that arrive through an edge are written back. The stored state
/// of an entry node with no incoming edges is therefore its initial state, not
/// the output of its node transformer.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorklistFixpointIterator;

impl WorklistFixpointIterator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the fixpoint of `interpreter` over `graph`.
    ///
    /// # Panics
    ///
    /// Panics if a pending node has no stored state. That cannot happen
    /// through this API and indicates a bug in the solver.
    pub fn compute_fixpoint<G, I>(
        &self,
        graph: &G,
        interpreter: &I,
    ) -> NodeStateMap<G::Node, I::State>
    where
        G: Graph + ?Sized,
        I: AbstractInterpreter<G>,
    {
        match self.try_compute_fixpoint(graph, interpreter) {
            Ok(node_states) => node_states,
            Err(never) => match never {},
        }
    }

    /// Build an interpreter for `graph` once, then compute its fixpoint.
    pub fn compute_fixpoint_with<'g, G, I>(
        &self,
        graph: &'g G,
        make_interpreter: impl FnOnce(&'g G) -> I,
    ) -> NodeStateMap<G::Node, I::State>
    where
        G: Graph + ?Sized,
        I: AbstractInterpreter<G>,
    {
        let interpreter = make_interpreter(graph);
        self.compute_fixpoint(graph, &interpreter)
    }

    /// Compute the fixpoint of a fallible interpreter.
    ///
    /// The first error returned by a transformer or by `combine_states` ends
    /// the computation and is returned as is; the states gathered so far are
    /// discarded.
    ///
    /// # Panics
    ///
    /// Same as [`compute_fixpoint`](Self::compute_fixpoint).
    pub fn try_compute_fixpoint<G, I>(
        &self,
        graph: &G,
        interpreter: &I,
    ) -> Result<NodeStateMap<G::Node, I::State>, I::Error>
    where
        G: Graph + ?Sized,
        I: TryAbstractInterpreter<G>,
    {
        let _span = debug_span!("worklist_fixpoint").entered();

        let mut node_states: NodeStateMap<G::Node, I::State> = FxHashMap::default();
        let mut worklist = Worklist::new();
        for entry in interpreter.entry_nodes() {
            node_states.insert(entry.clone(), interpreter.initial_state(&entry));
            worklist.insert(entry);
        }
        debug!(entries = worklist.len(), "seeded worklist");

        let mut visits = 0usize;
        let mut updates = 0usize;
        while let Some(node) = worklist.pop() {
            visits += 1;
            trace!(visits, pending = worklist.len(), "visiting node");

            let state_in = node_states
                .get(&node)
                .expect("node in worklist without a corresponding state");
            let state_out = interpreter.apply_node_transformer(&node, state_in)?;

            for edge in graph.out_edges(&node) {
                let edge_state = interpreter.apply_edge_transformer(&edge, &state_out)?;
                let target = graph.edge_target(&edge);

                let merged = match node_states.get(&target) {
                    Some(existing) => {
                        let merged = interpreter.combine_states(&edge_state, existing)?;
                        if interpreter.are_states_equal(&merged, existing) {
                            continue;
                        }
                        merged
                    }
                    // First visit: always recorded and queued.
                    None => {
                        let initial = interpreter.initial_state(&target);
                        interpreter.combine_states(&edge_state, &initial)?
                    }
                };

                updates += 1;
                node_states.insert(target.clone(), merged);
                worklist.insert(target);
            }
        }

        debug!(
            visits,
            updates,
            nodes = node_states.len(),
            "worklist fixpoint reached"
        );
        Ok(node_states)
    }
}
