//! Which blocks can flow into each block of a small control-flow graph.
//!
//! Run with `RUST_LOG=fixwork_fixpoint=debug` to see the solver's progress.

use fixwork::prelude::*;
use tracing_subscriber::EnvFilter;

/// Blocks named by letter, successors given per block.
struct Cfg {
    blocks: Vec<(char, Vec<usize>)>,
}

impl Graph for Cfg {
    type Node = usize;
    type Edge = (usize, usize);

    fn out_edges(&self, node: &usize) -> impl Iterator<Item = (usize, usize)> {
        let from = *node;
        self.blocks[from].1.iter().map(move |&to| (from, to))
    }

    fn edge_target(&self, edge: &(usize, usize)) -> usize {
        edge.1
    }
}

struct ReachingBlocks<'g> {
    cfg: &'g Cfg,
}

impl AbstractInterpreter<Cfg> for ReachingBlocks<'_> {
    type State = PowerSet<char>;

    fn entry_nodes(&self) -> impl IntoIterator<Item = usize> {
        [0]
    }

    fn initial_state(&self, _node: &usize) -> PowerSet<char> {
        PowerSet::bottom()
    }

    fn apply_node_transformer(&self, node: &usize, state: &PowerSet<char>) -> PowerSet<char> {
        state.with(self.cfg.blocks[*node].0)
    }

    fn apply_edge_transformer(
        &self,
        _edge: &(usize, usize),
        state: &PowerSet<char>,
    ) -> PowerSet<char> {
        state.clone()
    }

    fn are_states_equal(&self, lhs: &PowerSet<char>, rhs: &PowerSet<char>) -> bool {
        lhs == rhs
    }

    fn combine_states(
        &self,
        incoming: &PowerSet<char>,
        existing: &PowerSet<char>,
    ) -> PowerSet<char> {
        incoming.join(existing)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // a -> b -> c -> b, c -> d, e unreachable
    let cfg = Cfg {
        blocks: vec![
            ('a', vec![1]),
            ('b', vec![2]),
            ('c', vec![1, 3]),
            ('d', vec![]),
            ('e', vec![3]),
        ],
    };

    let result =
        WorklistFixpointIterator::new().compute_fixpoint_with(&cfg, |cfg| ReachingBlocks { cfg });

    for (index, (name, _)) in cfg.blocks.iter().enumerate() {
        match result.get(&index) {
            Some(reaching) => println!("{name}: reached from {reaching}"),
            None => println!("{name}: unreachable"),
        }
    }
}
