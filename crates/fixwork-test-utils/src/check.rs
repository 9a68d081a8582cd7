use std::fmt::{Debug, Write};

use fixwork_fixpoint::{AbstractInterpreter, Graph, NodeStateMap};
use rustc_hash::FxHashSet;

/// Nodes reachable from `entries` through zero or more edges.
pub fn reachable_nodes<G: Graph + ?Sized>(
    graph: &G,
    entries: impl IntoIterator<Item = G::Node>,
) -> FxHashSet<G::Node> {
    let mut seen = FxHashSet::default();
    let mut stack: Vec<G::Node> = entries.into_iter().collect();
    while let Some(node) = stack.pop() {
        if !seen.insert(node.clone()) {
            continue;
        }
        stack.extend(graph.out_edges(&node).map(|edge| graph.edge_target(&edge)));
    }
    seen
}

/// Check that `result` is a fixpoint of `interpreter` over `graph` and that it
/// covers every node reachable from the entry nodes.
///
/// For every node in `result`, the node transformer is re-run and its output
/// pushed along each out edge; merging into the target's stored state must
/// not change it. All violations are collected and reported in one panic.
pub fn assert_is_fixpoint<G, I>(
    graph: &G,
    interpreter: &I,
    result: &NodeStateMap<G::Node, I::State>,
) where
    G: Graph + ?Sized,
    G::Node: Debug,
    I: AbstractInterpreter<G>,
    I::State: Debug,
{
    let mut violations = Vec::new();

    let entries: Vec<G::Node> = interpreter.entry_nodes().into_iter().collect();
    for node in reachable_nodes(graph, entries) {
        if !result.contains_key(&node) {
            violations.push(format!("reachable node {node:?} has no state"));
        }
    }

    for (node, state) in result {
        let out = interpreter.apply_node_transformer(node, state);
        for edge in graph.out_edges(node) {
            let target = graph.edge_target(&edge);
            let Some(stored) = result.get(&target) else {
                violations.push(format!("edge {node:?} -> {target:?} leaves the result"));
                continue;
            };
            let pushed = interpreter.apply_edge_transformer(&edge, &out);
            let merged = interpreter.combine_states(&pushed, stored);
            if !interpreter.are_states_equal(&merged, stored) {
                violations.push(format!(
                    "not stable along {node:?} -> {target:?}: \
                     stored {stored:?}, re-merged {merged:?}"
                ));
            }
        }
    }

    if violations.is_empty() {
        return;
    }
    let mut msg = format!("{} fixpoint violation(s):\n", violations.len());
    for (i, violation) in violations.iter().enumerate() {
        let _ = writeln!(msg, "  {}. {}", i + 1, violation);
    }
    panic!("{msg}");
}
