mod dataflow;
mod fixpoint;
mod graph;
mod interpreter;
#[cfg(any(feature = "petgraph", test))]
mod petgraph_adapter;
mod worklist;

pub use dataflow::{DataflowFixpointIterator, DataflowGraph, DataflowSemantics, ValueStateMap};
pub use fixpoint::{NodeStateMap, WorklistFixpointIterator};
pub use graph::{Graph, SourcedGraph};
pub use interpreter::{AbstractInterpreter, TryAbstractInterpreter};

pub use rustc_hash::FxHashMap;
