//! Generic worklist fixpoint iteration for dataflow analyses.
//!
//! An analysis is described by an [`AbstractInterpreter`](fixpoint::AbstractInterpreter)
//! over any type implementing [`Graph`](fixpoint::Graph), and solved with a
//! [`WorklistFixpointIterator`](fixpoint::WorklistFixpointIterator). SSA-shaped
//! programs can use the value-centric
//! [`DataflowFixpointIterator`](fixpoint::DataflowFixpointIterator) instead.
//! Reusable abstract domains live in [`lattice`].

pub use fixwork_fixpoint as fixpoint;
pub use fixwork_lattice as lattice;

pub mod prelude {
    pub use fixwork_fixpoint::{
        AbstractInterpreter, DataflowFixpointIterator, DataflowGraph, DataflowSemantics, Graph,
        NodeStateMap, SourcedGraph, ValueStateMap, WorklistFixpointIterator,
    };
    pub use fixwork_lattice::{Flat, HasBottom, HasTop, Lattice, PowerSet};
}
