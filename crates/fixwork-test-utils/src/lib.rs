//! Shared fixtures and assertions for testing fixpoint engines and lattices.

mod check;
mod error;
mod int_graph;
pub mod lattice;
mod module;
mod reaching;

pub use check::{assert_is_fixpoint, reachable_nodes};
pub use error::{GraphError, ModuleError};
pub use int_graph::{IntEdge, IntGraph};
pub use module::{Module, ModuleBuilder, OperationId, ValueId};
pub use reaching::{ReachingNodesAndEdges, ReachingOperations};
