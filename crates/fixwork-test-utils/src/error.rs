/// Errors raised while building an [`IntGraph`](crate::IntGraph).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An edge points at a node that was never declared.
    #[error("edge {from} -> {to} targets an undeclared node")]
    UnknownTarget { from: i64, to: i64 },
    /// The same node was declared twice.
    #[error("node {0} declared more than once")]
    DuplicateNode(i64),
}

/// Errors raised while building a [`Module`](crate::Module).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleError {
    /// A value name is defined by two results, or by a result and a free value.
    #[error("value '{0}' is defined more than once")]
    DuplicateValue(String),
    /// An operand names a value nothing defines.
    #[error("operation '{operation}' reads undefined value '{value}'")]
    UnknownValue { operation: String, value: String },
}
