//! Error types for gw-compile

use gw_core::CoreError;
use gw_sql::SqlError;
use thiserror::Error;

/// Which kind of operator name was not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Transform,
    Aggregator,
}

impl std::fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatorKind::Transform => f.write_str("transform operator"),
            OperatorKind::Aggregator => f.write_str("aggregator"),
        }
    }
}

/// Compilation errors. Every error aborts the whole compilation.
#[derive(Error, Debug)]
pub enum CompileError {
    /// G001: Input does not match the workflow model
    #[error("[G001] Malformed input: {0}")]
    MalformedInput(String),

    /// G002: Sub-query dataset is not a single valid SELECT
    #[error("[G002] Unparsable sub-query: {0}")]
    UnparsableSubQuery(#[source] SqlError),

    /// G003: Unknown transform operator or aggregator
    #[error("[G003] Unsupported {kind}: '{name}'")]
    UnsupportedOperator { kind: OperatorKind, name: String },

    /// G004: `*` measure used with an aggregator other than count
    #[error("[G004] Field '*' can only be aggregated with count, got '{aggregator}'")]
    WildcardMeasure { aggregator: String },
}

impl CompileError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }
}

impl From<CoreError> for CompileError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MalformedInput { message } => Self::MalformedInput(message),
            other => Self::MalformedInput(other.to_string()),
        }
    }
}

/// Result type alias for CompileError
pub type CompileResult<T> = Result<T, CompileError>;
