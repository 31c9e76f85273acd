//! Graph-subsystem error type.

use thiserror::Error;

use wp_core::CoreError;

/// Errors produced by `wp-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A section name was queried that the graph does not contain.
    #[error("unknown section {0:?}")]
    UnknownSection(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Shorthand result type for `wp-graph`.
pub type GraphResult<T> = Result<T, GraphError>;
