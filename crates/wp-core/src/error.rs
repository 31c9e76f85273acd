//! Core error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! into them via `#[from]` or wrap it as one variant.

use thiserror::Error;

/// Errors produced by `wp-core` primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A polyline length was requested for fewer than two points.
    #[error("polyline needs at least 2 points, got {0}")]
    DegenerateGeometry(usize),

    /// A section name did not match the `"<way>_<index>"` wire format.
    #[error("malformed section name: {0:?}")]
    MalformedSectionName(String),
}

/// Shorthand result type for `wp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
