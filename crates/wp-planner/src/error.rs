//! Planner-subsystem error type.

use thiserror::Error;

/// Errors produced by `wp-planner`.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The goal is unreachable from the start.  This is the committed
    /// no-path sentinel: a `plan` call either returns a non-empty route or
    /// this variant, never an empty path.
    #[error("no route from section {from} to section {to}")]
    NoRoute { from: String, to: String },
}

/// Shorthand result type for `wp-planner`.
pub type PlanResult<T> = Result<T, PlanError>;
