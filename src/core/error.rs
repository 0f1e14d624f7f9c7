//! Error types for dispatch operations.

use thiserror::Error;

/// Errors produced by dispatch components.
///
/// A busy agent pool is not an error: it is reported as
/// [`DispatchOutcome::AgentsBusy`](crate::core::DispatchOutcome::AgentsBusy).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Rejected input at registration or configuration time. Nothing was mutated.
    #[error("validation failed: {0}")]
    Validation(String),
    /// Internal bookkeeping went out of bounds. Indicates a bug in the caller
    /// or in the dispatcher itself.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    /// Configuration could not be parsed or loaded.
    #[error("config error: {0}")]
    Config(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
