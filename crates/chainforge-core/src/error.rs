//! The error type shared by every chainforge crate.

use thiserror::Error;

/// Errors raised by supplies, moves, selectors and their configuration.
#[derive(Debug, Error)]
pub enum SolverForgeError {
    /// Invalid selector configuration, detected when building selectors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A variable descriptor used where it does not fit, e.g. a genuine
    /// variable demanding a chained supply.
    #[error("Domain model error: {0}")]
    DomainModel(String),

    /// Missing supply or counterpart, e.g. when rebasing onto a clone.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Ruin undo, K-opt sizing and other operations that never succeed.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SolverForgeError {
    /// Returns true for [`SolverForgeError::UnsupportedOperation`].
    pub fn is_unsupported(&self) -> bool {
        matches!(self, SolverForgeError::UnsupportedOperation(_))
    }
}

pub type Result<T> = std::result::Result<T, SolverForgeError>;
