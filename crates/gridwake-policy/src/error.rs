//! Policy error types.

use thiserror::Error;

/// Errors that can occur while constructing a retention policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The configured label name does not resolve in the label registry.
    #[error("unknown label: {0}")]
    UnknownLabel(String),
}

pub type PolicyResult<T> = Result<T, PolicyError>;
