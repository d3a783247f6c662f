//! Driver error types.

use thiserror::Error;

/// Errors that can occur while assembling or running the driver.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("invalid policy configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("policy error: {0}")]
    Policy(#[from] gridwake_policy::PolicyError),
}

pub type DriverResult<T> = Result<T, DriverError>;
