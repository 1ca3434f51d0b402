//! Common error types for the order tracker

use thiserror::Error;

/// Error raised when a shared primitive cannot be built from its input
#[derive(Error, Debug)]
pub enum Error {
    /// Input could not be parsed into a domain value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using the common Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
