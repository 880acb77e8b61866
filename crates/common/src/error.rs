//! Error types for VPC Console

use thiserror::Error;

/// Result type alias using VPC Console Error
pub type Result<T> = std::result::Result<T, Error>;

/// VPC Console error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("user already exists: {0}")]
    DuplicateUser(String),

    #[error("cloud provider error: {0}")]
    Provider(String),
}

impl Error {
    /// Provider failure with a formatted message
    pub fn provider(msg: impl Into<String>) -> Self {
        Error::Provider(msg.into())
    }
}
