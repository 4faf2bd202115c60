//! Core error types for the Volusion client.

use thiserror::Error;

/// Core error type for configuration and model operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configured store address is not a valid URL.
    #[error("Invalid store URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
