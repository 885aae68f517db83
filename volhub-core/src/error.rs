//! Error types for the Volhub ecosystem.

use thiserror::Error;

use crate::draft::ValidationError;

/// Errors that can occur in Volhub operations.
#[derive(Error, Debug)]
pub enum HubError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Update conflict: {0}")]
    Conflict(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Platform error: {0}")]
    Store(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for Volhub operations.
pub type HubResult<T> = Result<T, HubError>;
