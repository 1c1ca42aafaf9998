//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or cannot carry path segments.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A token value is empty.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// The OAuth `state` parameter is not valid JSON of the expected shape.
    #[error("invalid redirect state: {0}")]
    InvalidRedirectState(String),

    /// A clone target names no module.
    #[error("invalid clone target: {0}")]
    InvalidCloneTarget(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
