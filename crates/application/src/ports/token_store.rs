//! Token store port
//!
//! Durable single-slot storage for the bearer credential. The slot holds at
//! most one token and survives restarts of the host process.

use ghkit_domain::Token;

/// Errors that can occur during token store operations.
#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored value could not be read back as a token.
    #[error("stored token is invalid: {0}")]
    Invalid(String),

    /// The backing storage is unavailable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Single-slot credential storage.
///
/// Operations are synchronous so that sign-out can clear the slot without
/// awaiting.
pub trait TokenStore: Send + Sync {
    /// Reads the stored token, if any.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be read.
    fn get(&self) -> Result<Option<Token>, TokenStoreError>;

    /// Replaces the stored token.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be written.
    fn set(&self, token: &Token) -> Result<(), TokenStoreError>;

    /// Removes the stored token. Clearing an empty slot is not an error.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be written.
    fn clear(&self) -> Result<(), TokenStoreError>;
}
