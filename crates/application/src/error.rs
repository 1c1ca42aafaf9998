//! Application error types

use ghkit_domain::DomainError;
use thiserror::Error;

use crate::ports::TokenStoreError;

/// Errors returned by [`Authenticator`](crate::Authenticator) operations.
///
/// Network and backend failures are not errors at this level: they settle
/// into the observable [`AuthState`](ghkit_domain::AuthState).
#[derive(Debug, Error)]
pub enum AuthError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The token store failed to read, write or clear the credential.
    #[error("token store error: {0}")]
    Store(#[from] TokenStoreError),

    /// The `state` parameter on the callback URL could not be decoded.
    #[error("invalid redirect state: {0}")]
    RedirectState(String),
}

/// Errors returned by operation controllers.
#[derive(Debug, Error)]
pub enum OperationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The token store could not be read.
    #[error("token store error: {0}")]
    Store(#[from] TokenStoreError),
}
