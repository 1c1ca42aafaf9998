//! API client port
//!
//! Sends one backend request and hands back the decoded JSON body. HTTP
//! status codes are not inspected: the backend reports failures through an
//! `error` field in the body.

use async_trait::async_trait;
use ghkit_domain::ApiRequest;
use serde_json::Value;

/// Errors raised before a JSON body is available.
///
/// The display text is what ends up in the `error` field of the calling
/// controller's state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the connection failed.
    #[error("{0}")]
    Connection(String),

    /// The response body was not valid JSON.
    #[error("{0}")]
    Decode(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for talking to the backend.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Sends a request and decodes the response body as JSON.
    ///
    /// # Arguments
    /// * `request` - Method, URL and optional bearer credential
    ///
    /// # Errors
    /// Returns `TransportError` if the request fails or the body is not JSON.
    async fn send(&self, request: &ApiRequest) -> Result<Value, TransportError>;
}
