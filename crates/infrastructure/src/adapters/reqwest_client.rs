//! API client implementation using reqwest.
//!
//! This adapter implements the `ApiClient` port using the reqwest library.
//! Bodies are always decoded as JSON, whatever the status code.

use async_trait::async_trait;
use ghkit_application::ports::{ApiClient, TransportError};
use ghkit_domain::{ApiRequest, HttpMethod};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::debug;

/// API client implementation using reqwest.
///
/// No request timeout is configured: a call that never answers keeps its
/// controller loading.
#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    client: Client,
}

impl ReqwestApiClient {
    /// Creates a new client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "ghkit/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("ghkit/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error) -> TransportError {
        if error.is_connect() || error.is_request() || error.is_redirect() {
            return TransportError::Connection(error.to_string());
        }
        if error.is_decode() || error.is_body() {
            return TransportError::Decode(error.to_string());
        }
        TransportError::Other(error.to_string())
    }
}

#[async_trait]
impl ApiClient for ReqwestApiClient {
    async fn send(&self, request: &ApiRequest) -> Result<Value, TransportError> {
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url.clone());
        if let Some(authorization) = request.authorization() {
            builder = builder.header(AUTHORIZATION, authorization);
        }

        debug!(method = %request.method, url = %request.url, "sending request");
        let response = builder.send().await.map_err(|e| Self::map_error(&e))?;
        let status = response.status();

        let body = response.bytes().await.map_err(|e| Self::map_error(&e))?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        serde_json::from_slice(&body)
            .map_err(|e| TransportError::Decode(format!("invalid JSON response: {e}")))
    }
}
