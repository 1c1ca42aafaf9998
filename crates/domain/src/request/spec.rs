//! Request specification type

use url::Url;

use super::HttpMethod;
use crate::token::Token;

/// A fully resolved call against the backend API.
///
/// Requests never carry a body; everything travels in the path, the
/// query string, and the optional bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL including the query string
    pub url: Url,
    /// Credential sent as `Authorization: Bearer <token>`
    pub bearer: Option<Token>,
}

impl ApiRequest {
    /// Creates a GET request for the given URL.
    #[must_use]
    pub const fn get(url: Url) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            bearer: None,
        }
    }

    /// Creates a POST request for the given URL.
    #[must_use]
    pub const fn post(url: Url) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            bearer: None,
        }
    }

    /// Attaches a bearer credential.
    #[must_use]
    pub fn with_bearer(mut self, token: Token) -> Self {
        self.bearer = Some(token);
        self
    }

    /// Returns the `Authorization` header value, if a credential is attached.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(Token::bearer_header)
    }
}
