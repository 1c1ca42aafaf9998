//! OAuth redirect round-trip payloads.
//!
//! The provider echoes the `state` parameter back unchanged, which is how
//! the pre-login path survives the redirect. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::{DomainError, DomainResult};

/// Payload carried through the OAuth `state` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectState {
    /// Path the user was on before being sent to the provider.
    #[serde(rename = "prevPath")]
    pub prev_path: String,
}

impl RedirectState {
    /// Creates a redirect state for the given path.
    #[must_use]
    pub fn new(prev_path: impl Into<String>) -> Self {
        Self {
            prev_path: prev_path.into(),
        }
    }

    /// Encodes the state as the JSON text sent to the provider.
    #[must_use]
    pub fn encode(&self) -> String {
        serde_json::json!({ "prevPath": self.prev_path }).to_string()
    }

    /// Decodes the JSON text echoed back by the provider.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRedirectState` if the text is not JSON
    /// or lacks `prevPath`.
    pub fn decode(raw: &str) -> DomainResult<Self> {
        serde_json::from_str(raw).map_err(|e| DomainError::InvalidRedirectState(e.to_string()))
    }
}

/// Parameters the provider appends to the callback URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    /// Authorization code to exchange, if present.
    pub code: Option<String>,
    /// Decoded redirect state, if present.
    pub state: Option<RedirectState>,
}

impl CallbackParams {
    /// Parses a query string (with or without the leading `?`).
    ///
    /// Empty `code`/`state` values count as absent. The first occurrence of
    /// each key wins.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRedirectState` when `state` is present
    /// but cannot be decoded.
    pub fn parse(query: &str) -> DomainResult<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut code = None;
        let mut raw_state = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "code" if code.is_none() && !value.is_empty() => code = Some(value.into_owned()),
                "state" if raw_state.is_none() && !value.is_empty() => {
                    raw_state = Some(value.into_owned());
                }
                _ => {}
            }
        }

        let state = raw_state.as_deref().map(RedirectState::decode).transpose()?;
        Ok(Self { code, state })
    }

    /// Returns the path to navigate to after login, if the provider echoed one.
    #[must_use]
    pub fn redirect_path(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.prev_path.as_str())
    }
}
