//! Authentication state machine.
//!
//! `AuthState` is the snapshot a host binds its UI to. It only changes
//! through [`AuthState::transition`], which keeps `is_authenticated` in
//! step with the token.

use serde::Serialize;

use crate::token::Token;

/// Lifecycle phase of the authentication controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthPhase {
    /// No token and no exchange running.
    #[default]
    Unauthenticated,
    /// Exchanging an authorization code for a token.
    CheckingCode,
    /// A token is held.
    Authenticated,
    /// The last exchange (or callback decoding) failed.
    Failed,
}

impl AuthPhase {
    /// Check if the flow is in progress.
    #[must_use]
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::CheckingCode)
    }

    /// Get a user-friendly message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Unauthenticated => "Not signed in",
            Self::CheckingCode => "Exchanging authorization code...",
            Self::Authenticated => "Signed in",
            Self::Failed => "Sign-in failed",
        }
    }
}

/// Inputs to the authentication state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// A token was found in the store at start.
    TokenRestored(Token),
    /// No stored token and no authorization code in the callback.
    NoCode,
    /// The code exchange request was issued.
    ExchangeStarted,
    /// The code exchange returned a token.
    ExchangeSucceeded(Token),
    /// The code exchange failed at transport or application level.
    ExchangeFailed(String),
    /// The callback `state` parameter could not be decoded.
    RedirectStateRejected(String),
    /// The user signed out.
    SignedOut,
}

/// Observable authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct AuthState {
    phase: AuthPhase,
    token: Option<Token>,
    loading: bool,
    error: Option<String>,
    is_authenticated: bool,
}

impl AuthState {
    /// Applies an event and returns the next state.
    #[must_use]
    pub fn transition(self, event: AuthEvent) -> Self {
        match event {
            AuthEvent::TokenRestored(token) | AuthEvent::ExchangeSucceeded(token) => {
                Self::settled(AuthPhase::Authenticated, Some(token), None)
            }
            AuthEvent::NoCode => Self::settled(AuthPhase::Unauthenticated, None, self.error),
            AuthEvent::ExchangeStarted => Self {
                phase: AuthPhase::CheckingCode,
                token: None,
                loading: true,
                error: None,
                is_authenticated: false,
            },
            AuthEvent::ExchangeFailed(message) => {
                Self::settled(AuthPhase::Failed, None, Some(message))
            }
            AuthEvent::RedirectStateRejected(message) => Self {
                phase: AuthPhase::Failed,
                loading: false,
                error: Some(message),
                ..self
            },
            // Loading and error are left as they are.
            AuthEvent::SignedOut => Self {
                phase: AuthPhase::Unauthenticated,
                token: None,
                is_authenticated: false,
                ..self
            },
        }
    }

    fn settled(phase: AuthPhase, token: Option<Token>, error: Option<String>) -> Self {
        Self {
            phase,
            is_authenticated: token.is_some(),
            token,
            loading: false,
            error,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> AuthPhase {
        self.phase
    }

    /// Token held by the controller.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// True while the code exchange is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last error message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when a token is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }
}
