//! Authentication controller.
//!
//! Drives the OAuth callback: restores a stored token, or exchanges the
//! authorization code from the callback URL for one. State is published on
//! a `watch` channel so any number of observers can follow it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use ghkit_domain::reply::token_grant;
use ghkit_domain::{ApiBase, AuthEvent, AuthState, CallbackParams, RedirectState, Token};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::AuthError;
use crate::ports::{ApiClient, Location, TokenStore, TokenStoreError};

/// Owns the authentication state of one host session.
pub struct Authenticator {
    base: ApiBase,
    client: Arc<dyn ApiClient>,
    store: Arc<dyn TokenStore>,
    state: watch::Sender<AuthState>,
    redirect: OnceLock<Option<RedirectState>>,
    started: AtomicBool,
}

impl Authenticator {
    /// Creates a controller in the `Unauthenticated` phase.
    #[must_use]
    pub fn new(base: ApiBase, client: Arc<dyn ApiClient>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            base,
            client,
            store,
            state: watch::Sender::new(AuthState::default()),
            redirect: OnceLock::new(),
            started: AtomicBool::new(false),
        }
    }

    /// Resolves the session from the stored token or the callback URL.
    ///
    /// Only the first call does any work; later calls return the current
    /// snapshot. Exchange failures are reported through the returned state,
    /// not as `Err`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::RedirectState` when the callback `state` cannot be
    /// decoded (the message is also recorded on the state), and
    /// `AuthError::Store` when the token store fails.
    pub async fn start(&self, location: &dyn Location) -> Result<AuthState, AuthError> {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("authenticator already started");
            return Ok(self.state());
        }

        let params = match CallbackParams::parse(location.query()) {
            Ok(params) => params,
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "rejecting callback state");
                self.apply(AuthEvent::RedirectStateRejected(message.clone()));
                return Err(AuthError::RedirectState(message));
            }
        };
        // Cannot fail: the `started` guard admits a single caller.
        self.redirect.set(params.state).ok();

        if let Some(token) = self.store.get()? {
            info!(token = %token.preview(), "restored stored token");
            self.apply(AuthEvent::TokenRestored(token));
            return Ok(self.state());
        }

        let Some(code) = params.code else {
            debug!("no stored token and no authorization code");
            self.apply(AuthEvent::NoCode);
            return Ok(self.state());
        };

        let request = self.base.code_exchange(&code)?;
        self.apply(AuthEvent::ExchangeStarted);
        info!(url = %request.url, "exchanging authorization code");

        let outcome = match self.client.send(&request).await {
            Ok(body) => token_grant(&body),
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok(token) => {
                if let Err(e) = self.store.set(&token) {
                    return Err(self.store_failed(e));
                }
                info!(token = %token.preview(), "authorization code exchanged");
                self.apply(AuthEvent::ExchangeSucceeded(token));
            }
            Err(message) => {
                warn!(error = %message, "authorization code exchange failed");
                if let Err(e) = self.store.clear() {
                    return Err(self.store_failed(e));
                }
                self.apply(AuthEvent::ExchangeFailed(message));
            }
        }

        Ok(self.state())
    }

    /// Forgets the token locally. Loading and error are left untouched and
    /// no request is made.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the store cannot be cleared; the state
    /// is not changed in that case.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.store.clear()?;
        self.apply(AuthEvent::SignedOut);
        info!("signed out");
        Ok(())
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Token held by the controller.
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.state.borrow().token().cloned()
    }

    /// True when a token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Path the user was on before logging in, as echoed by the provider.
    #[must_use]
    pub fn redirect_path(&self) -> Option<String> {
        self.redirect
            .get()
            .and_then(Option::as_ref)
            .map(|state| state.prev_path.clone())
    }

    /// Settles an outstanding exchange as failed when the store cannot
    /// record its outcome.
    fn store_failed(&self, error: TokenStoreError) -> AuthError {
        let message = error.to_string();
        warn!(error = %message, "token store failed after code exchange");
        self.apply(AuthEvent::ExchangeFailed(message));
        AuthError::Store(error)
    }

    fn apply(&self, event: AuthEvent) {
        self.state
            .send_modify(|state| *state = std::mem::take(state).transition(event));
    }
}
