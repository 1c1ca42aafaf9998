//! Wiring of controllers to the production adapters.
//!
//! A host creates one [`GithubContext`] per session, starts its
//! [`Authenticator`] on the callback location and creates operation
//! controllers as its views need them. All of them share the same API
//! client and token store.

use std::sync::Arc;

use ghkit_application::ports::{ApiClient, Location, TokenStore, TransportError};
use ghkit_application::{Authenticator, CloneMutation, IssueList, build_login_url};
use ghkit_domain::{CloneTarget, IssueQuery};
use thiserror::Error;
use tracing::info;

use crate::adapters::ReqwestApiClient;
use crate::config::{ClientConfig, ConfigError};
use crate::persistence::FileTokenStore;

/// Errors raised while assembling a context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(#[from] TransportError),
}

/// Session-wide entry point.
pub struct GithubContext {
    config: ClientConfig,
    client: Arc<dyn ApiClient>,
    store: Arc<dyn TokenStore>,
    authenticator: Authenticator,
}

impl GithubContext {
    /// Builds a context from `GHKIT_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing or the HTTP client
    /// cannot be created.
    pub fn from_env() -> Result<Self, ContextError> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Builds a context using reqwest and a file token store at
    /// `config.token_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: ClientConfig) -> Result<Self, ContextError> {
        let client = Arc::new(ReqwestApiClient::new()?);
        let store = Arc::new(FileTokenStore::new(config.token_path.clone()));
        info!(
            api_url = %config.api_url.as_url(),
            token_path = %config.token_path.display(),
            "ghkit context created"
        );
        Ok(Self::with_adapters(config, client, store))
    }

    /// Builds a context with caller-supplied adapters.
    #[must_use]
    pub fn with_adapters(
        config: ClientConfig,
        client: Arc<dyn ApiClient>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        let authenticator = Authenticator::new(
            config.api_url.clone(),
            Arc::clone(&client),
            Arc::clone(&store),
        );
        Self {
            config,
            client,
            store,
            authenticator,
        }
    }

    /// Loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The session's authentication controller.
    #[must_use]
    pub const fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Provider login URL that returns the user to `location` afterwards.
    #[must_use]
    pub fn login_url(&self, location: &dyn Location) -> String {
        build_login_url(location, &self.config.client_id, &self.config.scopes)
    }

    /// New clone action for `target`.
    #[must_use]
    pub fn clone_mutation(&self, target: CloneTarget) -> CloneMutation {
        CloneMutation::new(
            self.config.api_url.clone(),
            target,
            Arc::clone(&self.client),
            Arc::clone(&self.store),
        )
    }

    /// New issue listing bound to `query`. Call [`IssueList::fetch`] to load it.
    #[must_use]
    pub fn issue_list(&self, query: IssueQuery) -> IssueList {
        IssueList::new(self.config.api_url.clone(), query, Arc::clone(&self.client))
    }
}
