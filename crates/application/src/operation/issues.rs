//! Issue listing query.

use std::sync::{Arc, PoisonError, RwLock};

use ghkit_domain::reply::issue_listing;
use ghkit_domain::{ApiBase, IssueQuery, OperationState};
use serde_json::Value;
use tokio::sync::watch;
use tracing::debug;

use super::controller::{AsyncOperation, SettlePolicy};
use crate::error::OperationError;
use crate::ports::ApiClient;

/// Issue listing bound to an [`IssueQuery`].
///
/// The listing is passed through as the raw JSON body. Rebinding to new
/// arguments fetches again; rebinding to the same arguments does nothing.
pub struct IssueList {
    base: ApiBase,
    client: Arc<dyn ApiClient>,
    query: RwLock<IssueQuery>,
    operation: AsyncOperation<Value>,
}

impl IssueList {
    /// Creates an idle listing. Nothing is fetched until [`fetch`](Self::fetch).
    #[must_use]
    pub fn new(base: ApiBase, query: IssueQuery, client: Arc<dyn ApiClient>) -> Self {
        Self {
            base,
            client,
            query: RwLock::new(query),
            operation: AsyncOperation::new("issues"),
        }
    }

    /// Sets how overlapping invocations settle.
    #[must_use]
    pub fn with_policy(mut self, policy: SettlePolicy) -> Self {
        self.operation = self.operation.with_policy(policy);
        self
    }

    /// Arguments currently bound.
    #[must_use]
    pub fn query(&self) -> IssueQuery {
        self.query
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetches the listing for the bound arguments.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Domain` if the request URL cannot be built.
    pub async fn fetch(&self) -> Result<OperationState<Value>, OperationError> {
        let query = self.query();
        let request = self.base.list_issues(&query)?;
        debug!(module = %query.module, "fetching issues");

        let state = self
            .operation
            .run(async {
                match self.client.send(&request).await {
                    Ok(body) => issue_listing(body),
                    Err(e) => Err(e.to_string()),
                }
            })
            .await;
        Ok(state)
    }

    /// Re-issues the call for the bound arguments.
    ///
    /// # Errors
    ///
    /// See [`fetch`](Self::fetch).
    pub async fn refresh(&self) -> Result<OperationState<Value>, OperationError> {
        self.fetch().await
    }

    /// Binds new arguments. Fetches and returns the settled state when they
    /// differ from the current ones, otherwise returns `None`.
    ///
    /// # Errors
    ///
    /// See [`fetch`](Self::fetch).
    pub async fn rebind(
        &self,
        query: IssueQuery,
    ) -> Result<Option<OperationState<Value>>, OperationError> {
        {
            let mut bound = self.query.write().unwrap_or_else(PoisonError::into_inner);
            if *bound == query {
                return Ok(None);
            }
            *bound = query;
        }
        self.fetch().await.map(Some)
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> OperationState<Value> {
        self.operation.state()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<OperationState<Value>> {
        self.operation.subscribe()
    }
}
