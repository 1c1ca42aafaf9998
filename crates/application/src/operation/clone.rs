//! Clone mutation: copies a module, or one of its issues, into a sprint.

use std::sync::Arc;

use ghkit_domain::reply::clone_message;
use ghkit_domain::{ApiBase, CloneTarget, OperationState};
use tokio::sync::watch;
use tracing::warn;

use super::controller::{AsyncOperation, SettlePolicy};
use crate::error::OperationError;
use crate::ports::{ApiClient, TokenStore};

/// Error message when a clone is attempted without a stored token.
pub const NOT_AUTHENTICATED: &str = "not authenticated";

/// Clone action bound to one [`CloneTarget`].
///
/// Success carries the backend's `message` text.
pub struct CloneMutation {
    base: ApiBase,
    target: CloneTarget,
    client: Arc<dyn ApiClient>,
    store: Arc<dyn TokenStore>,
    operation: AsyncOperation<String>,
}

impl CloneMutation {
    /// Creates an idle mutation for `target`.
    #[must_use]
    pub fn new(
        base: ApiBase,
        target: CloneTarget,
        client: Arc<dyn ApiClient>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            base,
            target,
            client,
            store,
            operation: AsyncOperation::new("clone"),
        }
    }

    /// Sets how overlapping invocations settle.
    #[must_use]
    pub fn with_policy(mut self, policy: SettlePolicy) -> Self {
        self.operation = self.operation.with_policy(policy);
        self
    }

    /// Target this mutation is bound to.
    #[must_use]
    pub const fn target(&self) -> &CloneTarget {
        &self.target
    }

    /// Performs the clone with the token currently in the store.
    ///
    /// Without a stored token the call settles as `Error("not authenticated")`
    /// and nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Store` if the store cannot be read.
    pub async fn invoke(&self) -> Result<OperationState<String>, OperationError> {
        let Some(token) = self.store.get()? else {
            warn!(module = %self.target.module, "clone attempted without a token");
            return Ok(self
                .operation
                .run(async { Err(NOT_AUTHENTICATED.to_string()) })
                .await);
        };

        let request = self.base.clone_target(&self.target, token)?;
        let state = self
            .operation
            .run(async {
                match self.client.send(&request).await {
                    Ok(body) => clone_message(&body),
                    Err(e) => Err(e.to_string()),
                }
            })
            .await;
        Ok(state)
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> OperationState<String> {
        self.operation.state()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<OperationState<String>> {
        self.operation.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ports::TransportError;
    use crate::testing::{MemoryStore, ScriptedClient};
    use ghkit_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn mutation(
        target: CloneTarget,
        client: Arc<ScriptedClient>,
        store: MemoryStore,
    ) -> CloneMutation {
        CloneMutation::new(
            ApiBase::parse("https://example.com/api").unwrap(),
            target,
            client,
            Arc::new(store),
        )
    }

    #[tokio::test]
    async fn test_clone_issue_into_sprint() {
        let client = Arc::new(ScriptedClient::new([Ok(
            json!({"message": "cloned", "id": 9}),
        )]));
        let target = CloneTarget::module("m").unwrap().with_issue(3).with_sprint("s1");
        let clone = mutation(target, client.clone(), MemoryStore::with_token("tok"));

        let state = clone.invoke().await.unwrap();

        assert_eq!(state, OperationState::Success("cloned".to_string()));
        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(
            requests[0].url.as_str(),
            "https://example.com/api/github/clone/m/3?sprint=s1"
        );
        assert_eq!(requests[0].authorization().as_deref(), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_backend_error_settles_as_error() {
        let client = Arc::new(ScriptedClient::new([Ok(json!({"error": "boom"}))]));
        let clone = mutation(
            CloneTarget::module("m").unwrap(),
            client,
            MemoryStore::with_token("tok"),
        );

        let state = clone.invoke().await.unwrap();

        assert_eq!(state.error(), Some("boom"));
        assert_eq!(clone.state(), state);
    }

    #[tokio::test]
    async fn test_transport_error_settles_as_error() {
        let client = Arc::new(ScriptedClient::new([Err(TransportError::Decode(
            "expected value at line 1 column 1".to_string(),
        ))]));
        let clone = mutation(
            CloneTarget::module("m").unwrap(),
            client,
            MemoryStore::with_token("tok"),
        );

        let state = clone.invoke().await.unwrap();

        assert_eq!(state.error(), Some("expected value at line 1 column 1"));
    }

    #[tokio::test]
    async fn test_without_token_no_request() {
        let client = Arc::new(ScriptedClient::default());
        let clone = mutation(
            CloneTarget::module("m").unwrap(),
            client.clone(),
            MemoryStore::default(),
        );

        let state = clone.invoke().await.unwrap();

        assert_eq!(state.error(), Some(NOT_AUTHENTICATED));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_token_read_at_invocation_time() {
        let client = Arc::new(ScriptedClient::new([
            Ok(json!({"message": "one"})),
            Ok(json!({"message": "two"})),
        ]));
        let store = Arc::new(MemoryStore::with_token("first"));
        let clone = CloneMutation::new(
            ApiBase::parse("https://example.com/api").unwrap(),
            CloneTarget::module("m").unwrap(),
            client.clone(),
            store.clone(),
        );

        clone.invoke().await.unwrap();
        store
            .set(&ghkit_domain::Token::new("second").unwrap())
            .unwrap();
        let state = clone.invoke().await.unwrap();

        assert_eq!(state.success().map(String::as_str), Some("two"));
        let auth: Vec<_> = client
            .requests()
            .iter()
            .filter_map(ghkit_domain::ApiRequest::authorization)
            .collect();
        assert_eq!(auth, ["Bearer first", "Bearer second"]);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let clone = mutation(
            CloneTarget::module("m").unwrap(),
            Arc::new(ScriptedClient::default()),
            MemoryStore::broken(),
        );

        assert!(matches!(
            clone.invoke().await,
            Err(OperationError::Store(_))
        ));
        assert!(clone.state().is_idle());
    }
}
