//! Test doubles for the application ports.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use ghkit_domain::{ApiRequest, Token};
use serde_json::Value;
use tokio::sync::oneshot;

use crate::ports::{ApiClient, TokenStore, TokenStoreError, TransportError};

pub type Outcome = Result<Value, TransportError>;

/// Single-slot store kept in memory.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Token>>,
    broken: bool,
    read_only: bool,
}

impl MemoryStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Mutex::new(Some(Token::new(token).unwrap())),
            ..Self::default()
        }
    }

    /// A store whose every operation fails.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    /// A store that reads fine but rejects every write.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn peek(&self) -> Option<Token> {
        self.slot.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), TokenStoreError> {
        if self.broken {
            return Err(TokenStoreError::Unavailable("disk on fire".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), TokenStoreError> {
        self.check()?;
        if self.read_only {
            return Err(TokenStoreError::Unavailable("read-only storage".to_string()));
        }
        Ok(())
    }
}

impl TokenStore for MemoryStore {
    fn get(&self) -> Result<Option<Token>, TokenStoreError> {
        self.check()?;
        Ok(self.peek())
    }

    fn set(&self, token: &Token) -> Result<(), TokenStoreError> {
        self.check_write()?;
        *self.slot.lock().unwrap() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        self.check_write()?;
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

/// Replies with pre-recorded outcomes, in order.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedClient {
    pub fn new(replies: impl IntoIterator<Item = Outcome>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiClient for ScriptedClient {
    async fn send(&self, request: &ApiRequest) -> Outcome {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Err(TransportError::Other("no scripted reply".to_string())))
    }
}

/// Holds every call open until the test releases it.
///
/// Calls pick up gates in the order they reach the client.
#[derive(Default)]
pub struct GatedClient {
    gates: Mutex<VecDeque<oneshot::Receiver<Outcome>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl GatedClient {
    /// Queues a gate for the next call and returns its release handle.
    pub fn gate(&self) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Yields until `count` calls have reached the client.
    pub async fn wait_for_requests(&self, count: usize) {
        while self.request_count() < count {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl ApiClient for GatedClient {
    async fn send(&self, request: &ApiRequest) -> Outcome {
        self.requests.lock().unwrap().push(request.clone());
        let gate = self.gates.lock().unwrap().pop_front();
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Other("gate dropped".to_string()))),
            None => Err(TransportError::Other("no gate queued".to_string())),
        }
    }
}
