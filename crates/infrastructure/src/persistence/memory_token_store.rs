//! In-memory token store.

use std::sync::RwLock;

use ghkit_application::ports::{TokenStore, TokenStoreError};
use ghkit_domain::Token;

/// Token store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<Token>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `token`.
    #[must_use]
    pub fn with_token(token: Token) -> Self {
        Self {
            slot: RwLock::new(Some(token)),
        }
    }
}

fn poisoned<T>(_: T) -> TokenStoreError {
    TokenStoreError::Unavailable("token lock poisoned".to_string())
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<Token>, TokenStoreError> {
        Ok(self.slot.read().map_err(poisoned)?.clone())
    }

    fn set(&self, token: &Token) -> Result<(), TokenStoreError> {
        *self.slot.write().map_err(poisoned)? = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.slot.write().map_err(poisoned)? = None;
        Ok(())
    }
}
