use std::sync::{Arc, RwLock};

/// Single in-memory slot for the current bearer token.
///
/// Never persisted: the refresh cookie is the durable credential.
#[derive(Debug, Default)]
pub struct TokenStore {
    slot: RwLock<Option<String>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current token; last write wins
    pub fn set(&self, token: Option<String>) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = token;
    }

    pub fn get(&self) -> Option<String> {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.set(None);
    }

    pub fn is_empty(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_none()
    }
}

// Shared handle passed to the session and the API client
pub type SharedTokenStore = Arc<TokenStore>;

pub fn create_token_store() -> SharedTokenStore {
    Arc::new(TokenStore::new())
}
