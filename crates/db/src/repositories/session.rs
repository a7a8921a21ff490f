//! Session repository.

use crimereport_common::{AppResult, SESSION_KEY, SharedStore};
use serde_json::Value;

use crate::entities::Identity;

/// Persists the currently signed-in identity.
#[derive(Clone)]
pub struct SessionRepository {
    store: SharedStore,
}

impl SessionRepository {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Load the persisted identity, if one is stored.
    pub async fn load(&self) -> AppResult<Option<Identity>> {
        match self.store.read(SESSION_KEY).await? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    /// Persist an identity, replacing any previous one.
    pub async fn save(&self, identity: &Identity) -> AppResult<()> {
        self.store
            .write(SESSION_KEY, serde_json::to_value(identity)?)
            .await
    }

    /// Remove the persisted identity.
    pub async fn clear(&self) -> AppResult<()> {
        self.store.remove(SESSION_KEY).await
    }
}
