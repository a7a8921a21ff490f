//! Local key-value store.
//!
//! The application keeps all of its state in a handful of JSON documents,
//! each stored under a single key. Two backends are provided: a directory of
//! JSON files for real use and an in-memory map for tests.
//!
//! The store performs no schema validation and no migration. Callers own the
//! shape of the documents they write.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::config::{StorageBackendKind, StorageConfig};
use crate::{AppError, AppResult};

/// Key holding the serialized current identity.
pub const SESSION_KEY: &str = "user";

/// Key holding the serialized report collection.
pub const REPORTS_KEY: &str = "crimeReports";

/// Key-value store trait.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the document stored under `key`, if any.
    async fn read(&self, key: &str) -> AppResult<Option<Value>>;

    /// Replace the document stored under `key`.
    async fn write(&self, key: &str, value: Value) -> AppResult<()>;

    /// Delete the document stored under `key`. Missing keys are not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// Shared handle to a store.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Build the store selected by the configuration.
pub async fn open_store(config: &StorageConfig) -> AppResult<SharedStore> {
    match config.backend {
        StorageBackendKind::File => {
            let store = JsonFileStore::open(config.data_dir.clone()).await?;
            Ok(Arc::new(store))
        }
        StorageBackendKind::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}

fn check_key(key: &str) -> AppResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(AppError::Storage(format!("Invalid store key: {key:?}")))
    }
}

/// Filesystem store: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base_path: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `base_path`, creating the directory if needed.
    pub async fn open(base_path: PathBuf) -> AppResult<Self> {
        tokio::fs::create_dir_all(&base_path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create directory: {e}")))?;
        tracing::debug!(path = %base_path.display(), "Opened JSON file store");
        Ok(Self { base_path })
    }

    /// Directory the store writes into.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for JsonFileStore {
    async fn read(&self, key: &str) -> AppResult<Option<Value>> {
        check_key(key)?;
        let path = self.path_for(key);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Storage(format!("Failed to read {key}: {e}")));
            }
        };

        let value = serde_json::from_slice(&bytes)?;
        Ok(Some(value))
    }

    async fn write(&self, key: &str, value: Value) -> AppResult<()> {
        check_key(key)?;
        let path = self.path_for(key);
        let tmp = self.base_path.join(format!("{key}.json.tmp"));

        let bytes = serde_json::to_vec(&value)?;

        // Write to a sibling file first so readers never see a torn document
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {key}: {e}")))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to replace {key}: {e}")))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        check_key(key)?;
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!("Failed to delete {key}: {e}"))),
        }
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with documents.
    #[must_use]
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            entries: RwLock::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn read(&self, key: &str) -> AppResult<Option<Value>> {
        check_key(key)?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: Value) -> AppResult<()> {
        check_key(key)?;
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        check_key(key)?;
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("crimereport-store-{}", ulid::Ulid::new()))
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.read(REPORTS_KEY).await.unwrap().is_none());

        store.write(REPORTS_KEY, json!([{"id": "CR000001"}])).await.unwrap();
        assert_eq!(
            store.read(REPORTS_KEY).await.unwrap(),
            Some(json!([{"id": "CR000001"}]))
        );

        store.remove(REPORTS_KEY).await.unwrap();
        assert!(store.read(REPORTS_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_remove_missing_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove(SESSION_KEY).await.is_ok());
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let store = MemoryStore::new();
        let err = store.read("../etc/passwd").await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let dir = scratch_dir();

        let store = JsonFileStore::open(dir.clone()).await.unwrap();
        store
            .write(SESSION_KEY, json!({"id": "1", "name": "alice"}))
            .await
            .unwrap();

        let reopened = JsonFileStore::open(dir.clone()).await.unwrap();
        assert_eq!(
            reopened.read(SESSION_KEY).await.unwrap(),
            Some(json!({"id": "1", "name": "alice"}))
        );
        assert!(dir.join("user.json").exists());
        assert!(!dir.join("user.json.tmp").exists());

        reopened.remove(SESSION_KEY).await.unwrap();
        assert!(reopened.read(SESSION_KEY).await.unwrap().is_none());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_reports_corrupt_documents() {
        let dir = scratch_dir();
        let store = JsonFileStore::open(dir.clone()).await.unwrap();
        tokio::fs::write(dir.join("crimeReports.json"), b"[{not json")
            .await
            .unwrap();

        let err = store.read(REPORTS_KEY).await.unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_open_store_memory_backend() {
        let config = StorageConfig {
            backend: StorageBackendKind::Memory,
            data_dir: scratch_dir(),
        };
        let store = open_store(&config).await.unwrap();
        store.write(SESSION_KEY, json!(null)).await.unwrap();
        assert_eq!(store.read(SESSION_KEY).await.unwrap(), Some(json!(null)));
        assert!(!config.data_dir.exists());
    }
}
