//! # Device Key-Value Storage
//!
//! The persistence contract the catalog store writes through.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    KeyValueStorage Contract                             │
//! │                                                                         │
//! │  get(key)    → Ok(Some(json)) | Ok(None)  (missing key is not an error)│
//! │  set(key, v) → Ok(())                                                  │
//! │  remove(key) → Ok(())                     (idempotent)                 │
//! │                                                                         │
//! │  Values are opaque strings; in practice they are serde_json output.    │
//! │  Both backends are best-effort: callers that persist fire-and-forget   │
//! │  log a failure and keep the in-memory state as authoritative.          │
//! │                                                                         │
//! │  Backends:                                                             │
//! │  • FileStorage   - one file per key under the app data directory       │
//! │  • MemoryStorage - HashMap, for tests and ephemeral runs               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};

// =============================================================================
// Storage Trait
// =============================================================================

/// Asynchronous string key-value storage.
///
/// ## Usage
/// ```rust,ignore
/// let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
/// storage.set("shop_products", "[]").await?;
/// assert_eq!(storage.get("shop_products").await?.as_deref(), Some("[]"));
/// ```
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Reads the value for `key`. A missing key is `Ok(None)`.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes `key` if present. Idempotent.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-memory storage backend for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys. Test helper.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("storage mutex poisoned").len()
    }

    /// Returns true when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().expect("storage mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().expect("storage mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().expect("storage mutex poisoned");
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// File-backed storage: one `<key>.json` file per key under the data dir.
///
/// ## Layout
/// ```text
/// ~/.local/share/dukaan/
/// └── shop_products.json    ← the serialized product array
/// ```
///
/// The directory is created lazily on the first write, never on read.
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    /// Creates a store rooted at the directory the config resolves.
    pub fn new(config: &StorageConfig) -> StorageResult<Self> {
        let data_dir = config.resolve_data_dir().ok_or_else(|| {
            StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no data directory available on this platform",
            ))
        })?;
        Ok(FileStorage { data_dir })
    }

    /// Creates a store rooted at an explicit directory.
    pub fn at(data_dir: impl Into<PathBuf>) -> Self {
        FileStorage {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(key = %key, "no persisted value");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        let path = self.path_for(key);
        tokio::fs::write(&path, value).await?;
        debug!(key = %key, bytes = value.len(), "persisted value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
