//! File-backed store
//!
//! Holds the whole key→value map as one JSON document and rewrites it on
//! every mutation. Asset payloads are small page resources, so a single
//! document keeps the on-disk format trivial to inspect and recover.

use super::{AssetStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// Persistent store backed by a single JSON file
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open a store at `path`, loading any existing document
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)
                .await
                .map_err(|e| StoreError::io(format!("reading store {}", path.display()), e))?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };

        debug!("Opened store at {}", path.display());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Number of entries currently held
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// The on-disk location of the store document
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io("creating store directory", e))?;
        }

        let content = serde_json::to_string(entries)?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| StoreError::io(format!("writing store {}", self.path.display()), e))
    }
}

#[async_trait]
impl AssetStore for FileStore {
    fn available(&self) -> bool {
        true
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_some() {
            self.persist(&entries).await?;
        }
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.lock().await.keys().cloned().collect())
    }
}
