//! In-memory store
//!
//! Used by tests and as the stand-in when no persistent storage exists.
//! The unavailable variant still answers trait calls (from its empty map)
//! so callers that skip the availability check stay harmless.

use super::{AssetStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Ephemeral store backed by a `HashMap`
pub struct MemoryStore {
    available: bool,
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an available, empty store
    pub fn new() -> Self {
        Self {
            available: true,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Create a store that reports itself unavailable
    pub fn unavailable() -> Self {
        Self {
            available: false,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetStore for MemoryStore {
    fn available(&self) -> bool {
        self.available
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.lock().unwrap().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn roundtrip() {
        let store = MemoryStore::new();
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));

        store.remove("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unavailable_reports_false() {
        let store = MemoryStore::unavailable();
        assert!(!store.available());
        // Operations still answer rather than panic
        assert!(store.get("k").await.unwrap().is_none());
    }
}
