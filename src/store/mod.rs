//! Persistent key/value store abstraction
//!
//! The loader treats storage as a best-effort capability: it may be
//! absent entirely (every asset then degrades to tag delivery) and every
//! individual operation may fail without affecting the current render.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from individual store operations
///
/// Callers on the load path catch these, log them, and carry on — a get
/// failure is a cache miss, a set/remove failure is a no-op.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl StoreError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Abstract string-keyed persistent store
///
/// `available` is checked once at loader startup; when it reports false
/// the cache subsystem is fully inert for the page load.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Whether the backing storage can be used at all
    fn available(&self) -> bool;

    /// Look up a value, `None` on miss
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key; removing an absent key is not an error
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Enumerate all keys currently present
    async fn keys(&self) -> Result<Vec<String>, StoreError>;
}
