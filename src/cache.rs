//! Cache key layout and expiry management
//!
//! Cached asset text lives under `asset_cache_<file>`. A single marker
//! key holds the absolute expiry timestamp in milliseconds; when it is
//! absent or already passed at startup the whole cache is flushed and a
//! fresh marker written. Pruning reclaims entries for files the current
//! page no longer references.

use crate::config::schema::CacheConfig;
use crate::store::AssetStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Prefix of every cached asset entry
pub const CACHE_PREFIX: &str = "asset_cache_";

/// Key holding the expiry timestamp (milliseconds since epoch, as text)
pub const EXPIRY_KEY: &str = "asset_ex";

/// Store key for a file's cached content
pub fn cache_key(file: &str) -> String {
    format!("{}{}", CACHE_PREFIX, file)
}

/// Expiry checks and pruning over an available store
pub struct CacheManager {
    store: Arc<dyn AssetStore>,
    ttl_ms: i64,
    defer_prune: Duration,
}

impl CacheManager {
    /// Wrap an available store; `None` when storage is absent
    pub fn new(store: Arc<dyn AssetStore>, config: &CacheConfig) -> Option<Self> {
        if !store.available() {
            return None;
        }
        Some(Self {
            store,
            ttl_ms: config.ttl_ms as i64,
            defer_prune: Duration::from_millis(config.defer_prune_ms),
        })
    }

    /// Wrap a store and run the startup expiry check
    ///
    /// An absent or passed marker flushes every cached entry and writes
    /// a new marker at now + TTL. A live marker leaves the cache alone.
    pub async fn open(store: Arc<dyn AssetStore>, config: &CacheConfig) -> Option<Self> {
        let manager = Self::new(store, config)?;
        manager.check_expiry().await;
        Some(manager)
    }

    async fn check_expiry(&self) {
        let now = Utc::now().timestamp_millis();

        let marker = match self.store.get(EXPIRY_KEY).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Reading expiry marker failed: {}", e);
                None
            }
        };

        let expired = marker
            .as_deref()
            .and_then(|v| v.parse::<i64>().ok())
            .is_none_or(|t| t <= now);
        if !expired {
            debug!("Cache expiry marker still valid");
            return;
        }

        let removed = self.flush().await;
        info!("Cache expired, flushed {} entries", removed);

        let next = (now + self.ttl_ms).to_string();
        if let Err(e) = self.store.set(EXPIRY_KEY, &next).await {
            warn!("Writing expiry marker failed: {}", e);
        }
    }

    /// Remove every cached asset entry, returning the count removed
    pub async fn flush(&self) -> usize {
        self.remove_stale(|_| true).await
    }

    /// Flush everything and drop the expiry marker
    pub async fn reset(&self) -> usize {
        let removed = self.flush().await;
        if let Err(e) = self.store.remove(EXPIRY_KEY).await {
            warn!("Removing expiry marker failed: {}", e);
        }
        removed
    }

    /// Remove cached entries whose file is not in `tracked`
    ///
    /// Deferred slightly so it never competes with the initial render.
    /// Keys without the cache prefix are never touched.
    pub async fn prune(&self, tracked: &[String]) -> usize {
        tokio::time::sleep(self.defer_prune).await;

        let removed = self
            .remove_stale(|file| !tracked.iter().any(|t| t == file))
            .await;
        if removed > 0 {
            info!("Pruned {} stale cache entries", removed);
        }
        removed
    }

    /// Number of cached asset entries
    pub async fn entry_count(&self) -> usize {
        match self.store.keys().await {
            Ok(keys) => keys
                .iter()
                .filter(|k| k.starts_with(CACHE_PREFIX))
                .count(),
            Err(e) => {
                warn!("Listing store keys failed: {}", e);
                0
            }
        }
    }

    /// Current expiry marker, if present and well-formed
    pub async fn expiry_marker(&self) -> Option<DateTime<Utc>> {
        let value = self.store.get(EXPIRY_KEY).await.ok()??;
        let millis = value.parse::<i64>().ok()?;
        DateTime::from_timestamp_millis(millis)
    }

    async fn remove_stale(&self, stale: impl Fn(&str) -> bool) -> usize {
        let keys = match self.store.keys().await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Listing store keys failed: {}", e);
                return 0;
            }
        };

        let mut removed = 0;
        for key in keys {
            let Some(file) = key.strip_prefix(CACHE_PREFIX) else {
                continue;
            };
            if !stale(file) {
                continue;
            }
            match self.store.remove(&key).await {
                Ok(()) => removed += 1,
                Err(e) => warn!("Removing {} failed: {}", key, e),
            }
        }
        removed
    }
}
