//! Configuration schema for inlay
//!
//! Configuration is stored at `~/.config/inlay/config.toml`. The
//! defaults reproduce the loader's historical constants: both kinds
//! sync, a two-day cache TTL, and 500 ms + 50 ms lazy-save stagger.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ordered loader settings
    pub loader: LoaderConfig,

    /// Cache store and expiry settings
    pub cache: CacheConfig,

    /// Fetcher settings
    pub fetch: FetchConfig,

    /// Lazy-save stagger settings
    pub save: SaveConfig,
}

/// Ordered loader settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Deliver uncached CSS as synchronous write-tags (keeps render
    /// order during the initial parse)
    pub css_sync: bool,

    /// Deliver uncached JS as synchronous write-tags
    pub js_sync: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            css_sync: true,
            js_sync: true,
        }
    }
}

/// Cache store and expiry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Full-flush TTL in milliseconds
    pub ttl_ms: u64,

    /// Deferral before pruning, in milliseconds
    pub defer_prune_ms: u64,

    /// Store document location (defaults to the state directory)
    pub store_path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            // Two days
            ttl_ms: 2 * 24 * 60 * 60 * 1000,
            defer_prune_ms: 100,
            store_path: None,
        }
    }
}

/// Fetcher settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Base URL prepended to relative asset names
    pub base_url: Option<String>,

    /// Directory for resolving relative names without a base URL
    pub document_root: Option<PathBuf>,
}

/// Lazy-save stagger settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Base delay before the first lazy save, in milliseconds
    pub base_delay_ms: u64,

    /// Additional delay per scheduled save, in milliseconds
    pub step_delay_ms: u64,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 500,
            step_delay_ms: 50,
        }
    }
}
