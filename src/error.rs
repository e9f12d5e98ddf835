//! Error types for inlay
//!
//! All modules use `InlayResult<T>` as their return type. Per-asset
//! failures (store operations, fetches) never surface here — the loader
//! degrades them to fallback delivery and logs them instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for inlay operations
pub type InlayResult<T> = Result<T, InlayError>;

/// All errors that can occur in inlay
#[derive(Error, Debug)]
pub enum InlayError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Store errors (only reach the caller from CLI-level store management)
    #[error(transparent)]
    Store(#[from] crate::store::StoreError),

    // Fetch errors (only reach the caller from explicit CLI fetches)
    #[error(transparent)]
    Fetch(#[from] crate::fetch::FetchError),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl InlayError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigInvalid { .. } => Some("Run: inlay config path"),
            Self::Store(_) => Some("Run: inlay status"),
            _ => None,
        }
    }
}
