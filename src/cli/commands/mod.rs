//! CLI command implementations

pub mod config;
pub mod flush;
pub mod load;
pub mod status;

pub use config::execute as config;
pub use flush::execute as flush;
pub use load::execute as load;
pub use status::execute as status;

use crate::config::schema::Config;
use crate::config::ConfigManager;
use crate::store::{AssetStore, FileStore, MemoryStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// The store document location for this configuration
pub(crate) fn store_path(config: &Config) -> PathBuf {
    config
        .cache
        .store_path
        .clone()
        .unwrap_or_else(ConfigManager::default_store_path)
}

/// Open the configured store, degrading to an unavailable one
///
/// A store that cannot be opened (unreadable or corrupt document) is
/// the CLI's equivalent of missing browser storage: assets still load,
/// nothing is cached.
pub(crate) async fn open_store(config: &Config) -> Arc<dyn AssetStore> {
    let path = store_path(config);
    match FileStore::open(path.clone()).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("Store at {} unavailable: {}", path.display(), e);
            Arc::new(MemoryStore::unavailable())
        }
    }
}
