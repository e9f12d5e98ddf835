//! Lazy cache population
//!
//! Write-tag deliveries bypass the cache for the current render; once
//! such a tag finishes loading, the same asset is fetched out-of-band
//! and persisted for the next page load. Each scheduled save waits a
//! little longer than the previous one so a page full of synchronous
//! tags does not burst into simultaneous requests.

use crate::cache::cache_key;
use crate::fetch::AssetFetcher;
use crate::store::AssetStore;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Staggered fetch-and-persist scheduler
pub struct LazySaver {
    base: Duration,
    step: Duration,
    scheduled: AtomicU32,
    fetcher: Arc<dyn AssetFetcher>,
    store: Arc<dyn AssetStore>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl LazySaver {
    /// Create a saver with the given base delay and per-call increment
    pub fn new(
        fetcher: Arc<dyn AssetFetcher>,
        store: Arc<dyn AssetStore>,
        base: Duration,
        step: Duration,
    ) -> Self {
        Self {
            base,
            step,
            scheduled: AtomicU32::new(0),
            fetcher,
            store,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Schedule an out-of-band fetch-and-persist of `file`
    ///
    /// The nth call sleeps base + n * step before fetching. Failures are
    /// logged and dropped; this path never affects the current render.
    pub fn schedule(&self, file: &str) {
        let call = self.scheduled.fetch_add(1, Ordering::Relaxed) + 1;
        let delay = self.base + self.step * call;

        let fetcher = self.fetcher.clone();
        let store = self.store.clone();
        let file = file.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match fetcher.fetch(&file).await {
                Ok(content) => {
                    if let Err(e) = store.set(&cache_key(&file), &content).await {
                        warn!("Lazy save of {} failed: {}", file, e);
                    } else {
                        debug!("Lazy-saved {}", file);
                    }
                }
                Err(e) => debug!("Lazy save fetch for {} failed: {}", file, e),
            }
        });
        self.tasks.lock().unwrap().push(handle);
    }

    /// Drain the handles of every save scheduled so far
    pub(crate) fn take_tasks(&self) -> Vec<JoinHandle<()>> {
        self.tasks.lock().unwrap().drain(..).collect()
    }
}
