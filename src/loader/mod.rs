//! Ordered asset loading
//!
//! Accepts ordered batches of asset names, resolves each through
//! cache-hit / write-tag / fetch / fallback, and releases the results to
//! the sink strictly in submission order even though resolutions
//! complete at arbitrary times. All batches on one loader share a single
//! sequence, so interleaved loads still form one total order.

pub mod kind;
pub mod lazy;
pub mod sequence;

pub use kind::{AssetKind, DeliveryMode, ResolvedAsset};

use crate::cache::cache_key;
use crate::config::schema::{LoaderConfig, SaveConfig};
use crate::fetch::AssetFetcher;
use crate::sink::{AssetSink, TagLoad};
use crate::store::AssetStore;
use lazy::LazySaver;
use sequence::SequenceState;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Ordered cache-or-fetch asset loader
///
/// Cheap to clone; clones share the same sequence, store, and sink.
#[derive(Clone)]
pub struct OrderedLoader {
    config: LoaderConfig,
    store: Option<Arc<dyn AssetStore>>,
    fetcher: Arc<dyn AssetFetcher>,
    sink: Arc<dyn AssetSink>,
    saver: Option<Arc<LazySaver>>,
    state: Arc<Mutex<SequenceState>>,
    tracked: Arc<Mutex<Vec<String>>>,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl OrderedLoader {
    /// Create a loader over the given capabilities
    ///
    /// Store availability is detected here, once: an unavailable store
    /// disables the cache and the lazy saver for the loader's lifetime.
    pub fn new(
        store: Arc<dyn AssetStore>,
        fetcher: Arc<dyn AssetFetcher>,
        sink: Arc<dyn AssetSink>,
        config: LoaderConfig,
        save: &SaveConfig,
    ) -> Self {
        let store = store.available().then_some(store);
        let saver = store.clone().map(|store| {
            Arc::new(LazySaver::new(
                fetcher.clone(),
                store,
                Duration::from_millis(save.base_delay_ms),
                Duration::from_millis(save.step_delay_ms),
            ))
        });

        Self {
            config,
            store,
            fetcher,
            sink,
            saver,
            state: Arc::new(Mutex::new(SequenceState::new())),
            tracked: Arc::new(Mutex::new(Vec::new())),
            tasks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Submit an ordered batch of asset names
    ///
    /// Names matching neither `.css` nor `.js` are dropped without
    /// consuming a sequence slot. `force_fetch` skips the synchronous
    /// write-tag shortcut and always goes to the network on a miss.
    pub async fn load(&self, files: &[String], force_fetch: bool) {
        for file in files {
            let Some(kind) = AssetKind::detect(file) else {
                debug!("Skipping {}: not a css/js asset", file);
                continue;
            };

            let index = self.state.lock().unwrap().allocate();
            self.tracked.lock().unwrap().push(file.clone());

            let Some(store) = &self.store else {
                // No storage at all: synchronous tag fallback only
                self.resolve(ResolvedAsset::write(index, file, kind));
                continue;
            };

            let cached = match store.get(&cache_key(file)).await {
                Ok(value) => value,
                Err(e) => {
                    warn!("Cache read for {} failed: {}", file, e);
                    None
                }
            };
            if let Some(content) = cached {
                debug!("Cache hit for {}", file);
                self.resolve(ResolvedAsset::inline(index, file, kind, content));
                continue;
            }

            let sync = match kind {
                AssetKind::Css => self.config.css_sync,
                AssetKind::Js => self.config.js_sync,
            };
            if !force_fetch && sync {
                // Write-tag keeps render/execution order during the
                // initial parse, trading cacheability for this load
                self.resolve(ResolvedAsset::write(index, file, kind));
                continue;
            }

            self.spawn_fetch(index, file.clone(), kind);
        }
    }

    /// Files submitted to this loader so far, for pruning
    pub fn tracked(&self) -> Vec<String> {
        self.tracked.lock().unwrap().clone()
    }

    /// Wait for every in-flight resolution, persist, and lazy save
    ///
    /// Batch callers use this before reading the sink; a long-lived page
    /// embedding never needs it.
    pub async fn wait_idle(&self) {
        loop {
            let mut handles: Vec<JoinHandle<()>> =
                self.tasks.lock().unwrap().drain(..).collect();
            if handles.is_empty() {
                if let Some(saver) = &self.saver {
                    handles = saver.take_tasks();
                }
                if handles.is_empty() {
                    break;
                }
            }
            for handle in handles {
                let _ = handle.await;
            }
        }
    }

    fn spawn_fetch(&self, index: u64, file: String, kind: AssetKind) {
        let loader = self.clone();
        let handle = tokio::spawn(async move {
            match loader.fetcher.fetch(&file).await {
                Ok(content) => {
                    loader.persist(&file, &content);
                    loader.resolve(ResolvedAsset::inline(index, &file, kind, content));
                }
                Err(e) => {
                    warn!("Fetch for {} failed, using a raw tag: {}", file, e);
                    loader.resolve(ResolvedAsset::raw(index, &file, kind));
                }
            }
        });
        self.tasks.lock().unwrap().push(handle);
    }

    /// Fire-and-forget persist of freshly fetched content
    fn persist(&self, file: &str, content: &str) {
        let Some(store) = self.store.clone() else {
            return;
        };
        let key = cache_key(file);
        let file = file.to_string();
        let content = content.to_string();

        let handle = tokio::spawn(async move {
            if let Err(e) = store.set(&key, &content).await {
                warn!("Caching {} failed: {}", file, e);
            }
        });
        self.tasks.lock().unwrap().push(handle);
    }

    /// Record a resolution and emit every slot that became ready
    ///
    /// Dispatch happens under the sequence lock so concurrent
    /// resolutions cannot reorder a drained run.
    fn resolve(&self, asset: ResolvedAsset) {
        let mut state = self.state.lock().unwrap();
        for ready in state.resolve(asset) {
            self.dispatch(ready);
        }
    }

    fn dispatch(&self, asset: ResolvedAsset) {
        debug!("Emitting #{} {} as {:?}", asset.index, asset.file, asset.mode);
        match asset.mode {
            DeliveryMode::InlineCss => {
                self.sink
                    .exec_inline_style(asset.content.as_deref().unwrap_or(""));
            }
            DeliveryMode::InlineJs => {
                self.sink
                    .exec_inline_script(asset.content.as_deref().unwrap_or(""));
            }
            DeliveryMode::RawCssTag => self.sink.inject_link(&asset.file),
            DeliveryMode::RawJsTag => self.sink.inject_script(&asset.file),
            DeliveryMode::WriteCssTag => {
                let load = self.sink.write_style_tag(&asset.file);
                self.wire_lazy_save(&asset.file, load);
            }
            DeliveryMode::WriteJsTag => {
                let load = self.sink.write_script_tag(&asset.file);
                self.wire_lazy_save(&asset.file, load);
            }
        }
    }

    /// Once a written tag finishes loading, schedule its cache save
    fn wire_lazy_save(&self, file: &str, load: TagLoad) {
        let Some(saver) = self.saver.clone() else {
            return;
        };
        let file = file.to_string();
        let handle = tokio::spawn(async move {
            load.await;
            saver.schedule(&file);
        });
        self.tasks.lock().unwrap().push(handle);
    }
}
