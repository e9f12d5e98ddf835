//! Ordering guarantees of the loader under asynchronous resolution
//!
//! These tests drive the loader with a scripted fetcher whose per-file
//! latencies force completions out of order, and assert that the sink
//! still sees every delivery in submission order.

use async_trait::async_trait;
use futures_util::FutureExt;
use inlay::config::schema::{LoaderConfig, SaveConfig};
use inlay::fetch::{AssetFetcher, FetchError};
use inlay::loader::OrderedLoader;
use inlay::sink::{AssetSink, TagLoad};
use inlay::store::{AssetStore, MemoryStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fetcher with a scripted per-file delay and outcome
struct ScriptedFetcher {
    delays_ms: HashMap<String, u64>,
    failures: Vec<String>,
    calls: AtomicU32,
}

impl ScriptedFetcher {
    fn new() -> Self {
        Self {
            delays_ms: HashMap::new(),
            failures: Vec::new(),
            calls: AtomicU32::new(0),
        }
    }

    fn delay(mut self, file: &str, ms: u64) -> Self {
        self.delays_ms.insert(file.to_string(), ms);
        self
    }

    fn failing(mut self, file: &str) -> Self {
        self.failures.push(file.to_string());
        self
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetFetcher for ScriptedFetcher {
    async fn fetch(&self, file: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(&ms) = self.delays_ms.get(file) {
            if ms > 0 {
                tokio::time::sleep(Duration::from_millis(ms)).await;
            }
        }

        if self.failures.iter().any(|f| f == file) {
            return Err(FetchError::Status {
                file: file.to_string(),
                status: 500,
            });
        }

        Ok(format!("body of {}", file))
    }
}

/// Sink that records every dispatch as a labelled event
#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<String>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl AssetSink for RecordingSink {
    fn inject_link(&self, file: &str) {
        self.push(format!("raw-css {}", file));
    }
    fn inject_script(&self, file: &str) {
        self.push(format!("raw-js {}", file));
    }
    fn exec_inline_style(&self, content: &str) {
        self.push(format!("inline-css {}", content));
    }
    fn exec_inline_script(&self, content: &str) {
        self.push(format!("inline-js {}", content));
    }
    fn write_style_tag(&self, file: &str) -> TagLoad {
        self.push(format!("write-css {}", file));
        futures_util::future::ready(()).boxed()
    }
    fn write_script_tag(&self, file: &str) -> TagLoad {
        self.push(format!("write-js {}", file));
        futures_util::future::ready(()).boxed()
    }
}

fn instant_save() -> SaveConfig {
    SaveConfig {
        base_delay_ms: 0,
        step_delay_ms: 0,
    }
}

fn loader_over(
    store: Arc<dyn AssetStore>,
    fetcher: Arc<ScriptedFetcher>,
) -> (OrderedLoader, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let loader = OrderedLoader::new(
        store,
        fetcher,
        sink.clone(),
        LoaderConfig::default(),
        &instant_save(),
    );
    (loader, sink)
}

fn names(files: &[&str]) -> Vec<String> {
    files.iter().map(|f| f.to_string()).collect()
}

#[tokio::test]
async fn emission_order_matches_submission_despite_random_latencies() {
    // Later entries complete first on purpose
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .delay("one.css", 60)
            .delay("two.js", 0)
            .delay("three.css", 40)
            .delay("four.js", 10)
            .delay("five.css", 0)
            .delay("six.js", 25),
    );
    let (loader, sink) = loader_over(Arc::new(MemoryStore::new()), fetcher);

    let files = names(&[
        "one.css", "two.js", "three.css", "four.js", "five.css", "six.js",
    ]);
    loader.load(&files, true).await;
    loader.wait_idle().await;

    assert_eq!(
        sink.events(),
        vec![
            "inline-css body of one.css",
            "inline-js body of two.js",
            "inline-css body of three.css",
            "inline-js body of four.js",
            "inline-css body of five.css",
            "inline-js body of six.js",
        ]
    );
}

#[tokio::test]
async fn mixed_resolution_paths_share_one_order() {
    // Slot 0 resolves from cache instantly, slot 1 over the network
    // slowly, slot 2 from cache instantly again; the sink must still
    // see 0, 1, 2.
    let store = Arc::new(MemoryStore::new());
    store.set("asset_cache_hit1.css", "cached one").await.unwrap();
    store.set("asset_cache_hit2.css", "cached two").await.unwrap();

    let fetcher = Arc::new(ScriptedFetcher::new().delay("slow.js", 50));
    let (loader, sink) = loader_over(store, fetcher);

    loader
        .load(&names(&["hit1.css", "slow.js", "hit2.css"]), true)
        .await;
    loader.wait_idle().await;

    assert_eq!(
        sink.events(),
        vec![
            "inline-css cached one",
            "inline-js body of slow.js",
            "inline-css cached two",
        ]
    );
}

#[tokio::test]
async fn fetch_failure_degrades_in_place_without_blocking_siblings() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .delay("a.css", 30)
            .failing("b.js")
            .delay("c.css", 0),
    );
    let (loader, sink) = loader_over(Arc::new(MemoryStore::new()), fetcher);

    loader.load(&names(&["a.css", "b.js", "c.css"]), true).await;
    loader.wait_idle().await;

    assert_eq!(
        sink.events(),
        vec![
            "inline-css body of a.css",
            "raw-js b.js",
            "inline-css body of c.css",
        ]
    );
}

#[tokio::test]
async fn unrecognized_names_never_block_emission() {
    let fetcher = Arc::new(ScriptedFetcher::new().delay("real.css", 10));
    let (loader, sink) = loader_over(Arc::new(MemoryStore::new()), fetcher.clone());

    loader
        .load(&names(&["data.bin", "real.css", "image.svg"]), true)
        .await;
    loader.wait_idle().await;

    assert_eq!(sink.events(), vec!["inline-css body of real.css"]);
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn interleaved_loads_form_a_single_global_order() {
    // The first batch's fetch is still in flight when the second batch
    // arrives and resolves instantly from cache; its emission must wait
    // for the first batch to finish.
    let store = Arc::new(MemoryStore::new());
    store.set("asset_cache_fast.css", "cached").await.unwrap();

    let fetcher = Arc::new(ScriptedFetcher::new().delay("slow.js", 60));
    let (loader, sink) = loader_over(store, fetcher);

    loader.load(&names(&["slow.js"]), true).await;
    loader.load(&names(&["fast.css"]), true).await;
    loader.wait_idle().await;

    assert_eq!(
        sink.events(),
        vec!["inline-js body of slow.js", "inline-css cached"]
    );
}

#[tokio::test]
async fn unavailable_store_issues_no_fetches() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    let (loader, sink) = loader_over(Arc::new(MemoryStore::unavailable()), fetcher.clone());

    loader
        .load(&names(&["a.css", "b.js", "c.css"]), false)
        .await;
    loader.wait_idle().await;

    assert_eq!(
        sink.events(),
        vec!["write-css a.css", "write-js b.js", "write-css c.css"]
    );
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn successful_fetches_populate_the_cache_for_next_load() {
    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(ScriptedFetcher::new().delay("a.css", 5));
    let (loader, _sink) = loader_over(store.clone(), fetcher.clone());

    loader.load(&names(&["a.css"]), true).await;
    loader.wait_idle().await;

    assert_eq!(
        store.get("asset_cache_a.css").await.unwrap().as_deref(),
        Some("body of a.css")
    );

    // Second loader sees the hit and never touches the network
    let (second, sink) = loader_over(store, Arc::new(ScriptedFetcher::new()));
    second.load(&names(&["a.css"]), true).await;
    second.wait_idle().await;

    assert_eq!(sink.events(), vec!["inline-css body of a.css"]);
    assert_eq!(fetcher.calls(), 1);
}
