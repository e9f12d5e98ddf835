//! Load command - resolve assets and emit the page fragment

use crate::cache::CacheManager;
use crate::cli::args::LoadArgs;
use crate::config::schema::Config;
use crate::error::{InlayError, InlayResult};
use crate::fetch::HttpFetcher;
use crate::loader::OrderedLoader;
use crate::sink::HtmlSink;
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

/// Execute the load command
pub async fn execute(args: LoadArgs, config: &Config) -> InlayResult<()> {
    let store = super::open_store(config).await;

    // Expiry check runs before any lookup, like a page load would
    let cache = CacheManager::open(store.clone(), &config.cache).await;

    let fetcher = Arc::new(HttpFetcher::new(
        config.fetch.base_url.clone(),
        config.fetch.document_root.clone(),
    ));
    let sink = Arc::new(HtmlSink::new());

    let loader = OrderedLoader::new(
        store,
        fetcher,
        sink.clone(),
        config.loader,
        &config.save,
    );

    loader.load(&args.files, args.force_fetch).await;
    loader.wait_idle().await;

    let fragment = sink.render();
    match &args.out {
        Some(path) => {
            fs::write(path, fragment.as_bytes())
                .await
                .map_err(|e| InlayError::io(format!("writing {}", path.display()), e))?;
            debug!("Fragment written to {}", path.display());
        }
        None => println!("{}", fragment),
    }

    if let Some(cache) = cache {
        if !args.no_prune {
            cache.prune(&loader.tracked()).await;
        }
    }

    Ok(())
}
