//! Status command - report store health and expiry state

use crate::cache::CacheManager;
use crate::config::schema::Config;
use crate::error::InlayResult;
use chrono::Utc;
use console::{style, Emoji};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "[--] ");

/// Execute the status command
pub async fn execute(config: &Config) -> InlayResult<()> {
    println!("{}", style("Inlay Cache Status").bold().cyan());
    println!();

    let path = super::store_path(config);
    println!("{}", style("Store:").bold());
    println!("  Path: {}", path.display());

    let store = super::open_store(config).await;
    if !store.available() {
        println!(
            "  {} {} - assets will load without caching",
            CROSS,
            style("Unavailable").red()
        );
        return Ok(());
    }
    println!("  {} {}", CHECK, style("Available").green());

    // Plain handle: status must not trigger the startup flush
    let cache = match CacheManager::new(store, &config.cache) {
        Some(cache) => cache,
        None => return Ok(()),
    };

    println!();
    println!("{}", style("Cache:").bold());
    println!("  Entries: {}", cache.entry_count().await);

    match cache.expiry_marker().await {
        Some(expiry) if expiry > Utc::now() => {
            println!(
                "  {} Valid until {}",
                CHECK,
                expiry.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        Some(expiry) => {
            println!(
                "  {} Expired at {} - next load flushes",
                CROSS,
                expiry.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        None => {
            println!("  {} No expiry marker - next load flushes", CROSS);
        }
    }

    Ok(())
}
