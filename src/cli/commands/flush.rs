//! Flush command - clear all cached entries

use crate::cache::CacheManager;
use crate::cli::args::FlushArgs;
use crate::config::schema::Config;
use crate::error::InlayResult;
use console::style;
use std::io::{self, Write};

/// Execute the flush command
pub async fn execute(args: FlushArgs, config: &Config) -> InlayResult<()> {
    let store = super::open_store(config).await;

    let cache = match CacheManager::new(store, &config.cache) {
        Some(cache) => cache,
        None => {
            println!("Store unavailable - nothing to flush.");
            return Ok(());
        }
    };

    let count = cache.entry_count().await;
    if count == 0 {
        println!("No cached entries to flush.");
        return Ok(());
    }

    if !args.yes {
        print!("Remove {} cached entr(ies)? [y/N] ", count);
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Failed to read input, aborting.");
            return Ok(());
        }

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let removed = cache.reset().await;
    println!("{} flushed {} entr(ies)", style("✓").green(), removed);

    Ok(())
}
