//! Inlay - Local Asset Cache with Ordered Replay
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use inlay::cli::{Cli, Commands};
use inlay::config::ConfigManager;
use inlay::error::InlayResult;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> InlayResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => tracing_subscriber::EnvFilter::new("inlay=warn"),
        1 => tracing_subscriber::EnvFilter::new("inlay=info"),
        _ => tracing_subscriber::EnvFilter::new("inlay=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let manager = if let Some(path) = cli.config {
        ConfigManager::with_path(path)
    } else {
        ConfigManager::new()
    };
    let config = manager.load().await?;

    match cli.command {
        Commands::Load(args) => inlay::cli::commands::load(args, &config).await,
        Commands::Status => inlay::cli::commands::status(&config).await,
        Commands::Flush(args) => inlay::cli::commands::flush(args, &config).await,
        Commands::Config(args) => inlay::cli::commands::config(args, &config, &manager).await,
    }
}
