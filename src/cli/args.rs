//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Inlay - Local asset cache with ordered replay
///
/// Fetches CSS/JS assets once, keeps their text in a local store, and
/// replays them inline on later loads, in request order.
#[derive(Parser, Debug)]
#[command(name = "inlay")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "INLAY_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve assets through the cache and emit the page fragment
    Load(LoadArgs),

    /// Show store location, entry count, and expiry state
    Status,

    /// Remove every cached entry and the expiry marker
    Flush(FlushArgs),

    /// Show or locate configuration
    Config(ConfigArgs),
}

/// Arguments for the load command
#[derive(Parser, Debug)]
pub struct LoadArgs {
    /// Asset names, in the order they should apply
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Skip the synchronous write-tag shortcut; always fetch on a miss
    #[arg(long)]
    pub force_fetch: bool,

    /// Write the fragment to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Leave stale cache entries in place after loading
    #[arg(long)]
    pub no_prune: bool,
}

/// Arguments for the flush command
#[derive(Parser, Debug)]
pub struct FlushArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}
