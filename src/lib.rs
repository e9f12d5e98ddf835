//! Inlay - Local Asset Cache with Ordered Replay
//!
//! Fetches CSS/JS assets once, keeps their text in a local store, and
//! replays them inline on later loads — applied strictly in the order
//! they were requested, no matter when each one resolves.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod sink;
pub mod store;

pub use error::{InlayError, InlayResult};
