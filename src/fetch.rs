//! Asset fetching
//!
//! Retrieves an asset's text content. The HTTP path runs ureq's blocking
//! client under `spawn_blocking`; success means HTTP 200. Names that are
//! not absolute URLs and have no configured base URL are resolved against
//! the document root and read from disk, succeeding only with a non-empty
//! body (the file-protocol analog of a zero-status response).

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Errors from a single fetch attempt
///
/// On the load path these are never propagated: a failed fetch degrades
/// the asset to raw-tag delivery at its original position.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request for {file} failed: {reason}")]
    Request { file: String, reason: String },

    #[error("unexpected status {status} fetching {file}")]
    Status { file: String, status: u16 },

    #[error("empty body for {file}")]
    EmptyBody { file: String },

    #[error("reading {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// Abstract asset fetcher
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Fetch the asset's text content
    async fn fetch(&self, file: &str) -> Result<String, FetchError>;
}

/// Fetcher over HTTP with a filesystem fallback for non-URL names
pub struct HttpFetcher {
    agent: ureq::Agent,
    base_url: Option<String>,
    document_root: Option<PathBuf>,
}

impl HttpFetcher {
    /// Create a fetcher
    ///
    /// `base_url` is prepended to relative asset names; without one,
    /// relative names are read from `document_root` (or the current
    /// directory).
    pub fn new(base_url: Option<String>, document_root: Option<PathBuf>) -> Self {
        // Cookie jar lives on the agent, so session credentials ride
        // along on every asset request.
        Self {
            agent: ureq::Agent::new_with_defaults(),
            base_url,
            document_root,
        }
    }

    fn resolve_url(&self, file: &str) -> Option<String> {
        if file.starts_with("http://") || file.starts_with("https://") {
            return Some(file.to_string());
        }
        self.base_url.as_ref().map(|base| {
            format!(
                "{}/{}",
                base.trim_end_matches('/'),
                file.trim_start_matches('/')
            )
        })
    }

    async fn fetch_http(&self, file: &str, url: String) -> Result<String, FetchError> {
        let agent = self.agent.clone();
        let name = file.to_string();

        let result = tokio::task::spawn_blocking(move || -> Result<String, FetchError> {
            let mut response =
                agent
                    .get(&url)
                    .call()
                    .map_err(|e| match e {
                        ureq::Error::StatusCode(status) => FetchError::Status {
                            file: name.clone(),
                            status,
                        },
                        other => FetchError::Request {
                            file: name.clone(),
                            reason: other.to_string(),
                        },
                    })?;

            if response.status().as_u16() != 200 {
                return Err(FetchError::Status {
                    file: name.clone(),
                    status: response.status().as_u16(),
                });
            }

            response
                .body_mut()
                .read_to_string()
                .map_err(|e| FetchError::Request {
                    file: name,
                    reason: e.to_string(),
                })
        })
        .await;

        result.map_err(|e| FetchError::Request {
            file: file.to_string(),
            reason: format!("fetch task failed: {}", e),
        })?
    }

    async fn fetch_local(&self, file: &str) -> Result<String, FetchError> {
        let path = self
            .document_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(file);

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FetchError::Io {
                file: file.to_string(),
                source: e,
            })?;

        if content.is_empty() {
            return Err(FetchError::EmptyBody {
                file: file.to_string(),
            });
        }

        Ok(content)
    }
}

#[async_trait]
impl AssetFetcher for HttpFetcher {
    async fn fetch(&self, file: &str) -> Result<String, FetchError> {
        match self.resolve_url(file) {
            Some(url) => {
                debug!("Fetching {} from {}", file, url);
                self.fetch_http(file, url).await
            }
            None => {
                debug!("Reading {} from document root", file);
                self.fetch_local(file).await
            }
        }
    }
}
