//! Artifact fetch primitive
//!
//! The cache decides *when* to fetch; this trait is the single seam for
//! *how*. Retry, if any, belongs behind this seam, never in the cache.

use crate::error::{BuildpackError, BuildpackResult};
use async_trait::async_trait;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Transport abstraction for retrieving artifact bytes
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the complete contents at `uri`
    async fn fetch(&self, uri: &str) -> BuildpackResult<Vec<u8>>;
}

/// HTTP(S) fetcher used by the shipped binary
pub struct HttpFetcher {
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overall deadline covering connect and body transfer
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, uri: &str) -> BuildpackResult<Vec<u8>> {
        let owned = uri.to_string();
        let timeout = self.timeout;

        let handle = tokio::task::spawn_blocking(move || {
            let agent: ureq::Agent = ureq::Agent::config_builder()
                .timeout_global(Some(timeout))
                .build()
                .into();

            let mut response = agent.get(&owned).call().map_err(|e| BuildpackError::Fetch {
                uri: owned.clone(),
                reason: e.to_string(),
            })?;

            response
                .body_mut()
                .read_to_vec()
                .map_err(|e| BuildpackError::Fetch {
                    uri: owned.clone(),
                    reason: e.to_string(),
                })
        });

        handle.await.map_err(|e| BuildpackError::Fetch {
            uri: uri.to_string(),
            reason: format!("fetch task failed: {}", e),
        })?
    }
}
