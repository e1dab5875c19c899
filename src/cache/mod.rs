//! Content-addressed artifact cache
//!
//! Artifacts are cached under their declared checksum alongside a
//! side-channel record holding the full serialized descriptor. An entry is
//! valid only when the artifact file exists and the record's checksum equals
//! the descriptor's; anything else is a miss. Entries are committed
//! atomically and reused until the declared checksum changes.
//!
//! Concurrent `ensure` calls for the same checksum are serialized; the
//! second caller observes the first's committed result instead of fetching
//! again.

pub mod fetch;

pub use fetch::{Fetcher, HttpFetcher};

use crate::catalog::Dependency;
use crate::error::{BuildpackError, BuildpackResult};
use crate::fsutil;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Side-channel record committed next to a cached artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CacheRecord {
    metadata: Dependency,
}

/// Checksum-keyed artifact cache
pub struct ArtifactCache {
    root: PathBuf,
    fetcher: Arc<dyn Fetcher>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ArtifactCache {
    pub fn new(root: impl Into<PathBuf>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            root: root.into(),
            fetcher,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Default cache location under the user cache directory
    pub fn default_root() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tomcat-buildpack")
    }

    /// Where the verified artifact for `dependency` lives
    pub fn artifact_path(&self, dependency: &Dependency) -> PathBuf {
        self.root
            .join(&dependency.sha256)
            .join(dependency.artifact_name())
    }

    fn record_path(&self, dependency: &Dependency) -> PathBuf {
        self.root.join(format!("{}.toml", dependency.sha256))
    }

    /// Guarantee a verified local copy of `dependency`, fetching only on
    /// cache miss or checksum mismatch. Two consecutive calls with an
    /// unchanged dependency perform network I/O on at most the first.
    pub async fn ensure(&self, dependency: &Dependency) -> BuildpackResult<PathBuf> {
        let lock = self.checksum_lock(&dependency.sha256).await;
        let _guard = lock.lock().await;

        let artifact = self.artifact_path(dependency);
        if self.is_valid(dependency, &artifact) {
            debug!(
                "Reusing cached {} {} at {}",
                dependency.name,
                dependency.version,
                artifact.display()
            );
            return Ok(artifact);
        }

        info!(
            "Downloading {} {} from {}",
            dependency.name, dependency.version, dependency.uri
        );
        let bytes = self.fetcher.fetch(&dependency.uri).await?;

        let actual = hex::encode(Sha256::digest(&bytes));
        if actual != dependency.sha256 {
            // A stale entry at this location must never satisfy a later call
            self.discard(dependency)?;
            return Err(BuildpackError::ChecksumMismatch {
                uri: dependency.uri.clone(),
                expected: dependency.sha256.clone(),
                actual,
            });
        }

        fsutil::atomic_write(&artifact, &bytes)?;

        let record = CacheRecord {
            metadata: dependency.clone(),
        };
        fsutil::atomic_write(
            &self.record_path(dependency),
            toml::to_string_pretty(&record)?.as_bytes(),
        )?;

        debug!("Cached {} at {}", dependency.name, artifact.display());
        Ok(artifact)
    }

    /// Artifact file present and record checksum equal to the descriptor's
    fn is_valid(&self, dependency: &Dependency, artifact: &Path) -> bool {
        if !artifact.is_file() {
            return false;
        }

        let record = match fs::read_to_string(self.record_path(dependency)) {
            Ok(content) => content,
            Err(_) => return false,
        };

        match toml::from_str::<CacheRecord>(&record) {
            Ok(record) => record.metadata.sha256 == dependency.sha256,
            Err(_) => false,
        }
    }

    /// Drop the record first so a partial removal is a miss, not a hit
    fn discard(&self, dependency: &Dependency) -> BuildpackResult<()> {
        for path in [self.record_path(dependency), self.artifact_path(dependency)] {
            if let Err(e) = fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    return Err(BuildpackError::io(
                        format!("removing invalid cache entry {}", path.display()),
                        e,
                    ));
                }
            }
        }
        Ok(())
    }

    async fn checksum_lock(&self, sha256: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(sha256.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
