//! Layer contribution orchestration
//!
//! Phases are explicit: ensure every artifact, run every contribution
//! against the shared layer root, persist metadata once at the end. A
//! failure in any phase aborts the build and leaves the metadata file
//! untouched, so later builds never trust a half-contributed layer.

use crate::cache::ArtifactCache;
use crate::catalog::Dependency;
use crate::error::BuildpackResult;
use crate::layer::{Layer, LayerFlags, LayerMetadata};
use futures_util::future;
use std::path::Path;
use tracing::{debug, info};

/// Per-dependency contribution capability
pub trait Contributor {
    /// Write this dependency's side effects into the layer
    fn contribute(&self, artifact: &Path, layer: &Layer) -> BuildpackResult<()>;
}

/// Orchestrates a multi-dependency contribution to one shared layer
pub struct LayerContributor<'a> {
    cache: &'a ArtifactCache,
}

impl<'a> LayerContributor<'a> {
    pub fn new(cache: &'a ArtifactCache) -> Self {
        Self { cache }
    }

    /// Contribute `entries` to `layer` in order, then persist `flags` and
    /// the full descriptor set.
    ///
    /// When the layer's existing metadata already records exactly this
    /// descriptor set and flags, the layer is reused as-is. Checksum
    /// equality of every dependency is assumed sufficient for reuse.
    pub async fn contribute<C: Contributor>(
        &self,
        layer: &Layer,
        entries: &[(Dependency, C)],
        flags: LayerFlags,
    ) -> BuildpackResult<()> {
        let target = LayerMetadata::new(
            flags,
            entries.iter().map(|(d, _)| d.clone()).collect(),
        );

        if let Some(previous) = LayerMetadata::read_if_exists(layer.metadata_path())? {
            if previous == target {
                debug!("Reusing layer {}", layer.name());
                return Ok(());
            }
        }

        // Every artifact present and verified before any side effect runs.
        // Distinct dependencies fetch concurrently; the cache serializes
        // same-checksum calls.
        let artifacts = future::try_join_all(
            entries.iter().map(|(dependency, _)| self.cache.ensure(dependency)),
        )
        .await?;

        // Per-dependency side effects against the shared root, fail-fast
        for ((dependency, contribution), artifact) in entries.iter().zip(&artifacts) {
            info!("Contributing {} {}", dependency.name, dependency.version);
            contribution.contribute(artifact, layer)?;
        }

        // Metadata only after the whole set succeeded
        target.write(layer.metadata_path())
    }
}
