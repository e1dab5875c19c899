//! Layer metadata persistence
//!
//! Metadata reflects exactly the descriptor set last successfully
//! contributed to the layer. It is written once, atomically, after every
//! contribution in the set has succeeded, so a failed build never leaves
//! partial or stale metadata behind.

use crate::catalog::Dependency;
use crate::error::{BuildpackError, BuildpackResult};
use crate::fsutil;
use crate::layer::LayerFlags;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Persisted layer state: flags plus the contributed descriptor set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerMetadata {
    pub build: bool,
    pub cache: bool,
    pub launch: bool,

    #[serde(default)]
    pub metadata: ContributedSet,
}

/// Descriptor set recorded under `[metadata]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributedSet {
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl LayerMetadata {
    pub fn new(flags: LayerFlags, dependencies: Vec<Dependency>) -> Self {
        Self {
            build: flags.build,
            cache: flags.cache,
            launch: flags.launch,
            metadata: ContributedSet { dependencies },
        }
    }

    pub fn flags(&self) -> LayerFlags {
        LayerFlags {
            build: self.build,
            cache: self.cache,
            launch: self.launch,
        }
    }

    /// Commit to `path` atomically
    pub fn write(&self, path: &Path) -> BuildpackResult<()> {
        fsutil::atomic_write(path, toml::to_string_pretty(self)?.as_bytes())
    }

    pub fn read(path: &Path) -> BuildpackResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BuildpackError::io(format!("reading layer metadata {}", path.display()), e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Metadata from a prior build, `None` when this is the first
    pub fn read_if_exists(path: &Path) -> BuildpackResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::read(path).map(Some)
    }
}
