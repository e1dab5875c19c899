//! Build layers
//!
//! A layer is the unit of persistence across builds: a named directory under
//! the layers root, a sibling metadata file, and the boolean flags the
//! platform reads from it.

pub mod contributor;
pub mod metadata;

pub use contributor::{Contributor, LayerContributor};
pub use metadata::LayerMetadata;

use crate::error::BuildpackResult;
use crate::fsutil;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Flags the platform reads from persisted layer metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerFlags {
    pub build: bool,
    pub cache: bool,
    pub launch: bool,
}

impl LayerFlags {
    /// Launch-only layer
    pub const LAUNCH: Self = Self {
        build: false,
        cache: false,
        launch: true,
    };
}

/// A named layer under the layers directory
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    root: PathBuf,
    metadata_path: PathBuf,
}

impl Layer {
    pub fn new(layers_dir: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            root: layers_dir.join(name),
            metadata_path: layers_dir.join(format!("{}.toml", name)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the layer's contents live in
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sibling metadata file read by later builds and the launcher
    pub fn metadata_path(&self) -> &Path {
        &self.metadata_path
    }

    /// Write a launch-time profile script sourced by the launcher
    pub fn write_profile(&self, name: &str, contents: &str) -> BuildpackResult<()> {
        fsutil::write_file(&self.root.join("profile.d").join(name), contents)
    }

    /// Override a launch-time environment variable
    pub fn override_launch_env(&self, name: &str, value: &str) -> BuildpackResult<()> {
        fsutil::write_file(
            &self.root.join("env.launch").join(format!("{}.override", name)),
            value,
        )
    }
}
