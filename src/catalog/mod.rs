//! Dependency catalog
//!
//! The catalog is the `[metadata]` section of the buildpack's
//! `buildpack.toml`: a static list of dependency descriptors plus a table of
//! declared default versions. Pure data, no behavior beyond lookup and
//! resolution.

pub mod dependency;
pub mod resolve;

pub use dependency::{Dependency, License};

use crate::error::{BuildpackError, BuildpackResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Parsed, static list of dependency descriptors
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    dependencies: Vec<Dependency>,
    default_versions: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawBuildpack {
    #[serde(default)]
    metadata: RawMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    dependencies: Vec<Dependency>,

    #[serde(default, rename = "default-versions")]
    default_versions: HashMap<String, String>,
}

impl Catalog {
    /// Build a catalog directly from descriptors and declared defaults
    pub fn new(dependencies: Vec<Dependency>, default_versions: HashMap<String, String>) -> Self {
        Self {
            dependencies,
            default_versions,
        }
    }

    /// Load the catalog from `buildpack.toml` under the buildpack root
    pub async fn from_buildpack_root(root: &Path) -> BuildpackResult<Self> {
        let path = root.join("buildpack.toml");
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| BuildpackError::io(format!("reading catalog {}", path.display()), e))?;

        Self::parse(&content).map_err(|e| BuildpackError::CatalogInvalid {
            path,
            reason: e.to_string(),
        })
    }

    /// Parse a catalog from buildpack.toml contents
    pub fn parse(content: &str) -> BuildpackResult<Self> {
        let raw: RawBuildpack = toml::from_str(content)?;
        Ok(Self::new(raw.metadata.dependencies, raw.metadata.default_versions))
    }

    /// Whether any descriptor carries `id`
    pub fn contains(&self, id: &str) -> bool {
        self.dependencies.iter().any(|d| d.id == id)
    }

    /// The declared default version for `id`, if any
    pub fn default_version(&self, id: &str) -> Option<&str> {
        self.default_versions.get(id).map(String::as_str)
    }

    /// All descriptors, in catalog order
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }
}
