//! Dependency descriptors
//!
//! Each descriptor names a fetchable artifact: where it lives, what its
//! contents must hash to, and which stacks it is packaged for. Descriptors
//! are read-only for the process lifetime.

use semver::Version;
use serde::{Deserialize, Serialize};

/// A fetchable artifact declared in the buildpack catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Catalog id (e.g. `tomcat`, `tomcat-logging-support`)
    pub id: String,

    /// Human-readable display name
    pub name: String,

    /// Artifact version
    pub version: Version,

    /// Source location of the artifact
    pub uri: String,

    /// Content digest of the artifact, hex-encoded
    pub sha256: String,

    /// Stacks the artifact is packaged for
    #[serde(default)]
    pub stacks: Vec<String>,

    /// License entries
    #[serde(default)]
    pub licenses: Vec<License>,
}

/// A license entry on a dependency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct License {
    /// SPDX-style license type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,

    /// Location of the license text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl Dependency {
    /// Whether this artifact is usable on `stack`
    pub fn supports_stack(&self, stack: &str) -> bool {
        self.stacks.iter().any(|s| s == stack)
    }

    /// Artifact file name, derived from the last segment of the source URI.
    /// Falls back to the checksum when the URI has no usable segment.
    pub fn artifact_name(&self) -> String {
        self.uri
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .unwrap_or_else(|| self.sha256.clone())
    }
}
