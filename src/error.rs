//! Error types for the Tomcat buildpack
//!
//! All modules use `BuildpackResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for buildpack operations
pub type BuildpackResult<T> = Result<T, BuildpackError>;

/// All errors that can occur during a build
#[derive(Error, Debug)]
pub enum BuildpackError {
    // Resolution errors
    #[error("no valid dependency for id {id}, version {constraint}, and stack {stack}")]
    DependencyResolution {
        id: String,
        constraint: String,
        stack: String,
    },

    #[error("invalid version '{value}' for {id}: {reason}")]
    VersionInvalid {
        id: String,
        value: String,
        reason: String,
    },

    // External configuration errors
    #[error("all of $BP_TOMCAT_EXT_CONF_VERSION, $BP_TOMCAT_EXT_CONF_URI, and $BP_TOMCAT_EXT_CONF_SHA256 must be set; missing {missing}")]
    IncompleteExternalConfiguration { missing: String },

    // Cache errors
    #[error("checksum mismatch for {uri}: declared {expected}, computed {actual}")]
    ChecksumMismatch {
        uri: String,
        expected: String,
        actual: String,
    },

    #[error("failed to fetch {uri}: {reason}")]
    Fetch { uri: String, reason: String },

    // Catalog errors
    #[error("invalid catalog at {path}: {reason}")]
    CatalogInvalid { path: PathBuf, reason: String },

    #[error("invalid build plan at {path}: {reason}")]
    BuildPlanInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("invalid path: {path}: {reason}")]
    PathInvalid { path: PathBuf, reason: String },

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl BuildpackError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a resolution error for an (id, constraint, stack) triple
    pub fn resolution(id: impl Into<String>, constraint: Option<&str>, stack: impl Into<String>) -> Self {
        Self::DependencyResolution {
            id: id.into(),
            constraint: constraint.unwrap_or("<any>").to_string(),
            stack: stack.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_display() {
        let err = BuildpackError::resolution("tomcat", Some("9.0.29"), "io.buildpacks.stacks.bionic");
        assert_eq!(
            err.to_string(),
            "no valid dependency for id tomcat, version 9.0.29, and stack io.buildpacks.stacks.bionic"
        );
    }

    #[test]
    fn resolution_display_unconstrained() {
        let err = BuildpackError::resolution("tomcat", None, "test-stack");
        assert!(err.to_string().contains("version <any>"));
    }

    #[test]
    fn incomplete_external_configuration_names_missing() {
        let err = BuildpackError::IncompleteExternalConfiguration {
            missing: "$BP_TOMCAT_EXT_CONF_URI, $BP_TOMCAT_EXT_CONF_SHA256".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("$BP_TOMCAT_EXT_CONF_VERSION"));
        assert!(message.contains("missing $BP_TOMCAT_EXT_CONF_URI, $BP_TOMCAT_EXT_CONF_SHA256"));
    }

    #[test]
    fn checksum_mismatch_display() {
        let err = BuildpackError::ChecksumMismatch {
            uri: "https://example.com/tomcat.tar.gz".to_string(),
            expected: "aa".to_string(),
            actual: "bb".to_string(),
        };
        assert!(err.to_string().contains("declared aa, computed bb"));
    }
}
