//! Build-time configuration
//!
//! Every environment lookup happens once, here, at the process boundary.
//! Resolution logic receives an explicit `BuildConfig` value and stays pure.

use crate::catalog::{Catalog, Dependency};
use crate::error::{BuildpackError, BuildpackResult};
use semver::Version;

pub const CONTEXT_PATH_VAR: &str = "BP_TOMCAT_CONTEXT_PATH";
pub const EXT_CONF_VERSION_VAR: &str = "BP_TOMCAT_EXT_CONF_VERSION";
pub const EXT_CONF_URI_VAR: &str = "BP_TOMCAT_EXT_CONF_URI";
pub const EXT_CONF_SHA256_VAR: &str = "BP_TOMCAT_EXT_CONF_SHA256";
pub const STACK_VAR: &str = "CNB_STACK_ID";

/// Catalog id consulted when no environment override is present
pub const EXTERNAL_CONFIGURATION_DEPENDENCY: &str = "tomcat-external-configuration";

/// Configuration captured from the environment at startup
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    /// Target stack the build runs against
    pub stack: String,

    /// Raw context-path override, normalized later by the contribution
    pub context_path: Option<String>,

    /// Complete external-configuration triple, if one was supplied
    pub external_configuration: Option<ExternalConfigurationOverride>,
}

/// User-supplied replacement for the catalog's external configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalConfigurationOverride {
    pub version: String,
    pub uri: String,
    pub sha256: String,
}

impl BuildConfig {
    /// Capture configuration from the process environment
    pub fn from_env() -> BuildpackResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Capture configuration from an arbitrary lookup.
    ///
    /// The external-configuration triple is all-or-nothing and is validated
    /// here, before any I/O is attempted.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> BuildpackResult<Self> {
        let version = lookup(EXT_CONF_VERSION_VAR);
        let uri = lookup(EXT_CONF_URI_VAR);
        let sha256 = lookup(EXT_CONF_SHA256_VAR);

        let external_configuration = match (version, uri, sha256) {
            (Some(version), Some(uri), Some(sha256)) => Some(ExternalConfigurationOverride {
                version,
                uri,
                sha256,
            }),
            (None, None, None) => None,
            (version, uri, sha256) => {
                let mut missing = Vec::new();
                if version.is_none() {
                    missing.push(format!("${}", EXT_CONF_VERSION_VAR));
                }
                if uri.is_none() {
                    missing.push(format!("${}", EXT_CONF_URI_VAR));
                }
                if sha256.is_none() {
                    missing.push(format!("${}", EXT_CONF_SHA256_VAR));
                }
                return Err(BuildpackError::IncompleteExternalConfiguration {
                    missing: missing.join(", "),
                });
            }
        };

        Ok(Self {
            stack: lookup(STACK_VAR).unwrap_or_default(),
            context_path: lookup(CONTEXT_PATH_VAR),
            external_configuration,
        })
    }
}

/// Decide where external configuration comes from: the environment triple,
/// the named catalog substitute, or nowhere.
pub fn resolve_external_configuration(
    config: &BuildConfig,
    catalog: &Catalog,
) -> BuildpackResult<Option<Dependency>> {
    if let Some(ref over) = config.external_configuration {
        let version =
            Version::parse(&over.version).map_err(|e| BuildpackError::VersionInvalid {
                id: EXTERNAL_CONFIGURATION_DEPENDENCY.to_string(),
                value: over.version.clone(),
                reason: e.to_string(),
            })?;

        return Ok(Some(Dependency {
            id: EXTERNAL_CONFIGURATION_DEPENDENCY.to_string(),
            name: "Tomcat External Configuration".to_string(),
            version,
            uri: over.uri.clone(),
            sha256: over.sha256.clone(),
            stacks: vec![config.stack.clone()],
            licenses: vec![],
        }));
    }

    if !catalog.contains(EXTERNAL_CONFIGURATION_DEPENDENCY) {
        return Ok(None);
    }

    catalog
        .best(EXTERNAL_CONFIGURATION_DEPENDENCY, None, &config.stack)
        .map(Some)
}
