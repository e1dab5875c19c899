//! Per-dependency layer contributions
//!
//! A closed set of variants, one per dependency kind, held in a fixed order
//! by the assembly. Each writes its own side effects against the shared
//! layer root.

use crate::error::{BuildpackError, BuildpackResult};
use crate::fsutil;
use crate::layer::{Contributor, Layer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default mount name when no context path is configured
pub const DEFAULT_CONTEXT_PATH: &str = "ROOT";

const ACCESS_LOGGING_PROFILE: &str = r#"ENABLED=${BPL_TOMCAT_ACCESS_LOGGING:=n}

if [[ "${ENABLED}" = "n" ]]; then
	return
fi

printf "Tomcat Access Logging enabled\n"

export JAVA_OPTS="${JAVA_OPTS} -Daccess.logging.enabled=enabled"
"#;

/// One contribution per dependency kind
#[derive(Debug)]
pub enum TomcatContribution {
    /// The server distribution: extracted archive, configuration files,
    /// application mount, scratch space, launch environment
    Distribution {
        buildpack_root: PathBuf,
        application_root: PathBuf,
        context_path: String,
    },

    /// Access-logging jar plus the profile script that enables it at launch
    AccessLoggingSupport,

    /// Lifecycle-support jar on the server library path
    LifecycleSupport,

    /// Logging jar on the server classpath plus logging configuration
    LoggingSupport { buildpack_root: PathBuf },

    /// User-supplied configuration archive unpacked over the layer
    ExternalConfiguration,
}

impl Contributor for TomcatContribution {
    fn contribute(&self, artifact: &Path, layer: &Layer) -> BuildpackResult<()> {
        match self {
            Self::Distribution {
                buildpack_root,
                application_root,
                context_path,
            } => contribute_distribution(artifact, layer, buildpack_root, application_root, context_path),
            Self::AccessLoggingSupport => contribute_access_logging_support(artifact, layer),
            Self::LifecycleSupport => contribute_lifecycle_support(artifact, layer),
            Self::LoggingSupport { buildpack_root } => {
                contribute_logging_support(artifact, layer, buildpack_root)
            }
            Self::ExternalConfiguration => contribute_external_configuration(artifact, layer),
        }
    }
}

fn contribute_distribution(
    artifact: &Path,
    layer: &Layer,
    buildpack_root: &Path,
    application_root: &Path,
    context_path: &str,
) -> BuildpackResult<()> {
    debug!("Extracting to {}", layer.root().display());
    fsutil::extract_tar_gz(artifact, layer.root(), 1)?;

    // The stock webapps are replaced by the application mount
    let webapps = layer.root().join("webapps");
    if webapps.exists() {
        fs::remove_dir_all(&webapps)
            .map_err(|e| BuildpackError::io(format!("removing {}", webapps.display()), e))?;
    }

    debug!("Copying context.xml to {}/conf", layer.root().display());
    fsutil::copy_file(
        &buildpack_root.join("conf").join("context.xml"),
        &layer.root().join("conf").join("context.xml"),
    )?;

    debug!("Copying server.xml to {}/conf", layer.root().display());
    fsutil::copy_file(
        &buildpack_root.join("conf").join("server.xml"),
        &layer.root().join("conf").join("server.xml"),
    )?;

    let web_xml = buildpack_root.join("conf").join("web.xml");
    if web_xml.is_file() {
        debug!("Copying web.xml to {}/conf", layer.root().display());
        fsutil::copy_file(&web_xml, &layer.root().join("conf").join("web.xml"))?;
    }

    let temp = layer.root().join("temp");
    fs::create_dir_all(&temp)
        .map_err(|e| BuildpackError::io(format!("creating directory {}", temp.display()), e))?;

    let mount = webapps.join(context_path);
    debug!("Mounting application at {}", mount.display());
    fsutil::write_symlink(application_root, &mount)?;

    layer.override_launch_env("CATALINA_BASE", &layer.root().to_string_lossy())
}

fn contribute_access_logging_support(artifact: &Path, layer: &Layer) -> BuildpackResult<()> {
    let name = fsutil::file_name(artifact);
    debug!("Copying {} to {}/lib", name, layer.root().display());
    fsutil::copy_file(artifact, &layer.root().join("lib").join(&name))?;

    layer.write_profile("access-logging", ACCESS_LOGGING_PROFILE)
}

fn contribute_lifecycle_support(artifact: &Path, layer: &Layer) -> BuildpackResult<()> {
    let name = fsutil::file_name(artifact);
    debug!("Copying {} to {}/lib", name, layer.root().display());
    fsutil::copy_file(artifact, &layer.root().join("lib").join(&name))
}

fn contribute_logging_support(
    artifact: &Path,
    layer: &Layer,
    buildpack_root: &Path,
) -> BuildpackResult<()> {
    let name = fsutil::file_name(artifact);
    let destination = layer.root().join("bin").join(&name);
    debug!("Copying {} to {}/bin", name, layer.root().display());
    fsutil::copy_file(artifact, &destination)?;

    debug!("Copying logging.properties to {}/conf", layer.root().display());
    fsutil::copy_file(
        &buildpack_root.join("conf").join("logging.properties"),
        &layer.root().join("conf").join("logging.properties"),
    )?;

    debug!("Writing {}/bin/setenv.sh", layer.root().display());
    fsutil::write_executable(
        &layer.root().join("bin").join("setenv.sh"),
        &format!("#!/bin/sh\n\nCLASSPATH=$CLASSPATH:{}\n", destination.display()),
    )
}

fn contribute_external_configuration(artifact: &Path, layer: &Layer) -> BuildpackResult<()> {
    debug!("Extracting external configuration to {}", layer.root().display());
    fsutil::extract_tar_gz(artifact, layer.root(), 1)
}

/// The mount name must be a single path segment: one leading separator is
/// dropped and the remaining separators become `#`. Empty input maps to the
/// default segment.
pub fn normalize_context_path(raw: &str) -> String {
    let stripped = raw.strip_prefix('/').unwrap_or(raw);
    if stripped.is_empty() {
        DEFAULT_CONTEXT_PATH.to_string()
    } else {
        stripped.replace('/', "#")
    }
}
