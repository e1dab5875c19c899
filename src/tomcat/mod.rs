//! Tomcat assembly
//!
//! Detects a servlet application, resolves the full dependency set up
//! front, and contributes everything to a single `catalina-base` layer
//! before registering the launch processes.

pub mod contribution;

pub use contribution::{normalize_context_path, TomcatContribution};

use crate::cache::ArtifactCache;
use crate::catalog::{Catalog, Dependency};
use crate::config::{resolve_external_configuration, BuildConfig};
use crate::error::BuildpackResult;
use crate::launch::{write_processes, Process};
use crate::layer::{Layer, LayerContributor, LayerFlags};
use crate::plan::BuildPlan;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Server distribution dependency id
pub const TOMCAT_DEPENDENCY: &str = "tomcat";

/// Access-logging support dependency id
pub const ACCESS_LOGGING_SUPPORT_DEPENDENCY: &str = "tomcat-access-logging-support";

/// Lifecycle support dependency id
pub const LIFECYCLE_SUPPORT_DEPENDENCY: &str = "tomcat-lifecycle-support";

/// Logging support dependency id
pub const LOGGING_SUPPORT_DEPENDENCY: &str = "tomcat-logging-support";

/// Build-plan prerequisite contributed by the JVM application buildpack
pub const JVM_APPLICATION_PLAN_ENTRY: &str = "jvm-application";

/// Name of the shared layer everything is contributed to
pub const LAYER_NAME: &str = "catalina-base";

const START_COMMAND: &str = "catalina.sh run";

/// Directories and configuration handed to the build by the platform
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub application_root: PathBuf,
    pub buildpack_root: PathBuf,
    pub layers_dir: PathBuf,
    pub config: BuildConfig,
}

/// A resolved Tomcat instance ready to contribute
pub struct Tomcat {
    context: BuildContext,
    entries: Vec<(Dependency, TomcatContribution)>,
}

impl Tomcat {
    /// Preconditions for participating in the build: a `jvm-application`
    /// plan entry and a `WEB-INF` directory in the application.
    pub fn detect(application_root: &Path, plan: &BuildPlan) -> bool {
        if !plan.contains(JVM_APPLICATION_PLAN_ENTRY) {
            debug!("No {} plan entry", JVM_APPLICATION_PLAN_ENTRY);
            return false;
        }

        if !application_root.join("WEB-INF").is_dir() {
            debug!("No WEB-INF in {}", application_root.display());
            return false;
        }

        true
    }

    /// Resolve the full dependency set. Returns `None` when the application
    /// does not participate in the build.
    pub fn new(
        context: BuildContext,
        catalog: &Catalog,
        plan: &BuildPlan,
    ) -> BuildpackResult<Option<Self>> {
        if !Self::detect(&context.application_root, plan) {
            return Ok(None);
        }

        let stack = context.config.stack.as_str();

        let tomcat = catalog.best(TOMCAT_DEPENDENCY, plan.version(TOMCAT_DEPENDENCY), stack)?;
        let access_logging = catalog.best(ACCESS_LOGGING_SUPPORT_DEPENDENCY, None, stack)?;
        let lifecycle = catalog.best(LIFECYCLE_SUPPORT_DEPENDENCY, None, stack)?;
        let logging = catalog.best(LOGGING_SUPPORT_DEPENDENCY, None, stack)?;
        let external = resolve_external_configuration(&context.config, catalog)?;

        let context_path =
            normalize_context_path(context.config.context_path.as_deref().unwrap_or(""));

        let mut entries = vec![
            (
                tomcat,
                TomcatContribution::Distribution {
                    buildpack_root: context.buildpack_root.clone(),
                    application_root: context.application_root.clone(),
                    context_path,
                },
            ),
            (access_logging, TomcatContribution::AccessLoggingSupport),
            (lifecycle, TomcatContribution::LifecycleSupport),
            (
                logging,
                TomcatContribution::LoggingSupport {
                    buildpack_root: context.buildpack_root.clone(),
                },
            ),
        ];

        if let Some(external) = external {
            entries.push((external, TomcatContribution::ExternalConfiguration));
        }

        Ok(Some(Self { context, entries }))
    }

    /// The resolved descriptor set, in contribution order
    pub fn dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.entries.iter().map(|(dependency, _)| dependency)
    }

    /// Contribute the layer and register the launch processes
    pub async fn contribute(&self, cache: &ArtifactCache) -> BuildpackResult<()> {
        let layer = Layer::new(&self.context.layers_dir, LAYER_NAME);

        info!("Contributing {} layer", layer.name());
        LayerContributor::new(cache)
            .contribute(&layer, &self.entries, LayerFlags::LAUNCH)
            .await?;

        write_processes(
            &self.context.layers_dir,
            &[
                Process::new("task", START_COMMAND),
                Process::new("tomcat", START_COMMAND),
                Process::new("web", START_COMMAND),
            ],
        )
    }
}
