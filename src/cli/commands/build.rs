//! Build command - contribute the Tomcat layer

use crate::cache::{ArtifactCache, HttpFetcher};
use crate::catalog::Catalog;
use crate::cli::args::BuildArgs;
use crate::config::BuildConfig;
use crate::error::BuildpackResult;
use crate::plan::BuildPlan;
use crate::tomcat::{BuildContext, Tomcat};
use std::sync::Arc;
use tracing::info;

/// Execute the build command
pub async fn execute(args: BuildArgs) -> BuildpackResult<()> {
    // Environment is read exactly once, before any I/O
    let config = BuildConfig::from_env()?;

    let catalog = Catalog::from_buildpack_root(&args.buildpack).await?;
    let plan = BuildPlan::from_file(&args.plan).await?;

    let context = BuildContext {
        application_root: args.app,
        buildpack_root: args.buildpack,
        layers_dir: args.layers,
        config,
    };

    let Some(tomcat) = Tomcat::new(context, &catalog, &plan)? else {
        info!("Not a servlet application, nothing to contribute");
        return Ok(());
    };

    let cache_root = args.cache.unwrap_or_else(ArtifactCache::default_root);
    let cache = ArtifactCache::new(cache_root, Arc::new(HttpFetcher::new()));

    tomcat.contribute(&cache).await
}
