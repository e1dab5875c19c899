//! Detect command - decide whether this buildpack applies

use crate::cli::args::DetectArgs;
use crate::error::BuildpackResult;
use crate::plan::BuildPlan;
use crate::tomcat::Tomcat;
use tracing::debug;

/// Execute the detect command. Returns whether detection passed.
pub async fn execute(args: DetectArgs) -> BuildpackResult<bool> {
    let plan = BuildPlan::from_file(&args.plan).await?;

    let passed = Tomcat::detect(&args.app, &plan);
    debug!(
        "Detection {} for {}",
        if passed { "passed" } else { "failed" },
        args.app.display()
    );

    Ok(passed)
}
