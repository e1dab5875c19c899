//! Tomcat Buildpack
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tomcat_buildpack::cli::{Cli, Commands};
use tomcat_buildpack::error::BuildpackResult;
use tracing_subscriber::EnvFilter;

/// Exit code the platform reads as "detection failed"
const DETECT_FAILED: u8 = 100;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> BuildpackResult<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("tomcat_buildpack=warn"),
        1 => EnvFilter::new("tomcat_buildpack=info"),
        _ => EnvFilter::new("tomcat_buildpack=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Detect(args) => {
            if tomcat_buildpack::cli::commands::detect(args).await? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(DETECT_FAILED))
            }
        }
        Commands::Build(args) => {
            tomcat_buildpack::cli::commands::build(args).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
