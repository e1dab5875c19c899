//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Tomcat Buildpack
///
/// Contributes an Apache Tomcat distribution plus supporting artifacts to a
/// launch layer for a JVM web application.
#[derive(Parser, Debug)]
#[command(name = "tomcat-buildpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether the application participates in the build
    Detect(DetectArgs),

    /// Contribute the Tomcat layer and launch metadata
    Build(BuildArgs),
}

/// Arguments for the detect command
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// Application directory
    #[arg(long, default_value = ".")]
    pub app: PathBuf,

    /// Build plan path
    #[arg(long)]
    pub plan: PathBuf,
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Layers directory to contribute into
    #[arg(long)]
    pub layers: PathBuf,

    /// Application directory
    #[arg(long, default_value = ".")]
    pub app: PathBuf,

    /// Buildpack root holding the catalog and configuration resources
    #[arg(long)]
    pub buildpack: PathBuf,

    /// Build plan path
    #[arg(long)]
    pub plan: PathBuf,

    /// Artifact cache directory (defaults to the user cache directory)
    #[arg(long)]
    pub cache: Option<PathBuf>,
}
