//! Launch process registration
//!
//! The final list of launch commands is handed to the platform through
//! `launch.toml` in the layers directory.

use crate::error::BuildpackResult;
use crate::fsutil;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A named process type mapped to its startup command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    #[serde(rename = "type")]
    pub process_type: String,
    pub command: String,
}

impl Process {
    pub fn new(process_type: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            process_type: process_type.into(),
            command: command.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct LaunchMetadata {
    #[serde(default)]
    processes: Vec<Process>,
}

/// Write the process list to `launch.toml`, atomically
pub fn write_processes(layers_dir: &Path, processes: &[Process]) -> BuildpackResult<()> {
    let metadata = LaunchMetadata {
        processes: processes.to_vec(),
    };
    fsutil::atomic_write(
        &layers_dir.join("launch.toml"),
        toml::to_string_pretty(&metadata)?.as_bytes(),
    )
}
