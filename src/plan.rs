//! Build plan entries passed by the platform
//!
//! Earlier lifecycle phases record what the application needs as named plan
//! entries, optionally carrying a version request.

use crate::error::{BuildpackError, BuildpackResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Parsed build plan
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildPlan {
    #[serde(flatten)]
    entries: HashMap<String, PlanEntry>,
}

/// A single named plan entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanEntry {
    /// Requested version, if the requiring buildpack pinned one
    #[serde(default)]
    pub version: Option<String>,
}

impl BuildPlan {
    /// Read the plan file handed to the build
    pub async fn from_file(path: &Path) -> BuildpackResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BuildpackError::io(format!("reading build plan {}", path.display()), e))?;

        Self::parse(&content).map_err(|e| BuildpackError::BuildPlanInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Parse a plan from TOML contents
    pub fn parse(content: &str) -> BuildpackResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Whether the plan carries an entry named `id`
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Version requested for `id`, if any
    pub fn version(&self, id: &str) -> Option<&str> {
        self.entries.get(id).and_then(|e| e.version.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_entries() {
        let plan = BuildPlan::parse(
            r#"
[jvm-application]

[tomcat]
version = "9.0.29"
"#,
        )
        .unwrap();

        assert!(plan.contains("jvm-application"));
        assert!(plan.contains("tomcat"));
        assert!(!plan.contains("jetty"));
        assert_eq!(plan.version("tomcat"), Some("9.0.29"));
        assert_eq!(plan.version("jvm-application"), None);
    }

    #[test]
    fn parse_empty_plan() {
        let plan = BuildPlan::parse("").unwrap();
        assert!(!plan.contains("jvm-application"));
    }

    #[tokio::test]
    async fn from_file_missing_errors() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = BuildPlan::from_file(&temp.path().join("plan.toml")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn from_file_reads_plan() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("plan.toml");
        std::fs::write(&path, "[jvm-application]\n").unwrap();

        let plan = BuildPlan::from_file(&path).await.unwrap();
        assert!(plan.contains("jvm-application"));
    }
}
