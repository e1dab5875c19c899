//! Version resolution
//!
//! Selects exactly one descriptor for an (id, constraint, stack) triple.
//! Resolution is side-effect free and deterministic for a given catalog.

use crate::catalog::{Catalog, Dependency};
use crate::error::{BuildpackError, BuildpackResult};
use tracing::debug;

impl Catalog {
    /// Select the best descriptor for `id` on `stack`.
    ///
    /// An exact `constraint` must match exactly. Unconstrained resolution
    /// prefers the catalog's declared default version when it is available
    /// for the stack, otherwise the highest version by semver ordering.
    pub fn best(
        &self,
        id: &str,
        constraint: Option<&str>,
        stack: &str,
    ) -> BuildpackResult<Dependency> {
        let candidates: Vec<&Dependency> = self
            .dependencies()
            .iter()
            .filter(|d| d.id == id && d.supports_stack(stack))
            .collect();

        if candidates.is_empty() {
            return Err(BuildpackError::resolution(id, constraint, stack));
        }

        if let Some(exact) = constraint {
            return candidates
                .iter()
                .find(|d| d.version.to_string() == exact)
                .map(|d| (*d).clone())
                .ok_or_else(|| BuildpackError::resolution(id, constraint, stack));
        }

        if let Some(default) = self.default_version(id) {
            if let Some(found) = candidates.iter().find(|d| d.version.to_string() == default) {
                return Ok((*found).clone());
            }
            debug!(
                "Default version {} for {} not available on {}, using highest",
                default, id, stack
            );
        }

        candidates
            .into_iter()
            .max_by(|a, b| a.version.cmp(&b.version))
            .cloned()
            .ok_or_else(|| BuildpackError::resolution(id, constraint, stack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;
    use std::collections::HashMap;

    fn dependency(id: &str, version: &str, stacks: &[&str]) -> Dependency {
        Dependency {
            id: id.to_string(),
            name: id.to_string(),
            version: Version::parse(version).unwrap(),
            uri: format!("https://example.com/{}-{}.tar.gz", id, version),
            sha256: format!("{}-{}", id, version),
            stacks: stacks.iter().map(|s| s.to_string()).collect(),
            licenses: vec![],
        }
    }

    fn catalog(deps: Vec<Dependency>, defaults: &[(&str, &str)]) -> Catalog {
        let default_versions: HashMap<String, String> = defaults
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Catalog::new(deps, default_versions)
    }

    #[test]
    fn resolves_stack_compatible_descriptor() {
        let catalog = catalog(
            vec![
                dependency("tomcat", "9.0.29", &["bionic"]),
                dependency("tomcat", "9.0.29", &["cflinuxfs3"]),
            ],
            &[],
        );

        let resolved = catalog.best("tomcat", None, "cflinuxfs3").unwrap();
        assert!(resolved.supports_stack("cflinuxfs3"));
    }

    #[test]
    fn unknown_id_errors() {
        let catalog = catalog(vec![dependency("tomcat", "9.0.29", &["bionic"])], &[]);

        let err = catalog.best("jetty", None, "bionic").unwrap_err();
        assert!(matches!(err, BuildpackError::DependencyResolution { .. }));
    }

    #[test]
    fn unsupported_stack_errors() {
        let catalog = catalog(vec![dependency("tomcat", "9.0.29", &["bionic"])], &[]);

        let result = catalog.best("tomcat", None, "windows");
        assert!(result.is_err());
    }

    #[test]
    fn exact_constraint_matches() {
        let catalog = catalog(
            vec![
                dependency("tomcat", "8.5.49", &["bionic"]),
                dependency("tomcat", "9.0.29", &["bionic"]),
            ],
            &[],
        );

        let resolved = catalog.best("tomcat", Some("8.5.49"), "bionic").unwrap();
        assert_eq!(resolved.version.to_string(), "8.5.49");
    }

    #[test]
    fn exact_constraint_without_match_errors() {
        let catalog = catalog(vec![dependency("tomcat", "9.0.29", &["bionic"])], &[]);

        let err = catalog.best("tomcat", Some("7.0.0"), "bionic").unwrap_err();
        assert_eq!(
            err.to_string(),
            "no valid dependency for id tomcat, version 7.0.0, and stack bionic"
        );
    }

    #[test]
    fn unconstrained_prefers_declared_default() {
        let catalog = catalog(
            vec![
                dependency("tomcat", "8.5.49", &["bionic"]),
                dependency("tomcat", "9.0.29", &["bionic"]),
            ],
            &[("tomcat", "8.5.49")],
        );

        let resolved = catalog.best("tomcat", None, "bionic").unwrap();
        assert_eq!(resolved.version.to_string(), "8.5.49");
    }

    #[test]
    fn unconstrained_without_default_picks_highest() {
        let catalog = catalog(
            vec![
                dependency("tomcat", "8.5.49", &["bionic"]),
                dependency("tomcat", "10.0.1", &["bionic"]),
                dependency("tomcat", "9.0.29", &["bionic"]),
            ],
            &[],
        );

        let resolved = catalog.best("tomcat", None, "bionic").unwrap();
        assert_eq!(resolved.version.to_string(), "10.0.1");
    }

    #[test]
    fn default_not_on_stack_falls_back_to_highest() {
        let catalog = catalog(
            vec![
                dependency("tomcat", "8.5.49", &["bionic"]),
                dependency("tomcat", "9.0.29", &["cflinuxfs3"]),
            ],
            &[("tomcat", "9.0.29")],
        );

        let resolved = catalog.best("tomcat", None, "bionic").unwrap();
        assert_eq!(resolved.version.to_string(), "8.5.49");
    }

    #[test]
    fn semver_ordering_not_lexicographic() {
        let catalog = catalog(
            vec![
                dependency("tomcat", "9.0.9", &["bionic"]),
                dependency("tomcat", "9.0.29", &["bionic"]),
            ],
            &[],
        );

        let resolved = catalog.best("tomcat", None, "bionic").unwrap();
        assert_eq!(resolved.version.to_string(), "9.0.29");
    }

    #[test]
    fn deterministic_across_calls() {
        let catalog = catalog(
            vec![
                dependency("tomcat", "9.0.29", &["bionic"]),
                dependency("tomcat", "9.0.27", &["bionic"]),
            ],
            &[],
        );

        let first = catalog.best("tomcat", None, "bionic").unwrap();
        let second = catalog.best("tomcat", None, "bionic").unwrap();
        assert_eq!(first, second);
    }
}
