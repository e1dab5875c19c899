//! Integration tests for the Tomcat buildpack CLI

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn buildpack() -> Command {
        cargo_bin_cmd!("tomcat-buildpack")
    }

    #[test]
    fn help_displays() {
        buildpack()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Tomcat"));
    }

    #[test]
    fn version_displays() {
        buildpack()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("tomcat-buildpack"));
    }

    #[test]
    fn detect_passes_for_servlet_application() {
        let temp = TempDir::new().unwrap();
        let app = temp.path().join("app");
        fs::create_dir_all(app.join("WEB-INF")).unwrap();

        let plan = temp.path().join("plan.toml");
        fs::write(&plan, "[jvm-application]\n").unwrap();

        buildpack()
            .args(["detect", "--app"])
            .arg(&app)
            .arg("--plan")
            .arg(&plan)
            .assert()
            .success();
    }

    #[test]
    fn detect_fails_without_web_inf() {
        let temp = TempDir::new().unwrap();
        let app = temp.path().join("app");
        fs::create_dir_all(&app).unwrap();

        let plan = temp.path().join("plan.toml");
        fs::write(&plan, "[jvm-application]\n").unwrap();

        buildpack()
            .args(["detect", "--app"])
            .arg(&app)
            .arg("--plan")
            .arg(&plan)
            .assert()
            .code(100);
    }

    #[test]
    fn detect_fails_without_plan_entry() {
        let temp = TempDir::new().unwrap();
        let app = temp.path().join("app");
        fs::create_dir_all(app.join("WEB-INF")).unwrap();

        let plan = temp.path().join("plan.toml");
        fs::write(&plan, "").unwrap();

        buildpack()
            .args(["detect", "--app"])
            .arg(&app)
            .arg("--plan")
            .arg(&plan)
            .assert()
            .code(100);
    }

    #[test]
    fn detect_missing_plan_file_errors() {
        let temp = TempDir::new().unwrap();
        let app = temp.path().join("app");
        fs::create_dir_all(app.join("WEB-INF")).unwrap();

        buildpack()
            .args(["detect", "--app"])
            .arg(&app)
            .arg("--plan")
            .arg(temp.path().join("missing.toml"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn build_skips_non_servlet_application() {
        let temp = TempDir::new().unwrap();
        let app = temp.path().join("app");
        fs::create_dir_all(&app).unwrap();

        let buildpack_dir = temp.path().join("buildpack");
        fs::create_dir_all(&buildpack_dir).unwrap();
        fs::write(
            buildpack_dir.join("buildpack.toml"),
            "[buildpack]\nid = \"tomcat-buildpack\"\n",
        )
        .unwrap();

        let plan = temp.path().join("plan.toml");
        fs::write(&plan, "").unwrap();

        buildpack()
            .args(["build", "--layers"])
            .arg(temp.path().join("layers"))
            .arg("--app")
            .arg(&app)
            .arg("--buildpack")
            .arg(&buildpack_dir)
            .arg("--plan")
            .arg(&plan)
            .assert()
            .success();
    }

    #[test]
    fn build_with_partial_override_triple_errors() {
        let temp = TempDir::new().unwrap();
        let app = temp.path().join("app");
        fs::create_dir_all(app.join("WEB-INF")).unwrap();

        let buildpack_dir = temp.path().join("buildpack");
        fs::create_dir_all(&buildpack_dir).unwrap();
        fs::write(
            buildpack_dir.join("buildpack.toml"),
            "[buildpack]\nid = \"tomcat-buildpack\"\n",
        )
        .unwrap();

        let plan = temp.path().join("plan.toml");
        fs::write(&plan, "[jvm-application]\n").unwrap();

        buildpack()
            .env("BP_TOMCAT_EXT_CONF_VERSION", "1.0.0")
            .env_remove("BP_TOMCAT_EXT_CONF_URI")
            .env_remove("BP_TOMCAT_EXT_CONF_SHA256")
            .args(["build", "--layers"])
            .arg(temp.path().join("layers"))
            .arg("--app")
            .arg(&app)
            .arg("--buildpack")
            .arg(&buildpack_dir)
            .arg("--plan")
            .arg(&plan)
            .assert()
            .failure()
            .stderr(predicate::str::contains("must be set"));
    }
}
