//! Integration tests for the inlay CLI

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use serial_test::serial;
    use std::path::Path;
    use tempfile::TempDir;

    fn inlay() -> Command {
        cargo_bin_cmd!("inlay")
    }

    /// Write a config pointing store, document root, and timings at a
    /// temp workspace, so tests never touch the user's real state.
    fn write_workspace(temp: &TempDir) -> std::path::PathBuf {
        let assets = temp.path().join("assets");
        std::fs::create_dir_all(&assets).unwrap();
        std::fs::write(assets.join("app.css"), "body { margin: 0 }").unwrap();
        std::fs::write(assets.join("app.js"), "console.log(1)").unwrap();

        let config_path = temp.path().join("config.toml");
        let config = format!(
            r#"
[cache]
store_path = "{store}"
defer_prune_ms = 0

[fetch]
document_root = "{root}"

[save]
base_delay_ms = 0
step_delay_ms = 0
"#,
            store = temp.path().join("store.json").display(),
            root = assets.display(),
        );
        std::fs::write(&config_path, config).unwrap();
        config_path
    }

    fn inlay_in(config: &Path) -> Command {
        let mut cmd = inlay();
        cmd.env("INLAY_CONFIG", config);
        cmd
    }

    #[test]
    fn help_displays() {
        inlay()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Local asset cache"));
    }

    #[test]
    fn version_displays() {
        inlay()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("inlay"));
    }

    #[test]
    #[serial]
    fn status_runs() {
        // Status against the default store location should never panic
        let _ = inlay().arg("status").assert();
    }

    #[test]
    #[serial]
    fn config_path_shows_default() {
        inlay()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_prints_toml() {
        let temp = TempDir::new().unwrap();
        let config = write_workspace(&temp);

        inlay_in(&config)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("[loader]")
                    .and(predicate::str::contains("css_sync = true")),
            );
    }

    #[test]
    fn first_load_writes_tags_and_fills_the_cache() {
        let temp = TempDir::new().unwrap();
        let config = write_workspace(&temp);

        // Defaults sync both kinds: first load emits write-tags
        inlay_in(&config)
            .args(["load", "app.css", "app.js"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains(r#"<link href="app.css" rel="stylesheet">"#)
                    .and(predicate::str::contains(r#"<script src="app.js"></script>"#)),
            );

        // The lazy saves ran before exit, so the second load inlines
        inlay_in(&config)
            .args(["load", "app.css", "app.js"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("<style>body { margin: 0 }</style>")
                    .and(predicate::str::contains("<script>console.log(1)</script>")),
            );
    }

    #[test]
    fn force_fetch_inlines_immediately() {
        let temp = TempDir::new().unwrap();
        let config = write_workspace(&temp);

        inlay_in(&config)
            .args(["load", "app.css", "--force-fetch"])
            .assert()
            .success()
            .stdout(predicate::str::contains("<style>body { margin: 0 }</style>"));
    }

    #[test]
    fn missing_asset_falls_back_to_raw_tag() {
        let temp = TempDir::new().unwrap();
        let config = write_workspace(&temp);

        inlay_in(&config)
            .args(["load", "absent.css", "--force-fetch"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"<link href="absent.css" rel="stylesheet">"#,
            ));
    }

    #[test]
    fn emission_order_matches_argument_order() {
        let temp = TempDir::new().unwrap();
        let config = write_workspace(&temp);

        let output = inlay_in(&config)
            .args(["load", "app.css", "app.js", "--force-fetch"])
            .output()
            .unwrap();
        let stdout = String::from_utf8(output.stdout).unwrap();

        let css = stdout.find("<style>").unwrap();
        let js = stdout.find("<script>").unwrap();
        assert!(css < js, "css must be emitted before js:\n{}", stdout);
    }

    #[test]
    fn flush_clears_cached_entries() {
        let temp = TempDir::new().unwrap();
        let config = write_workspace(&temp);

        inlay_in(&config)
            .args(["load", "app.css", "--force-fetch"])
            .assert()
            .success();

        inlay_in(&config)
            .args(["flush", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("flushed 1"));

        inlay_in(&config)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Entries: 0"));
    }

    #[test]
    fn flush_on_empty_cache_reports_nothing_to_do() {
        let temp = TempDir::new().unwrap();
        let config = write_workspace(&temp);

        inlay_in(&config)
            .args(["flush", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached entries"));
    }

    #[test]
    fn load_requires_files() {
        inlay().arg("load").assert().failure();
    }

    #[test]
    fn out_writes_fragment_to_file() {
        let temp = TempDir::new().unwrap();
        let config = write_workspace(&temp);
        let out = temp.path().join("fragment.html");

        inlay_in(&config)
            .args(["load", "app.css", "--force-fetch", "--out"])
            .arg(&out)
            .assert()
            .success();

        let fragment = std::fs::read_to_string(&out).unwrap();
        assert!(fragment.contains("<style>body { margin: 0 }</style>"));
    }
}
