//! End-to-end tests for the qbank-docs binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn qbank_docs() -> Command {
    let mut cmd = Command::cargo_bin("qbank-docs").unwrap();
    cmd.arg("--no-env").arg("--no-color");
    cmd
}

#[test]
fn test_show_prints_defaults() {
    qbank_docs()
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""url": "qbank-api.yaml""#))
        .stdout(predicate::str::contains(r#""deepLinking": true"#))
        .stdout(predicate::str::contains(r#""layout": "StandaloneLayout""#));
}

#[test]
fn test_show_script() {
    qbank_docs()
        .args(["show", "--script"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("window.onload = function() {"))
        .stdout(predicate::str::contains("SwaggerUIStandalonePreset"));
}

#[test]
fn test_render_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("site");

    qbank_docs()
        .arg("render")
        .arg("--out")
        .arg(&out)
        .args(["--title", "QBank Reference"])
        .assert()
        .success();

    let html = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(html.contains("<title>QBank Reference</title>"));
    assert!(out.join("swagger-initializer.js").exists());
}

#[test]
fn test_check_passes_for_defaults() {
    qbank_docs()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration looks usable"));
}

#[test]
fn test_check_fails_for_unknown_layout() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("viewer.toml");
    fs::write(&config, "layout = \"MissingLayout\"\n").unwrap();

    qbank_docs()
        .arg("--config")
        .arg(&config)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MissingLayout"));
}

#[test]
fn test_unknown_preset_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("viewer.json");
    fs::write(&config, r#"{"presets": ["apis", "graphiql"]}"#).unwrap();

    qbank_docs()
        .arg("--config")
        .arg(&config)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("graphiql"));
}

#[test]
fn test_quiet_render_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("site");

    qbank_docs()
        .arg("--quiet")
        .arg("render")
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(out.join("index.html").exists());
}

#[test]
fn test_quiet_check_keeps_only_errors() {
    qbank_docs()
        .args(["--quiet", "check"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("viewer.toml");
    fs::write(&config, "layout = \"MissingLayout\"\n").unwrap();

    qbank_docs()
        .arg("--quiet")
        .arg("--config")
        .arg(&config)
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("MissingLayout"));
}

#[test]
fn test_missing_config_file_is_reported() {
    qbank_docs()
        .args(["--config", "no-such-viewer.toml", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-viewer.toml"));
}
