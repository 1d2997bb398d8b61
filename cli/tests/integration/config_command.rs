//! Integration tests for `ievo config`.
//!
//! Every test points `IEVO_CONFIG` at a temp path so they never read or
//! write `~/.ievo/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use predicates::prelude::*;
use tempfile::TempDir;

use crate::fixtures::ievo;

#[test]
fn test_config_help_shows_show_and_set_subcommands() {
    let cfg = TempDir::new().expect("temp dir");
    ievo(&cfg)
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    let cfg = TempDir::new().expect("temp dir");
    ievo(&cfg)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("content.min_chars:"))
        .stdout(predicate::str::contains("50"))
        .stdout(predicate::str::contains("(bundled)"));
}

#[test]
fn test_config_set_then_show() {
    let cfg = TempDir::new().expect("temp dir");
    ievo(&cfg)
        .args(["config", "set", "content.min_chars", "120"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set content.min_chars = 120"));

    let written = std::fs::read_to_string(cfg.path().join("config.yaml")).expect("config file");
    assert!(written.contains("min_chars: 120"), "{written}");

    let output = ievo(&cfg)
        .args(["config", "show", "--json"])
        .output()
        .expect("run");
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["config"]["content"]["min_chars"], 120);
}

#[test]
fn test_config_set_unknown_key_fails() {
    let cfg = TempDir::new().expect("temp dir");
    ievo(&cfg)
        .args(["config", "set", "security.level", "strict"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting"));
    assert!(!cfg.path().join("config.yaml").exists());
}

#[test]
fn test_config_set_invalid_value_fails() {
    let cfg = TempDir::new().expect("temp dir");
    ievo(&cfg)
        .args(["config", "set", "content.min_chars", "zero"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("positive integer"));
}

#[test]
fn test_config_schema_path_is_used_by_validate() {
    let cfg = TempDir::new().expect("temp dir");
    let missing = cfg.path().join("missing.json");
    ievo(&cfg)
        .args(["config", "set", "schema.path"])
        .arg(&missing)
        .assert()
        .success();
    ievo(&cfg)
        .args(["validate"])
        .arg(cfg.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Schema file not found"));
}

#[test]
fn test_config_json_error_object() {
    let cfg = TempDir::new().expect("temp dir");
    let output = ievo(&cfg)
        .args(["config", "set", "bogus", "1", "--json"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["error"], true);
}
