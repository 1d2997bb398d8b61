//! Integration tests for `ievo info`.

#![allow(clippy::expect_used)]

use predicates::prelude::*;
use tempfile::TempDir;

use crate::fixtures::{complete_package, ievo, write};

#[test]
fn test_info_shows_manifest_summary() {
    let cfg = TempDir::new().expect("temp dir");
    let pkg = complete_package();
    ievo(&cfg)
        .arg("info")
        .arg(pkg.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("dev-agent v1.2.0"))
        .stdout(predicate::str::contains("sonnet → haiku"))
        .stdout(predicate::str::contains("core-agent"));
}

#[test]
fn test_info_json() {
    let cfg = TempDir::new().expect("temp dir");
    let pkg = complete_package();
    let output = ievo(&cfg)
        .args(["info", "--json"])
        .arg(pkg.path())
        .output()
        .expect("run");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["name"], "dev-agent");
    assert_eq!(v["evolutions"], 1);
    assert_eq!(v["files"]["yaml"], 1);
}

#[test]
fn test_info_without_manifest_fails() {
    let cfg = TempDir::new().expect("temp dir");
    let pkg = TempDir::new().expect("temp dir");
    ievo(&cfg)
        .arg("info")
        .arg(pkg.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No agent.yaml"));
}

#[test]
fn test_info_with_broken_manifest_fails() {
    let cfg = TempDir::new().expect("temp dir");
    let pkg = TempDir::new().expect("temp dir");
    write(pkg.path(), "agent.yaml", "name: [oops\n");
    ievo(&cfg)
        .arg("info")
        .arg(pkg.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot load agent.yaml"));
}
