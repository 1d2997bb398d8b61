//! Temp-directory package builders shared by the integration tests.

#![allow(clippy::expect_used, dead_code)]

use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

pub const GOOD_ROLE: &str = "# Dev Agent\n\n\
You are a development agent.\n\n\
## Responsibilities\n- Review pull requests\n\n\
## Rules\n- Never push to main\n";

pub const MINIMAL_MANIFEST: &str = "name: x\nversion: 1.0.0\nmodel: sonnet\n";

/// `ievo` with colors off and no user configuration or schema override.
pub fn ievo(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ievo"));
    cmd.env("NO_COLOR", "1")
        .env("IEVO_CONFIG", config_dir.path().join("config.yaml"))
        .env_remove("IEVO_SCHEMA")
        .env_remove("RUST_LOG");
    cmd
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create dirs");
    }
    std::fs::write(path, content).expect("write file");
}

/// A package with only the required files.
pub fn minimal_package(manifest: &str) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "agent.yaml", manifest);
    write(dir.path(), "ROLE.md", GOOD_ROLE);
    dir
}

/// A package with every recommended file.
pub fn complete_package() -> TempDir {
    let dir = minimal_package(
        "name: dev-agent\nversion: 1.2.0\ndescription: Reviews code\ncategory: dev\n\
         model:\n  primary: sonnet\n  fallback: haiku\ndependencies: [core-agent]\n",
    );
    let root = dir.path();
    write(root, "EVOLUTION_LOG.md", "# Log\n\n## v1\nfirst\n");
    write(root, "skills/evo/SKILL.md", "# Evo\n");
    for name in ["CONTEXT", "DECISIONS", "VOCABULARY", "HISTORY"] {
        write(root, &format!("memory/{name}.md"), "# Memory\n");
    }
    dir
}
