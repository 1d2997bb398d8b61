//! Unit tests for the package validation service.
//!
//! Every test runs against [`MemFs`] so the exact set of files on "disk" is
//! explicit in the test body.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ievo_cli::application::services::package_validate::{
    ManifestLoad, check_structure, load_manifest, validate_package, validate_packages,
};
use ievo_cli::domain::content::ContentSettings;
use ievo_common::{Severity, Stage, ValidationResult};

use crate::mocks::{EVOLUTION_LOG, GOOD_ROLE, MINIMAL_MANIFEST, MemFs, bundled_schema};

fn validate(fs: &MemFs, root: &str) -> ValidationResult {
    validate_package(
        fs,
        &bundled_schema(),
        &ContentSettings::default(),
        Path::new(root),
    )
}

fn messages<'a>(it: impl Iterator<Item = &'a ievo_common::Diagnostic>) -> Vec<&'a str> {
    it.map(ievo_common::Diagnostic::message).collect()
}

/// Package with the given manifest and a good ROLE.md, nothing else.
fn with_manifest(yaml: &str) -> MemFs {
    MemFs::package("pkg")
        .file("pkg/agent.yaml", yaml)
        .file("pkg/ROLE.md", GOOD_ROLE)
}

// ── Healthy packages ──────────────────────────────────────────────────────────

#[test]
fn test_healthy_package_is_valid_without_warnings() {
    let result = validate(&MemFs::healthy("pkg"), "pkg");
    assert!(result.is_valid(), "{result:?}");
    assert_eq!(result.warning_count(), 0, "{result:?}");
    let infos = messages(result.infos());
    assert_eq!(infos.len(), 3, "{infos:?}");
    assert_eq!(
        infos[0],
        "Manifest passed schema validation (iEvo agent manifest)"
    );
    assert!(infos[1].starts_with("ROLE.md: "), "{infos:?}");
    assert!(infos[1].ends_with(" chars, 3 headings"), "{infos:?}");
    assert_eq!(infos[2], "EVOLUTION_LOG.md: 2 evolutions recorded");
}

#[test]
fn test_minimal_manifest_without_optional_files_is_valid_with_warnings() {
    let result = validate(&with_manifest(MINIMAL_MANIFEST), "pkg");
    assert!(result.is_valid(), "{result:?}");
    assert_eq!(result.error_count(), 0);
    assert!(result.warning_count() >= 4, "{result:?}");
    let warnings = messages(result.warnings());
    assert!(warnings.contains(&"Missing recommended file: memory/CONTEXT.md"));
    assert!(
        warnings.contains(&"Missing recommended file: skills/evo/SKILL.md (agent won't self-evolve)")
    );
}

#[test]
fn test_stage_order_is_structure_manifest_content() {
    let result = validate(&with_manifest("name: x\nversion: \"1.2\"\nmodel: sonnet\n"), "pkg");
    let stages: Vec<Stage> = result.diagnostics().iter().map(|d| d.stage()).collect();
    let mut sorted = stages.clone();
    sorted.sort();
    assert_eq!(stages, sorted, "diagnostics must follow stage order");
}

// ── Structural check ──────────────────────────────────────────────────────────

#[test]
fn test_missing_manifest_gives_single_structural_error() {
    let fs = MemFs::package("pkg").file("pkg/ROLE.md", GOOD_ROLE);
    let result = validate(&fs, "pkg");
    assert!(!result.is_valid());
    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1, "{result:?}");
    assert_eq!(errors[0].stage(), Stage::Structure);
    assert!(errors[0].message().contains("agent.yaml"));
    assert_eq!(result.from_stage(Stage::Schema).count(), 0);
}

#[test]
fn test_empty_directory_is_invalid_without_schema_diagnostics() {
    let result = validate(&MemFs::package("pkg"), "pkg");
    assert!(!result.is_valid());
    assert!(
        result
            .errors()
            .filter(|d| d.stage() == Stage::Structure)
            .count()
            >= 2
    );
    assert_eq!(result.from_stage(Stage::Schema).count(), 0);
    assert_eq!(result.from_stage(Stage::Manifest).count(), 0);
}

#[test]
fn test_missing_root_gives_exactly_one_error() {
    let result = validate(&MemFs::new(), "nowhere");
    assert_eq!(result.diagnostics().len(), 1, "{result:?}");
    assert_eq!(
        result.diagnostics()[0].message(),
        "Package directory not found: nowhere"
    );
}

#[test]
fn test_root_that_is_a_file_gives_exactly_one_error() {
    let fs = MemFs::new().file("pkg", "not a dir");
    let result = validate(&fs, "pkg");
    assert_eq!(result.diagnostics().len(), 1, "{result:?}");
    assert_eq!(result.diagnostics()[0].message(), "Not a directory: pkg");
}

#[test]
fn test_structure_reports_required_before_recommended() {
    let diagnostics = check_structure(&MemFs::package("pkg"), Path::new("pkg"));
    let severities: Vec<Severity> = diagnostics.iter().map(|d| d.severity()).collect();
    assert_eq!(&severities[..2], &[Severity::Error, Severity::Error]);
    assert!(severities[2..].iter().all(|s| *s == Severity::Warning));
    assert_eq!(diagnostics[0].location(), Some("agent.yaml"));
    assert_eq!(diagnostics[1].location(), Some("ROLE.md"));
}

// ── Manifest parsing ──────────────────────────────────────────────────────────

#[test]
fn test_malformed_manifest_gives_one_manifest_error_and_no_schema_diagnostics() {
    let result = validate(&with_manifest("name: [unclosed\n"), "pkg");
    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1, "{result:?}");
    assert_eq!(errors[0].stage(), Stage::Manifest);
    assert!(errors[0].message().starts_with("Invalid YAML in agent.yaml"));
    assert_eq!(result.from_stage(Stage::Schema).count(), 0);
}

#[test]
fn test_non_mapping_manifest_is_a_manifest_error() {
    let result = validate(&with_manifest("- just\n- a list\n"), "pkg");
    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message(),
        "agent.yaml must be a YAML mapping (found array)"
    );
    assert_eq!(result.from_stage(Stage::Schema).count(), 0);
}

#[test]
fn test_manifest_unreadable_after_existence_check() {
    let fs = MemFs::package("pkg")
        .unreadable("pkg/agent.yaml")
        .file("pkg/ROLE.md", GOOD_ROLE);
    assert!(matches!(
        load_manifest(&fs, Path::new("pkg")),
        ManifestLoad::Failed(_)
    ));
    let result = validate(&fs, "pkg");
    let errors = messages(result.errors());
    assert_eq!(errors.len(), 1, "{result:?}");
    assert!(errors[0].starts_with("Cannot read agent.yaml"));
}

#[test]
fn test_absent_manifest_loads_as_absent() {
    let fs = MemFs::package("pkg");
    assert_eq!(load_manifest(&fs, Path::new("pkg")), ManifestLoad::Absent);
}

// ── Schema rules ──────────────────────────────────────────────────────────────

#[test]
fn test_model_outside_tiers_is_one_error_citing_legal_set() {
    let result = validate(&with_manifest("name: x\nversion: 1.0.0\nmodel: gpt\n"), "pkg");
    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1, "{result:?}");
    assert_eq!(
        errors[0].message(),
        "Invalid model: gpt (must be one of: opus, sonnet, haiku)"
    );
    assert_eq!(errors[0].location(), Some("model"));
}

#[test]
fn test_every_model_tier_is_accepted() {
    for tier in ["opus", "sonnet", "haiku"] {
        let yaml = format!("name: x\nversion: 1.0.0\nmodel: {tier}\n");
        let result = validate(&with_manifest(&yaml), "pkg");
        assert!(result.is_valid(), "{tier}: {result:?}");
    }
}

#[test]
fn test_model_mapping_with_bad_fallback() {
    let yaml = "name: x\nversion: 1.0.0\nmodel:\n  primary: opus\n  fallback: turbo\n";
    let result = validate(&with_manifest(yaml), "pkg");
    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1, "{result:?}");
    assert_eq!(errors[0].location(), Some("model.fallback"));
}

#[test]
fn test_version_formats() {
    for bad in ["1.2", "v1.2.3", "1.2.3-beta"] {
        let yaml = format!("name: x\nversion: \"{bad}\"\nmodel: sonnet\n");
        let result = validate(&with_manifest(&yaml), "pkg");
        let errors = messages(result.errors());
        assert_eq!(
            errors,
            vec![format!("Invalid version format: {bad} (must be MAJOR.MINOR.PATCH)").as_str()],
            "{bad}"
        );
    }
    let result = validate(&with_manifest("name: x\nversion: \"1.2.3\"\nmodel: sonnet\n"), "pkg");
    assert!(result.is_valid(), "{result:?}");
}

#[test]
fn test_missing_required_field_is_reported() {
    let result = validate(&with_manifest("name: x\nmodel: sonnet\n"), "pkg");
    assert_eq!(
        messages(result.errors()),
        vec!["agent.yaml missing required field: version"]
    );
}

#[test]
fn test_unknown_fields_are_accepted() {
    let yaml = "name: x\nversion: 1.0.0\nmodel: sonnet\nhomepage: https://example.org\n";
    let result = validate(&with_manifest(yaml), "pkg");
    assert!(result.is_valid(), "{result:?}");
}

// ── Content ───────────────────────────────────────────────────────────────────

#[test]
fn test_short_role_only_warns() {
    let fs = MemFs::package("pkg")
        .file("pkg/agent.yaml", MINIMAL_MANIFEST)
        .file("pkg/ROLE.md", "# Hi\n");
    let result = validate(&fs, "pkg");
    assert!(result.is_valid());
    assert!(
        messages(result.warnings()).contains(&"ROLE.md is too short (4 < 50 chars)"),
        "{result:?}"
    );
}

#[test]
fn test_min_chars_setting_is_honoured() {
    let fs = with_manifest(MINIMAL_MANIFEST);
    let strict = ContentSettings { min_chars: 10_000 };
    let result = validate_package(&fs, &bundled_schema(), &strict, Path::new("pkg"));
    assert!(
        messages(result.warnings())
            .iter()
            .any(|m| m.starts_with("ROLE.md is too short"))
    );
}

#[test]
fn test_unreadable_role_is_an_error() {
    let fs = MemFs::package("pkg")
        .file("pkg/agent.yaml", MINIMAL_MANIFEST)
        .unreadable("pkg/ROLE.md");
    let result = validate(&fs, "pkg");
    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1, "{result:?}");
    assert_eq!(errors[0].stage(), Stage::Content);
    assert!(errors[0].message().starts_with("Cannot read ROLE.md"));
}

#[test]
fn test_unreadable_evolution_log_is_a_warning() {
    let fs = with_manifest(MINIMAL_MANIFEST).unreadable("pkg/EVOLUTION_LOG.md");
    let result = validate(&fs, "pkg");
    assert!(result.is_valid());
    assert!(
        messages(result.warnings())
            .iter()
            .any(|m| m.starts_with("Cannot read EVOLUTION_LOG.md"))
    );
}

#[test]
fn test_evolution_count_is_reported() {
    let fs = with_manifest(MINIMAL_MANIFEST).file("pkg/EVOLUTION_LOG.md", EVOLUTION_LOG);
    let result = validate(&fs, "pkg");
    assert!(messages(result.infos()).contains(&"EVOLUTION_LOG.md: 2 evolutions recorded"));
}

// ── Determinism and parallelism ───────────────────────────────────────────────

#[test]
fn test_repeated_runs_are_identical() {
    let fs = with_manifest("name: Bad_Name\nversion: 1.0\nmodel: gpt\n");
    let first = validate(&fs, "pkg");
    let second = validate(&fs, "pkg");
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_parallel_results_follow_argument_order() {
    let fs = MemFs::healthy("good")
        .merge(MemFs::package("empty"))
        .merge(MemFs::healthy("also-good"));
    let roots: Vec<PathBuf> = ["empty", "good", "missing", "also-good"]
        .iter()
        .map(PathBuf::from)
        .collect();

    let results = validate_packages(
        fs.clone(),
        Arc::new(bundled_schema()),
        ContentSettings::default(),
        roots.clone(),
    )
    .await
    .expect("validation tasks");

    let order: Vec<&PathBuf> = results.iter().map(|(p, _)| p).collect();
    assert_eq!(order, roots.iter().collect::<Vec<_>>());
    let valid: Vec<bool> = results.iter().map(|(_, r)| r.is_valid()).collect();
    assert_eq!(valid, vec![false, true, false, true]);

    // Same answer as the sequential path.
    for (root, result) in &results {
        assert_eq!(result, &validate(&fs, root.to_str().unwrap()));
    }
}
