//! Application service — validate one or many agent packages.
//!
//! Runs every stage exactly once per package, in a fixed order:
//! structure → manifest/schema → content. No stage short-circuits the
//! others; the only thing that stops a stage is a missing input (no
//! manifest to parse, no parsed document to check).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use ievo_common::{Diagnostic, Stage, ValidationResult};
use tracing::{debug, debug_span};

use crate::application::ports::PackageFs;
use crate::domain::content::{ContentSettings, analyze_evolution_log, analyze_instructions};
use crate::domain::manifest::{ManifestDocument, parse_manifest};
use crate::domain::package::{
    EVOLUTION_LOG_FILE, INSTRUCTIONS_FILE, MANIFEST_FILE, RECOMMENDED_ENTRIES, REQUIRED_ENTRIES,
    missing_recommended_message, missing_required_message,
};
use crate::domain::schema::{SchemaDocument, undeclared_fields, validate_manifest};

/// Outcome of trying to load `agent.yaml`.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestLoad {
    /// No manifest file. Already reported by the structural check.
    Absent,
    /// Decoded successfully.
    Parsed(ManifestDocument),
    /// Present but unreadable or undecodable.
    Failed(Diagnostic),
}

/// Validate the package rooted at `root`.
///
/// Never fails: every problem with the package becomes a diagnostic.
pub fn validate_package(
    fs: &impl PackageFs,
    schema: &SchemaDocument,
    settings: &ContentSettings,
    root: &Path,
) -> ValidationResult {
    let _span = debug_span!("validate_package", root = %root.display()).entered();

    let structure = check_structure(fs, root);
    debug!(count = structure.len(), "structural check done");

    let manifest = check_manifest(load_manifest(fs, root), schema);
    debug!(count = manifest.len(), "manifest check done");

    let content = check_content(fs, root, settings);
    debug!(count = content.len(), "content check done");

    let result = ValidationResult::from_stages([structure, manifest, content]);
    debug!(
        valid = result.is_valid(),
        errors = result.error_count(),
        warnings = result.warning_count(),
        "validation finished"
    );
    result
}

/// Validate several packages in parallel, one blocking task per package.
///
/// Results come back in the order of `roots`. The schema is shared
/// read-only; packages never wait on each other.
///
/// # Errors
///
/// Returns an error only if a validation task panicked.
pub async fn validate_packages<F>(
    fs: F,
    schema: Arc<SchemaDocument>,
    settings: ContentSettings,
    roots: Vec<PathBuf>,
) -> Result<Vec<(PathBuf, ValidationResult)>>
where
    F: PackageFs + Clone + Send + 'static,
{
    let handles: Vec<_> = roots
        .into_iter()
        .map(|root| {
            let fs = fs.clone();
            let schema = Arc::clone(&schema);
            tokio::task::spawn_blocking(move || {
                let result = validate_package(&fs, &schema, &settings, &root);
                (root, result)
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.context("validation task failed")?);
    }
    Ok(results)
}

// ── Stages ────────────────────────────────────────────────────────────────────

/// Presence of required (error) and recommended (warning) entries.
///
/// A root that is missing or not a directory yields exactly one error and
/// nothing else.
pub fn check_structure(fs: &impl PackageFs, root: &Path) -> Vec<Diagnostic> {
    if !fs.exists(root) {
        return vec![Diagnostic::error(
            Stage::Structure,
            format!("Package directory not found: {}", root.display()),
        )];
    }
    if !fs.is_dir(root) {
        return vec![Diagnostic::error(
            Stage::Structure,
            format!("Not a directory: {}", root.display()),
        )];
    }

    let missing_required = REQUIRED_ENTRIES
        .iter()
        .filter(|entry| !fs.exists(&root.join(entry.path)))
        .map(|entry| {
            Diagnostic::error(Stage::Structure, missing_required_message(entry)).at(entry.path)
        });
    let missing_recommended = RECOMMENDED_ENTRIES
        .iter()
        .filter(|entry| !fs.exists(&root.join(entry.path)))
        .map(|entry| {
            Diagnostic::warning(Stage::Structure, missing_recommended_message(entry))
                .at(entry.path)
        });
    missing_required.chain(missing_recommended).collect()
}

/// Read and decode `agent.yaml`.
pub fn load_manifest(fs: &impl PackageFs, root: &Path) -> ManifestLoad {
    let path = root.join(MANIFEST_FILE);
    if !fs.exists(&path) {
        return ManifestLoad::Absent;
    }
    // The file may vanish or change between the existence check and the
    // read; any read failure is reported rather than treated as absent.
    let text = match fs.read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            return ManifestLoad::Failed(
                Diagnostic::error(Stage::Manifest, format!("Cannot read agent.yaml: {e}"))
                    .at(MANIFEST_FILE),
            );
        }
    };
    match parse_manifest(&text) {
        Ok(doc) => ManifestLoad::Parsed(doc),
        Err(e) => ManifestLoad::Failed(
            Diagnostic::error(Stage::Manifest, e.to_string()).at(MANIFEST_FILE),
        ),
    }
}

/// Schema-check a loaded manifest. Absent or failed manifests are not
/// schema-checked, so a parse failure never cascades into field errors.
pub fn check_manifest(load: ManifestLoad, schema: &SchemaDocument) -> Vec<Diagnostic> {
    match load {
        ManifestLoad::Absent => {
            debug!("no manifest, skipping schema validation");
            Vec::new()
        }
        ManifestLoad::Failed(diagnostic) => {
            debug!(
                reason = diagnostic.message(),
                "manifest unusable, skipping schema validation"
            );
            vec![diagnostic]
        }
        ManifestLoad::Parsed(doc) => {
            for field in undeclared_fields(&doc, schema) {
                debug!(field, "ignoring undeclared manifest field");
            }
            validate_manifest(&doc, schema)
        }
    }
}

/// Content heuristics over whichever text files exist.
pub fn check_content(
    fs: &impl PackageFs,
    root: &Path,
    settings: &ContentSettings,
) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    let role = root.join(INSTRUCTIONS_FILE);
    if fs.exists(&role) {
        match fs.read_to_string(&role) {
            Ok(text) => out.extend(analyze_instructions(&text, settings)),
            Err(e) => out.push(
                Diagnostic::error(Stage::Content, format!("Cannot read ROLE.md: {e}"))
                    .at(INSTRUCTIONS_FILE),
            ),
        }
    }

    let log = root.join(EVOLUTION_LOG_FILE);
    if fs.exists(&log) {
        match fs.read_to_string(&log) {
            Ok(text) => out.extend(analyze_evolution_log(&text)),
            Err(e) => out.push(
                Diagnostic::warning(Stage::Content, format!("Cannot read EVOLUTION_LOG.md: {e}"))
                    .at(EVOLUTION_LOG_FILE),
            ),
        }
    }
    out
}
