//! Application service — summarise an agent package for `ievo info`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use serde_yaml::Value;

use crate::application::ports::PackageFs;
use crate::application::services::package_validate::{ManifestLoad, load_manifest};
use crate::domain::content::count_evolutions;
use crate::domain::error::PackageError;
use crate::domain::manifest::ManifestDocument;
use crate::domain::package::EVOLUTION_LOG_FILE;

/// Manifest summary plus a file inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    /// `primary` or `primary → fallback`.
    pub model: Option<String>,
    pub dependencies: Vec<String>,
    pub files: FileInventory,
    /// Entries in `EVOLUTION_LOG.md`, when the log exists and is readable.
    pub evolutions: Option<usize>,
}

/// File counts below the package root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileInventory {
    pub total: usize,
    pub markdown: usize,
    pub yaml: usize,
}

/// Gather information about the package at `root`.
///
/// # Errors
///
/// Returns an error if the manifest is missing or cannot be decoded, or if
/// the package tree cannot be walked.
pub fn read_package_info(fs: &impl PackageFs, root: &Path) -> Result<PackageInfo> {
    let doc = match load_manifest(fs, root) {
        ManifestLoad::Parsed(doc) => doc,
        ManifestLoad::Absent => {
            return Err(PackageError::ManifestMissing(root.display().to_string()).into());
        }
        ManifestLoad::Failed(diagnostic) => {
            return Err(PackageError::ManifestUnusable {
                path: root.display().to_string(),
                reason: diagnostic.message().to_string(),
            }
            .into());
        }
    };

    let files = inventory(&fs.list_files(root)?);
    let evolutions = fs
        .read_to_string(&root.join(EVOLUTION_LOG_FILE))
        .ok()
        .map(|text| count_evolutions(&text));

    Ok(PackageInfo {
        name: string_field(&doc, "name"),
        version: string_field(&doc, "version"),
        description: string_field(&doc, "description"),
        category: string_field(&doc, "category"),
        author: string_field(&doc, "author"),
        model: model_summary(doc.get("model")),
        dependencies: dependencies(&doc),
        files,
        evolutions,
    })
}

fn string_field(doc: &ManifestDocument, field: &str) -> Option<String> {
    doc.get_str(field).map(str::to_string)
}

fn model_summary(model: Option<&Value>) -> Option<String> {
    match model? {
        Value::String(tier) => Some(tier.clone()),
        Value::Mapping(m) => {
            let primary = m.get("primary").and_then(Value::as_str).unwrap_or("?");
            match m.get("fallback").and_then(Value::as_str) {
                Some(fallback) => Some(format!("{primary} → {fallback}")),
                None => Some(primary.to_string()),
            }
        }
        _ => None,
    }
}

fn dependencies(doc: &ManifestDocument) -> Vec<String> {
    doc.get("dependencies")
        .and_then(Value::as_sequence)
        .map(|deps| {
            deps.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn inventory(files: &[PathBuf]) -> FileInventory {
    FileInventory {
        total: files.len(),
        markdown: files.iter().filter(|p| has_extension(p, &["md"])).count(),
        yaml: files
            .iter()
            .filter(|p| has_extension(p, &["yaml", "yml"]))
            .count(),
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.contains(&e))
}
