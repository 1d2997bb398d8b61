//! JSON output helpers.
//!
//! Every `--json` code path prints a single pretty-printed document to
//! stdout. Failures use the error object from [`format_error`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ievo_common::ValidationResult;
use serde::Serialize;

use crate::application::services::package_info::PackageInfo;
use crate::domain::config::IevoConfig;

/// Renders results as JSON on stdout.
pub struct JsonRenderer;

/// Validation outcome for one package.
#[derive(Serialize)]
struct PackageReport<'a> {
    path: String,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

impl JsonRenderer {
    /// Print validation results.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_validation(&self, reports: &[(PathBuf, ValidationResult)]) -> Result<()> {
        println!("{}", format_validation(reports)?);
        Ok(())
    }

    /// Print a package summary.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_info(&self, path: &Path, info: &PackageInfo) -> Result<()> {
        let mut value = serde_json::to_value(info).context("JSON serialization failed")?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "path".to_string(),
                serde_json::Value::String(path.display().to_string()),
            );
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&value).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// Print the current configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &IevoConfig, path: &Path, schema: &str) -> Result<()> {
        let obj = serde_json::json!({
            "path": path.display().to_string(),
            "config": config,
            "schema": schema,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&obj).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// Print the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        let obj = serde_json::json!({ "version": version });
        println!(
            "{}",
            serde_json::to_string_pretty(&obj).context("JSON serialization failed")?
        );
        Ok(())
    }
}

/// Serialize validation results: a single object for one package, an array
/// otherwise.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_validation(reports: &[(PathBuf, ValidationResult)]) -> Result<String> {
    let mut items: Vec<PackageReport<'_>> = reports
        .iter()
        .map(|(path, result)| PackageReport {
            path: path.display().to_string(),
            result,
        })
        .collect();
    let out = if items.len() == 1 {
        serde_json::to_string_pretty(&items.remove(0))
    } else {
        serde_json::to_string_pretty(&items)
    };
    out.context("JSON serialization failed")
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
