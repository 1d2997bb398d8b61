//! `ievo validate` — check one or more agent packages.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::application::ports::SchemaSource;
use crate::application::services::{config_service, package_validate};
use crate::infra::schema::SchemaFile;

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Agent package directories to validate
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Run the validate command.
///
/// Exits with failure when any package has at least one error.
///
/// # Errors
///
/// Returns an error if the configuration or the manifest schema cannot be
/// loaded. Problems with the packages themselves are diagnostics, not errors.
pub async fn run(app: &AppContext, args: ValidateArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let source = SchemaFile::resolve(config.schema.path.as_deref());
    let schema = source
        .load_schema()
        .with_context(|| format!("cannot load manifest schema ({})", source.describe()))?;
    debug!(schema = %source.describe(), packages = args.paths.len(), "validating");

    let reports = package_validate::validate_packages(
        app.fs,
        Arc::new(schema),
        config.content_settings(),
        args.paths,
    )
    .await?;

    app.renderer().render_validation(&reports)?;

    if reports.iter().all(|(_, result)| result.is_valid()) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
