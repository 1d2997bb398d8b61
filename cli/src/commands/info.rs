//! `ievo info` — summarise an agent package.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::package_info::read_package_info;

/// Arguments for the info command.
#[derive(Args)]
pub struct InfoArgs {
    /// Agent package directory
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Run the info command.
///
/// # Errors
///
/// Returns an error if the package has no usable manifest.
pub fn run(app: &AppContext, args: &InfoArgs) -> Result<ExitCode> {
    let info = read_package_info(&app.fs, &args.path)?;
    app.renderer().render_info(&args.path, &info)?;
    Ok(ExitCode::SUCCESS)
}
