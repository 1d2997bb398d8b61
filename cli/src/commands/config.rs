//! `ievo config` — show and set configuration values.

use anyhow::Result;
use clap::Subcommand;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::{ConfigStore, SchemaSource};
use crate::application::services::config_service;
use crate::infra::schema::SchemaFile;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (content.min_chars, schema.path)
        key: String,
        /// Configuration value (empty string clears schema.path)
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or written, or if
/// the key or value is invalid.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let path = app.config_store.path()?;
    let schema = SchemaFile::resolve(config.schema.path.as_deref()).describe();
    app.renderer().render_config(&config, &path, &schema)?;
    Ok(ExitCode::SUCCESS)
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<ExitCode> {
    let config = config_service::set_config(&app.config_store, key, value)?;
    if app.is_json() {
        let path = app.config_store.path()?;
        let schema = SchemaFile::resolve(config.schema.path.as_deref()).describe();
        app.renderer().render_config(&config, &path, &schema)?;
    } else {
        app.output.success(&format!("Set {key} = {value}"));
    }
    Ok(ExitCode::SUCCESS)
}
