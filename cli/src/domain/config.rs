//! Domain types and validators for iEvo configuration.
//!
//! Pure functions only: no I/O, no async.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::content::{ContentSettings, DEFAULT_MIN_CHARS};
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &["content.min_chars", "schema.path"];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.ievo/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IevoConfig {
    /// Content quality thresholds.
    #[serde(default)]
    pub content: ContentConfig,
    /// Manifest schema location.
    #[serde(default)]
    pub schema: SchemaConfig,
}

/// Content quality configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentConfig {
    /// Minimum `ROLE.md` length in characters (default 50).
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            min_chars: default_min_chars(),
        }
    }
}

fn default_min_chars() -> usize {
    DEFAULT_MIN_CHARS
}

/// Schema configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Schema file to use instead of the bundled one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl IevoConfig {
    /// Content thresholds derived from this configuration.
    #[must_use]
    pub fn content_settings(&self) -> ContentSettings {
        ContentSettings {
            min_chars: self.content.min_chars,
        }
    }

    /// Validate and apply `key = value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "content.min_chars" => self.content.min_chars = parse_min_chars(value)?,
            "schema.path" => {
                self.schema.path = (!value.is_empty()).then(|| value.to_string());
            }
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    if key == "content.min_chars" {
        parse_min_chars(value)?;
    }
    Ok(())
}

fn parse_min_chars(value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            key: "content.min_chars".to_string(),
            value: value.to_string(),
            hint: "Expected a positive integer".to_string(),
        }
        .into()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
