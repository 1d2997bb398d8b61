//! Typed domain error enums.
//!
//! These are environment failures: they abort a run instead of becoming
//! diagnostics. All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator.

use thiserror::Error;

// ── Schema errors ─────────────────────────────────────────────────────────────

/// The manifest schema could not be loaded, so no checking is possible.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Schema file not found: {path}")]
    NotFound { path: String },

    #[error("Cannot read schema {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Schema {source_name} is not valid JSON: {reason}")]
    Malformed { source_name: String, reason: String },

    #[error("Schema field '{field}' has invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },

    #[error("Schema field '{field}' declares unknown type '{type_name}'")]
    UnknownType { field: String, type_name: String },

    #[error("Schema lists '{field}' as required but does not declare it")]
    UndeclaredRequired { field: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{hint}")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },
}

// ── Package errors ────────────────────────────────────────────────────────────

/// Errors from commands that need a readable package (not `validate`).
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("No agent.yaml in {0}")]
    ManifestMissing(String),

    #[error("Cannot load agent.yaml in {path}: {reason}")]
    ManifestUnusable { path: String, reason: String },
}
