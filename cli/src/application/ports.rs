//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::domain::config::IevoConfig;
use crate::domain::error::SchemaError;
use crate::domain::schema::SchemaDocument;

// ── Package filesystem port ───────────────────────────────────────────────────

/// Read-only view of the filesystem an agent package lives on.
///
/// Validation never writes; every method is a query so packages can be
/// checked concurrently without coordination.
pub trait PackageFs {
    /// Whether anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a UTF-8 text file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error unchanged so callers can report it
    /// as a diagnostic.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// All regular files below `root`, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be walked.
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

// ── Schema port ───────────────────────────────────────────────────────────────

/// Where the manifest schema comes from.
pub trait SchemaSource {
    /// Load and decode the schema.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` if the schema is missing or corrupt. This is
    /// an environment failure: no validation can run without a schema.
    fn load_schema(&self) -> Result<SchemaDocument, SchemaError>;

    /// Human-readable origin, for logs and `config show`.
    fn describe(&self) -> String;
}

// ── Config port ───────────────────────────────────────────────────────────────

/// Persistent user configuration.
pub trait ConfigStore {
    /// Load configuration, falling back to defaults when none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if stored configuration exists but cannot be read.
    fn load(&self) -> Result<IevoConfig>;

    /// Persist configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    fn save(&self, config: &IevoConfig) -> Result<()>;

    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
