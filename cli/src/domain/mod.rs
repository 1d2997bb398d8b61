//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod content;
pub mod error;
pub mod manifest;
pub mod package;
pub mod schema;

pub use config::{IevoConfig, validate_config_key, validate_config_value};
pub use content::{ContentSettings, analyze_evolution_log, analyze_instructions};
pub use error::{ConfigError, PackageError, SchemaError};
pub use manifest::{ManifestDocument, ManifestParseError, ValueKind, parse_manifest};
pub use schema::{SchemaDocument, validate_manifest};
