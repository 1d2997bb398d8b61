//! Manifest schema loading — implements the `SchemaSource` port.
//!
//! The schema ships inside the binary. An override file can be selected with
//! `IEVO_SCHEMA` or the `schema.path` config key; the environment wins.

use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::application::ports::SchemaSource;
use crate::domain::error::SchemaError;
use crate::domain::schema::SchemaDocument;

/// Environment variable that overrides the schema location.
pub const SCHEMA_ENV: &str = "IEVO_SCHEMA";

/// Schema compiled into the binary.
pub const BUNDLED_SCHEMA: &str = include_str!("../../schemas/agent.schema.json");

const BUNDLED_NAME: &str = "bundled agent.schema.json";

/// Schema from the bundled copy or from a file on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaFile {
    path: Option<PathBuf>,
}

impl SchemaFile {
    /// The schema compiled into the binary.
    #[must_use]
    pub fn bundled() -> Self {
        Self { path: None }
    }

    /// A schema file on disk.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Pick the schema location: `IEVO_SCHEMA`, then the configured path,
    /// then the bundled copy. Empty values are ignored.
    #[must_use]
    pub fn resolve(configured: Option<&str>) -> Self {
        let from_env = std::env::var(SCHEMA_ENV).ok().filter(|v| !v.is_empty());
        match from_env.as_deref().or(configured.filter(|v| !v.is_empty())) {
            Some(path) => Self::at(path),
            None => Self::bundled(),
        }
    }
}

impl SchemaSource for SchemaFile {
    fn load_schema(&self) -> Result<SchemaDocument, SchemaError> {
        debug!(source = %self.describe(), "loading manifest schema");
        let Some(path) = &self.path else {
            return SchemaDocument::from_json_str(BUNDLED_SCHEMA, BUNDLED_NAME);
        };
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SchemaError::NotFound {
                path: path.display().to_string(),
            },
            _ => SchemaError::Unreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;
        SchemaDocument::from_json_str(&text, &path.display().to_string())
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => BUNDLED_NAME.to_string(),
        }
    }
}
