//! Aggregated outcome of validating one agent package.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::diagnostic::{Diagnostic, Severity, Stage};

/// Ordered diagnostics for one package.
///
/// Validity is derived from the diagnostics on every call; there is no
/// separate flag that could disagree with the error list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Concatenate per-stage diagnostics in the order the stages are given.
    #[must_use]
    pub fn from_stages<I>(stages: I) -> Self
    where
        I: IntoIterator<Item = Vec<Diagnostic>>,
    {
        Self {
            diagnostics: stages.into_iter().flatten().collect(),
        }
    }

    /// All diagnostics in emission order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics of one severity, in emission order.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity() == severity)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn infos(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Info)
    }

    /// Diagnostics produced by one pipeline stage, in emission order.
    pub fn from_stage(&self, stage: Stage) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.stage() == stage)
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    #[must_use]
    pub fn info_count(&self) -> usize {
        self.infos().count()
    }

    /// `true` iff no error-severity diagnostic exists.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let errors: Vec<&Diagnostic> = self.errors().collect();
        let warnings: Vec<&Diagnostic> = self.warnings().collect();
        let info: Vec<&Diagnostic> = self.infos().collect();

        let mut s = serializer.serialize_struct("ValidationResult", 4)?;
        s.serialize_field("valid", &self.is_valid())?;
        s.serialize_field("errors", &errors)?;
        s.serialize_field("warnings", &warnings)?;
        s.serialize_field("info", &info)?;
        s.end()
    }
}
