//! Manifest schema model and field-level validation.
//!
//! The schema is a small JSON-Schema-like document (`required`, `properties`
//! with `type`, `enum`, `pattern` and `items`). It is decoded once into a
//! `SchemaDocument` and then only read.
//!
//! Pure functions only: no I/O, no async.

use std::sync::LazyLock;

use ievo_common::{Diagnostic, Stage};
use regex::Regex;
use serde::Deserialize;
use serde_yaml::Value;

use crate::domain::error::SchemaError;
use crate::domain::manifest::{ManifestDocument, ValueKind};

/// Field checked by the version-format rule.
pub const VERSION_FIELD: &str = "version";

/// Field checked by the model-tier rule.
pub const MODEL_FIELD: &str = "model";

/// Tiers used when the schema declares no enumeration for `model`.
pub const DEFAULT_MODEL_TIERS: &[&str] = &["opus", "sonnet", "haiku"];

/// Strict `MAJOR.MINOR.PATCH`, digits only. No prefix, no pre-release.
pub static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Constant pattern, cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("valid regex")
});

// ── Schema document ───────────────────────────────────────────────────────────

/// Declared shape of one manifest field (or of an array element).
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub required: bool,
    /// Accepted kinds. Empty means any kind.
    pub types: Vec<ValueKind>,
    /// Closed set of legal string values. Empty means unrestricted.
    pub enum_values: Vec<String>,
    pub pattern: Option<Regex>,
    /// Element spec for array fields.
    pub items: Option<Box<FieldSpec>>,
}

/// Immutable manifest schema, shared by every validation run in a process.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    title: String,
    fields: Vec<FieldSpec>,
}

#[derive(Deserialize)]
struct RawSchema {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    properties: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct RawProperty {
    #[serde(rename = "type", default)]
    type_decl: Option<TypeDecl>,
    #[serde(rename = "enum", default)]
    enum_values: Vec<String>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    items: Option<Box<RawProperty>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeDecl {
    One(String),
    Many(Vec<String>),
}

impl SchemaDocument {
    /// Decode a schema from JSON text.
    ///
    /// `source_name` is used in error messages (file path or "bundled").
    ///
    /// # Errors
    ///
    /// Returns a `SchemaError` if the text is not a valid schema document.
    pub fn from_json_str(text: &str, source_name: &str) -> Result<Self, SchemaError> {
        let malformed = |e: serde_json::Error| SchemaError::Malformed {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        };
        let raw: RawSchema = serde_json::from_str(text).map_err(malformed)?;

        if let Some(field) = raw
            .required
            .iter()
            .find(|name| !raw.properties.contains_key(name.as_str()))
        {
            return Err(SchemaError::UndeclaredRequired {
                field: field.clone(),
            });
        }

        let mut fields = Vec::with_capacity(raw.properties.len());
        for (name, value) in raw.properties {
            let prop: RawProperty = serde_json::from_value(value).map_err(malformed)?;
            let required = raw.required.contains(&name);
            fields.push(build_field(name, required, prop)?);
        }

        Ok(Self {
            title: raw.title.unwrap_or_else(|| "agent manifest".to_string()),
            fields,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Declared fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Legal model tiers: the `model` enumeration, or the built-in tiers.
    #[must_use]
    pub fn model_tiers(&self) -> Vec<&str> {
        match self.field(MODEL_FIELD) {
            Some(spec) if !spec.enum_values.is_empty() => {
                spec.enum_values.iter().map(String::as_str).collect()
            }
            _ => DEFAULT_MODEL_TIERS.to_vec(),
        }
    }
}

fn build_field(name: String, required: bool, prop: RawProperty) -> Result<FieldSpec, SchemaError> {
    let type_names = match prop.type_decl {
        None => Vec::new(),
        Some(TypeDecl::One(t)) => vec![t],
        Some(TypeDecl::Many(ts)) => ts,
    };
    let mut types = Vec::with_capacity(type_names.len());
    for type_name in type_names {
        let kind = ValueKind::from_schema_name(&type_name).ok_or_else(|| {
            SchemaError::UnknownType {
                field: name.clone(),
                type_name: type_name.clone(),
            }
        })?;
        types.push(kind);
    }

    let pattern = prop
        .pattern
        .map(|p| {
            Regex::new(&p).map_err(|e| SchemaError::InvalidPattern {
                field: name.clone(),
                pattern: p.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()?;

    let items = prop
        .items
        .map(|item| build_field(format!("{name}[]"), false, *item).map(Box::new))
        .transpose()?;

    Ok(FieldSpec {
        name,
        required,
        types,
        enum_values: prop.enum_values,
        pattern,
        items,
    })
}

// ── Validation ────────────────────────────────────────────────────────────────

/// Check a parsed manifest against the schema.
///
/// Every declared field is checked independently, in declaration order,
/// followed by the version-format and model-tier rules. Undeclared fields
/// are accepted. When no errors are found a single info diagnostic records
/// that the manifest passed.
#[must_use]
pub fn validate_manifest(doc: &ManifestDocument, schema: &SchemaDocument) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    for spec in schema.fields() {
        match doc.get(&spec.name) {
            None if spec.required => out.push(
                Diagnostic::error(
                    Stage::Schema,
                    format!("agent.yaml missing required field: {}", spec.name),
                )
                .at(&spec.name),
            ),
            None => {}
            Some(value) => check_value(spec, &spec.name, value, &mut out),
        }
    }

    out.extend(check_version_format(doc));
    out.extend(check_model_tier(doc, schema));

    if !out.iter().any(Diagnostic::is_error) {
        out.push(Diagnostic::info(
            Stage::Schema,
            format!("Manifest passed schema validation ({})", schema.title()),
        ));
    }
    out
}

/// Top-level manifest fields the schema does not declare.
#[must_use]
pub fn undeclared_fields<'a>(doc: &'a ManifestDocument, schema: &SchemaDocument) -> Vec<&'a str> {
    doc.field_names()
        .filter(|name| !schema.is_declared(name))
        .collect()
}

/// Returns `true` if `version` is strictly `MAJOR.MINOR.PATCH`.
#[must_use]
pub fn is_strict_version(version: &str) -> bool {
    VERSION_RE.is_match(version)
}

fn check_value(spec: &FieldSpec, location: &str, value: &Value, out: &mut Vec<Diagnostic>) {
    let actual = ValueKind::of(value);
    if !spec.types.is_empty() && !spec.types.iter().any(|t| t.accepts(actual)) {
        let expected: Vec<&str> = spec.types.iter().map(|t| t.as_str()).collect();
        out.push(type_mismatch(location, &expected.join(" or "), actual));
        return;
    }

    // The model field has its own rule covering both of its forms.
    if spec.name != MODEL_FIELD
        && !spec.enum_values.is_empty()
        && let Some(s) = value.as_str()
        && !spec.enum_values.iter().any(|legal| legal == s)
    {
        let legal: Vec<&str> = spec.enum_values.iter().map(String::as_str).collect();
        out.push(not_in_set(location, s, &legal));
    }

    if let (Some(re), Some(s)) = (&spec.pattern, value.as_str())
        && !re.is_match(s)
    {
        out.push(
            Diagnostic::error(
                Stage::Schema,
                format!("Invalid {location}: {s} (must match {})", re.as_str()),
            )
            .at(location),
        );
    }

    if let (Some(item_spec), Value::Sequence(items)) = (&spec.items, value) {
        for (i, item) in items.iter().enumerate() {
            check_value(item_spec, &format!("{location}[{i}]"), item, out);
        }
    }
}

fn check_version_format(doc: &ManifestDocument) -> Option<Diagnostic> {
    let version = doc.get_str(VERSION_FIELD)?;
    if is_strict_version(version) {
        return None;
    }
    Some(
        Diagnostic::error(
            Stage::Schema,
            format!("Invalid version format: {version} (must be MAJOR.MINOR.PATCH)"),
        )
        .at(VERSION_FIELD),
    )
}

/// `model` is either a tier name or a mapping with `primary` and an
/// optional `fallback` tier.
fn check_model_tier(doc: &ManifestDocument, schema: &SchemaDocument) -> Vec<Diagnostic> {
    let tiers = schema.model_tiers();
    match doc.get(MODEL_FIELD) {
        Some(Value::String(tier)) => check_tier(MODEL_FIELD, tier, &tiers).into_iter().collect(),
        Some(Value::Mapping(model)) => {
            let mut out = Vec::new();
            match model.get("primary") {
                None => out.push(
                    Diagnostic::error(
                        Stage::Schema,
                        "model mapping is missing 'primary' tier".to_string(),
                    )
                    .at("model.primary"),
                ),
                Some(primary) => out.extend(check_tier_value("model.primary", primary, &tiers)),
            }
            if let Some(fallback) = model.get("fallback") {
                out.extend(check_tier_value("model.fallback", fallback, &tiers));
            }
            out
        }
        // Missing or wrongly typed: already reported by the field checks.
        _ => Vec::new(),
    }
}

fn check_tier_value(location: &str, value: &Value, tiers: &[&str]) -> Option<Diagnostic> {
    match value.as_str() {
        Some(tier) => check_tier(location, tier, tiers),
        None => Some(type_mismatch(location, "string", ValueKind::of(value))),
    }
}

fn check_tier(location: &str, tier: &str, tiers: &[&str]) -> Option<Diagnostic> {
    (!tiers.contains(&tier)).then(|| not_in_set(location, tier, tiers))
}

fn type_mismatch(location: &str, expected: &str, actual: ValueKind) -> Diagnostic {
    Diagnostic::error(
        Stage::Schema,
        format!("{location}: expected {expected}, found {actual}"),
    )
    .at(location)
}

fn not_in_set(location: &str, value: &str, legal: &[&str]) -> Diagnostic {
    Diagnostic::error(
        Stage::Schema,
        format!("Invalid {location}: {value} (must be one of: {})", legal.join(", ")),
    )
    .at(location)
}

// ── Unit tests ────────────────────────────────────────────────────────────────
