//! Agent package layout — which entries a package must or should contain.
//!
//! Pure data, no I/O. The order of each list is the order diagnostics are
//! emitted in.

/// Manifest file, relative to the package root.
pub const MANIFEST_FILE: &str = "agent.yaml";

/// Primary instructions file.
pub const INSTRUCTIONS_FILE: &str = "ROLE.md";

/// Self-evolution history.
pub const EVOLUTION_LOG_FILE: &str = "EVOLUTION_LOG.md";

/// Skill that lets the agent evolve itself.
pub const EVO_SKILL_FILE: &str = "skills/evo/SKILL.md";

/// An entry the structural check looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageEntry {
    /// Path relative to the package root, `/`-separated.
    pub path: &'static str,
    /// Extra context appended to the "missing" message.
    pub note: Option<&'static str>,
}

impl PackageEntry {
    const fn plain(path: &'static str) -> Self {
        Self { path, note: None }
    }
}

/// Missing any of these makes the package invalid.
pub const REQUIRED_ENTRIES: &[PackageEntry] = &[
    PackageEntry::plain(MANIFEST_FILE),
    PackageEntry::plain(INSTRUCTIONS_FILE),
];

/// Missing any of these produces a warning.
pub const RECOMMENDED_ENTRIES: &[PackageEntry] = &[
    PackageEntry::plain(EVOLUTION_LOG_FILE),
    PackageEntry::plain("memory/CONTEXT.md"),
    PackageEntry::plain("memory/DECISIONS.md"),
    PackageEntry::plain("memory/VOCABULARY.md"),
    PackageEntry::plain("memory/HISTORY.md"),
    PackageEntry {
        path: EVO_SKILL_FILE,
        note: Some("agent won't self-evolve"),
    },
];

/// Message for a missing required entry.
#[must_use]
pub fn missing_required_message(entry: &PackageEntry) -> String {
    with_note(format!("Missing required file: {}", entry.path), entry.note)
}

/// Message for a missing recommended entry.
#[must_use]
pub fn missing_recommended_message(entry: &PackageEntry) -> String {
    with_note(format!("Missing recommended file: {}", entry.path), entry.note)
}

fn with_note(message: String, note: Option<&str>) -> String {
    match note {
        Some(note) => format!("{message} ({note})"),
        None => message,
    }
}
