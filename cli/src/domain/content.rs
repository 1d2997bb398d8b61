//! Content quality heuristics for instruction and log files.
//!
//! Everything here is advisory: findings are warnings or info, never errors.
//! Pure functions only; callers supply file contents.

use ievo_common::{Diagnostic, Stage};

use crate::domain::package::{EVOLUTION_LOG_FILE, INSTRUCTIONS_FILE};

/// Default minimum length of `ROLE.md`, in characters after trimming.
pub const DEFAULT_MIN_CHARS: usize = 50;

/// Words that indicate the file describes what the agent is responsible for.
pub const RESPONSIBILITY_MARKERS: &[&str] = &["responsibilit", "task", "role"];

/// Words that indicate the file sets rules for the agent.
pub const RULE_MARKERS: &[&str] = &["rule", "constraint"];

/// Thresholds for the content checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSettings {
    pub min_chars: usize,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

/// Check the primary instructions file.
#[must_use]
pub fn analyze_instructions(text: &str, settings: &ContentSettings) -> Vec<Diagnostic> {
    let content = text.trim();
    if content.is_empty() {
        return vec![warning("ROLE.md is empty (needs real instructions)")];
    }

    let mut out = Vec::new();
    let chars = content.chars().count();
    if chars < settings.min_chars {
        out.push(warning(format!(
            "ROLE.md is too short ({chars} < {} chars)",
            settings.min_chars
        )));
    }

    let headings = heading_count(content);
    if headings == 0 {
        out.push(warning("ROLE.md should contain a markdown heading"));
    }

    let lower = content.to_lowercase();
    if !RESPONSIBILITY_MARKERS.iter().any(|m| lower.contains(m)) {
        out.push(warning("ROLE.md should describe agent responsibilities"));
    }
    if !RULE_MARKERS.iter().any(|m| lower.contains(m)) {
        out.push(warning("ROLE.md should include rules or constraints"));
    }

    out.push(
        Diagnostic::info(
            Stage::Content,
            format!("ROLE.md: {chars} chars, {headings} headings"),
        )
        .at(INSTRUCTIONS_FILE),
    );
    out
}

/// Check the evolution log.
#[must_use]
pub fn analyze_evolution_log(text: &str) -> Vec<Diagnostic> {
    if text.trim().is_empty() {
        return vec![
            Diagnostic::warning(Stage::Content, "EVOLUTION_LOG.md is empty").at(EVOLUTION_LOG_FILE),
        ];
    }
    vec![
        Diagnostic::info(
            Stage::Content,
            format!("EVOLUTION_LOG.md: {} evolutions recorded", count_evolutions(text)),
        )
        .at(EVOLUTION_LOG_FILE),
    ]
}

/// Number of evolution entries (`## ` headings) in the log.
#[must_use]
pub fn count_evolutions(text: &str) -> usize {
    text.lines().filter(|line| line.starts_with("## ")).count()
}

fn heading_count(content: &str) -> usize {
    content
        .lines()
        .filter(|line| line.trim_start().starts_with('#'))
        .count()
}

fn warning(message: impl Into<String>) -> Diagnostic {
    Diagnostic::warning(Stage::Content, message).at(INSTRUCTIONS_FILE)
}
