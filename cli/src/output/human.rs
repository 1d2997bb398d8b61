//! Human-readable terminal renderer.

use std::path::{Path, PathBuf};

use ievo_common::{Diagnostic, Severity, ValidationResult};
use owo_colors::OwoColorize as _;

use crate::application::services::package_info::PackageInfo;
use crate::domain::config::IevoConfig;
use crate::infra::config::CONFIG_ENV;
use crate::infra::schema::SCHEMA_ENV;
use crate::output::OutputContext;

/// Renders results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version.
    pub fn render_version(&self, version: &str) {
        println!("ievo {version}");
    }

    /// Render validation results for one or more packages.
    ///
    /// In quiet mode only errors and the verdict of invalid packages are
    /// printed.
    pub fn render_validation(&self, reports: &[(PathBuf, ValidationResult)]) {
        for (path, result) in reports {
            self.render_package(path, result);
        }
        if reports.len() > 1 && !self.ctx.quiet {
            let valid = reports.iter().filter(|(_, r)| r.is_valid()).count();
            println!("  {}", format_totals(valid, reports.len()).style(self.ctx.styles.bold));
            println!();
        }
    }

    fn render_package(&self, path: &Path, result: &ValidationResult) {
        let quiet = self.ctx.quiet;
        if quiet && result.is_valid() {
            return;
        }

        println!();
        println!(
            "  {}",
            format!("Validating {}", path.display()).style(self.ctx.styles.header)
        );
        println!();

        for d in result.errors() {
            self.print_diagnostic(d);
        }
        if !quiet {
            for d in result.warnings() {
                self.print_diagnostic(d);
            }
            for d in result.infos() {
                self.print_diagnostic(d);
            }
        }

        println!();
        let summary = format_summary(result);
        if result.is_valid() {
            println!("  {} {summary}", "✓".style(self.ctx.styles.success));
        } else {
            println!("  {} {summary}", "✗".style(self.ctx.styles.error));
        }
        println!();
    }

    fn print_diagnostic(&self, d: &Diagnostic) {
        let styles = &self.ctx.styles;
        match d.severity() {
            Severity::Error => println!("    {} {}", "✗".style(styles.error), d.message()),
            Severity::Warning => println!("    {} {}", "⚠".style(styles.warning), d.message()),
            Severity::Info => println!(
                "    {} {}",
                "ℹ".style(styles.info),
                d.message().style(styles.dim)
            ),
        }
    }

    /// Render a package summary.
    pub fn render_info(&self, path: &Path, info: &PackageInfo) {
        let unset = "—";
        println!();
        self.ctx.header(&format!(
            "{} v{}",
            info.name.as_deref().unwrap_or("(unnamed)"),
            info.version.as_deref().unwrap_or("?")
        ));
        println!();
        self.ctx.kv("Path:        ", &path.display().to_string());
        self.ctx
            .kv("Description: ", info.description.as_deref().unwrap_or(unset));
        self.ctx
            .kv("Category:    ", info.category.as_deref().unwrap_or(unset));
        self.ctx
            .kv("Author:      ", info.author.as_deref().unwrap_or(unset));
        self.ctx
            .kv("Model:       ", info.model.as_deref().unwrap_or(unset));
        let deps = if info.dependencies.is_empty() {
            unset.to_string()
        } else {
            info.dependencies.join(", ")
        };
        self.ctx.kv("Dependencies:", &deps);
        self.ctx.kv(
            "Files:       ",
            &format!(
                "{} total ({} markdown, {} yaml)",
                info.files.total, info.files.markdown, info.files.yaml
            ),
        );
        let evolutions = info
            .evolutions
            .map_or_else(|| "no evolution log".to_string(), |n| n.to_string());
        self.ctx.kv("Evolutions:  ", &evolutions);
        println!();
    }

    /// Render the current configuration.
    pub fn render_config(&self, config: &IevoConfig, path: &Path, schema: &str) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<20} {}", "content.min_chars:", config.content.min_chars);
        println!(
            "  {:<20} {}",
            "schema.path:",
            config.schema.path.as_deref().unwrap_or("(bundled)")
        );
        println!("  {:<20} {schema}", "schema in use:");
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [CONFIG_ENV, SCHEMA_ENV, "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}

// ── Display helpers ───────────────────────────────────────────────────────────

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// One-line verdict for a package, e.g. `Invalid: 2 errors, 1 warning`.
#[must_use]
pub fn format_summary(result: &ValidationResult) -> String {
    let warnings = plural(result.warning_count(), "warning");
    if result.is_valid() {
        format!("Valid ({warnings})")
    } else {
        format!(
            "Invalid: {}, {warnings}",
            plural(result.error_count(), "error")
        )
    }
}

/// Totals line printed after several packages.
#[must_use]
pub fn format_totals(valid: usize, total: usize) -> String {
    format!("{valid} of {} valid", plural(total, "package"))
}
