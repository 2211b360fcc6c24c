//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use retrial_ops::{MismatchReport, OperationResult, RecordReport, VerifyReport};
use retrial_types::{ColorChoice, DependencyDiff, OutputFormat};
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    format: OutputFormat,
    color_choice: ColorChoice,
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(format: OutputFormat, color_choice: ColorChoice) -> Self {
        Self {
            format,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render operation result
    pub fn render_result(&self, result: &OperationResult) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            return self.render_json(result);
        }

        match result {
            OperationResult::Verified(report) => self.render_verified(report),
            OperationResult::Recorded(report) => self.render_recorded(report),
            OperationResult::DependenciesChanged(report) => self.render_mismatch(report),
        }
    }

    /// Render as JSON
    fn render_json(&self, result: &OperationResult) -> io::Result<()> {
        let json = result.to_json().map_err(io::Error::other)?;
        self.term.write_line(&json)
    }

    fn render_verified(&self, report: &VerifyReport) -> io::Result<()> {
        let message = format!(
            "Verified {} {} in {} ms",
            report.verified,
            plural(report.verified),
            report.duration_ms
        );
        self.term
            .write_line(&self.paint(&Style::new().green().bold(), &message))
    }

    fn render_recorded(&self, report: &RecordReport) -> io::Result<()> {
        let mut message = format!(
            "Recorded checksums for {} {}",
            report.recorded,
            plural(report.recorded)
        );
        if let Some(path) = &report.path {
            message.push_str(&format!(" to {}", path.display()));
        }
        self.term
            .write_line(&self.paint(&Style::new().green().bold(), &message))
    }

    fn render_mismatch(&self, report: &MismatchReport) -> io::Result<()> {
        let diff = &report.diff;
        let heading = format!(
            "Dependency verification failed: {} additional, {} missing, {} changed",
            diff.additional_dependencies.len(),
            diff.missing_dependencies.len(),
            diff.changed_dependencies.len()
        );
        self.term
            .write_line(&self.paint(&Style::new().red().bold(), &heading))?;

        if self.format == OutputFormat::Plain {
            for line in diff.describe() {
                self.term.write_line(&format!("  {line}"))?;
            }
            return Ok(());
        }

        for key in &diff.additional_dependencies {
            let line = format!("  + {key}");
            self.term
                .write_line(&self.paint(&Style::new().green(), &line))?;
        }
        for key in &diff.missing_dependencies {
            let line = format!("  - {key}");
            self.term.write_line(&self.paint(&Style::new().red(), &line))?;
        }
        if !diff.changed_dependencies.is_empty() {
            self.term.write_line(&self.changed_table(diff).to_string())?;
        }
        Ok(())
    }

    /// Table of changed dependencies with expected and actual hashes
    fn changed_table(&self, diff: &DependencyDiff) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if !self.supports_color() {
            table.force_no_tty();
        }

        table.set_header(vec![
            Cell::new("Changed dependency").add_attribute(Attribute::Bold),
            Cell::new("Expected").add_attribute(Attribute::Bold),
            Cell::new("Actual").add_attribute(Attribute::Bold),
        ]);

        for (key, change) in &diff.changed_dependencies {
            table.add_row(vec![
                Cell::new(key.to_string()),
                Cell::new(change.expected.as_str()).fg(Color::Green),
                Cell::new(change.actual.as_str()).fg(Color::Red),
            ]);
        }
        table
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        if self.supports_color() && self.format == OutputFormat::Tty {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Check if color output is supported
    fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "dependency"
    } else {
        "dependencies"
    }
}
