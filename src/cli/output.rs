//! Output formatting for CLI commands.
//!
//! This module renders parsed plans as text tables or JSON documents.

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::error::Result;
use crate::parser::{Inspection, Recognition};
use crate::plan::{ActionKind, ChangeType, PlanDigest, PlanTotals, ResourceChange};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
    /// Truncation width for addresses in tables.
    max_address_width: usize,
}

/// Change row for table display.
#[derive(Tabled)]
struct ChangeRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Section")]
    section: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Address")]
    address: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self {
            format,
            max_address_width: 80,
        }
    }

    /// Sets the address truncation width.
    #[must_use]
    pub const fn with_max_address_width(mut self, width: usize) -> Self {
        self.max_address_width = width;
        self
    }

    /// Formats a list of changes.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn format_list(
        &self,
        inspection: &Inspection,
        changes: &[&ResourceChange],
        show_diff: bool,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&ListJson {
                generated_at: Utc::now(),
                digest: &inspection.digest,
                summary: &inspection.plan.summary,
                changes,
            })?),
            OutputFormat::Text => Ok(self.format_list_text(inspection, changes, show_diff)),
        }
    }

    /// Formats a list as text.
    fn format_list_text(
        &self,
        inspection: &Inspection,
        changes: &[&ResourceChange],
        show_diff: bool,
    ) -> String {
        let mut output = String::new();

        if changes.is_empty() {
            let _ = writeln!(output, "{} No matching changes.", "✓".green());
        } else {
            let rows: Vec<ChangeRow> = changes
                .iter()
                .enumerate()
                .map(|(i, c)| ChangeRow {
                    index: i + 1,
                    section: c.change_type.to_string(),
                    action: Self::format_kind(c.kind()),
                    address: truncate(&c.address, self.max_address_width),
                })
                .collect();
            output.push_str(&Table::new(rows).to_string());
            output.push('\n');
        }

        if show_diff {
            for change in changes {
                output.push('\n');
                output.push_str(&Self::format_change_text(change));
            }
        }

        let _ = write!(output, "\n{}\n", inspection.plan.summary.bold());
        output
    }

    /// Formats the full diff of one or more changes.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn format_changes(&self, changes: &[&ResourceChange]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(changes)?),
            OutputFormat::Text => Ok(changes
                .iter()
                .map(|c| Self::format_change_text(c))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Formats one change with a header line and its diff.
    fn format_change_text(change: &ResourceChange) -> String {
        let header = match change.change_type {
            ChangeType::OutsideChange => "changed outside of terraform",
            ChangeType::ActionChange => "planned",
        };
        let mut output = format!(
            "{} {} {}\n",
            "#".dimmed(),
            change.address.bold(),
            format!("({header})").dimmed()
        );
        output.push_str(&Self::color_diff(&change.diff));
        output.push('\n');
        output
    }

    /// Formats the plan summary and counts.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn format_summary(&self, inspection: &Inspection) -> Result<String> {
        let plan = &inspection.plan;
        let counts = KindCounts {
            create: plan.count(ActionKind::Create),
            update: plan.count(ActionKind::Update),
            delete: plan.count(ActionKind::Delete),
            replace: plan.count(ActionKind::Replace),
        };
        let outside = plan.outside_changes().count();
        let actions = plan.action_changes().count();

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&SummaryJson {
                generated_at: Utc::now(),
                digest: &inspection.digest,
                summary: &plan.summary,
                totals: plan.totals,
                outside_changes: outside,
                action_changes: actions,
                counts,
            })?),
            OutputFormat::Text => {
                let mut output = String::new();
                let _ = writeln!(output, "\nPlan {}", inspection.digest.short().dimmed());
                let _ = writeln!(output, "   Outside changes: {outside}");
                let _ = writeln!(output, "   Planned actions: {actions}");
                let _ = writeln!(
                    output,
                    "     {} create, {} update, {} delete, {} replace",
                    counts.create.to_string().green(),
                    counts.update.to_string().yellow(),
                    counts.delete.to_string().red(),
                    counts.replace.to_string().magenta()
                );
                let _ = write!(output, "\n{}\n", plan.summary.bold());
                Ok(output)
            }
        }
    }

    /// Formats the result of recognizing a plan.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn format_recognition(&self, recognition: &Recognition) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&RecognitionJson {
                valid: true,
                recognition,
            })?),
            OutputFormat::Text => {
                let mut output = format!("{} Input is a terraform plan.\n", "✓".green());
                if let Some(legend) = recognition.legend {
                    let rows: Vec<&str> = [
                        (legend.create, ActionKind::Create),
                        (legend.update, ActionKind::Update),
                        (legend.destroy, ActionKind::Delete),
                        (legend.replace, ActionKind::Replace),
                    ]
                    .iter()
                    .filter(|(present, _)| *present)
                    .map(|(_, kind)| kind.symbol())
                    .collect();
                    let _ = writeln!(output, "   Legend symbols: {}", rows.join(" "));
                }
                if recognition.no_changes {
                    let _ = writeln!(output, "   Reports no changes.");
                }
                Ok(output)
            }
        }
    }

    /// Formats an action kind with color.
    fn format_kind(kind: ActionKind) -> String {
        let label = format!("{} {kind}", kind.symbol());
        match kind {
            ActionKind::Create => label.green().to_string(),
            ActionKind::Update => label.yellow().to_string(),
            ActionKind::Delete => label.red().to_string(),
            ActionKind::Replace => label.magenta().to_string(),
        }
    }

    /// Colors diff lines by their leading marker.
    fn color_diff(diff: &str) -> String {
        diff.lines()
            .map(|line| {
                let marker = line.trim_start();
                if marker.starts_with("-/+") {
                    line.magenta().to_string()
                } else if marker.starts_with('+') {
                    line.green().to_string()
                } else if marker.starts_with('~') {
                    line.yellow().to_string()
                } else if marker.starts_with('-') {
                    line.red().to_string()
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Truncates a string to at most `max_len` characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

// JSON serialization helpers

#[derive(Serialize)]
struct ListJson<'a> {
    generated_at: DateTime<Utc>,
    digest: &'a PlanDigest,
    summary: &'a str,
    changes: &'a [&'a ResourceChange],
}

#[derive(Serialize, Clone, Copy)]
struct KindCounts {
    create: usize,
    update: usize,
    delete: usize,
    replace: usize,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    generated_at: DateTime<Utc>,
    digest: &'a PlanDigest,
    summary: &'a str,
    totals: Option<PlanTotals>,
    outside_changes: usize,
    action_changes: usize,
    counts: KindCounts,
}

#[derive(Serialize)]
struct RecognitionJson<'a> {
    valid: bool,
    #[serde(flatten)]
    recognition: &'a Recognition,
}
