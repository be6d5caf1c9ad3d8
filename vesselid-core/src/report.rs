//! Report formatting for batch validation output.

use std::fmt::Write;

use serde::Serialize;

use crate::batch::{BatchItem, BatchReport, BatchSummary};
use crate::domain::{IdentifierKind, ValidationResult};

/// Render a batch report as plain text, one line per input.
pub fn render_batch_text(report: &BatchReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{} validation", report.kind);
    for item in &report.results {
        let marker = if item.result.valid { "✓" } else { "✗" };
        let _ = write!(output, "{marker} {}", display_input(&item.input));
        if !item.result.normalized.is_empty() && item.result.normalized != item.input {
            let _ = write!(output, " -> {}", item.result.normalized);
        }
        if let Some(details) = describe(report.kind, &item.result) {
            let _ = write!(output, " [{details}]");
        }
        let _ = writeln!(output);
        for error in &item.result.errors {
            let _ = writeln!(output, "    error: {error}");
        }
        for warning in &item.result.warnings {
            let _ = writeln!(output, "    warning: {warning}");
        }
    }
    let _ = writeln!(output, "{}", summary_line(&report.summary));
    output
}

/// Render batch reports as Markdown.
pub fn render_batch_markdown(reports: &[BatchReport]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Vessel Identifier Report\n");
    for report in reports {
        let _ = writeln!(output, "## {} numbers\n", report.kind);
        append_results_table(&mut output, report);
        append_findings(&mut output, &report.results);
        append_summary(&mut output, &report.summary);
    }
    output
}

/// Render any serializable report payload as JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

/// One-line summary such as `4 total, 2 valid, 2 invalid (50.0%)`.
pub fn summary_line(summary: &BatchSummary) -> String {
    format!(
        "{} total, {} valid, {} invalid ({})",
        summary.total, summary.valid, summary.invalid, summary.success_rate
    )
}

fn describe(kind: IdentifierKind, result: &ValidationResult) -> Option<String> {
    let info = &result.info;
    let mut parts = Vec::new();
    if let Some(kind) = &info.kind {
        parts.push(kind.clone());
    }
    match kind {
        IdentifierKind::Imo => {
            if let Some(era) = &info.estimated_era {
                parts.push(era.clone());
            }
        }
        IdentifierKind::Mmsi => match (&info.mid, &info.country) {
            (Some(mid), Some(country)) => parts.push(format!("{country} (MID {mid})")),
            (Some(mid), None) => parts.push(format!("MID {mid}")),
            _ => {}
        },
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn display_input(input: &str) -> String {
    if input.trim().is_empty() {
        "(empty)".to_string()
    } else {
        input.to_string()
    }
}

fn append_results_table(output: &mut String, report: &BatchReport) {
    if report.results.is_empty() {
        let _ = writeln!(output, "No identifiers supplied.\n");
        return;
    }
    let _ = writeln!(output, "| Input | Normalized | Valid | Details |");
    let _ = writeln!(output, "|---|---|---|---|");
    for item in &report.results {
        let details = describe(report.kind, &item.result).unwrap_or_default();
        let _ = writeln!(
            output,
            "| `{}` | {} | {} | {} |",
            escape_cell(&display_input(&item.input)),
            escape_cell(&item.result.normalized),
            if item.result.valid { "yes" } else { "no" },
            escape_cell(&details),
        );
    }
    let _ = writeln!(output);
}

fn append_findings(output: &mut String, items: &[BatchItem]) {
    let findings: Vec<String> = items
        .iter()
        .flat_map(|item| {
            let input = display_input(&item.input);
            let errors = item
                .result
                .errors
                .iter()
                .map(move |error| format!("error: {error}"));
            let warnings = item
                .result
                .warnings
                .iter()
                .map(|warning| format!("warning: {warning}"));
            errors
                .chain(warnings)
                .map(move |finding| format!("`{input}` {finding}"))
                .collect::<Vec<_>>()
        })
        .collect();
    append_list(output, "Findings", &findings, "No errors or warnings.");
}

fn append_summary(output: &mut String, summary: &BatchSummary) {
    let _ = writeln!(output, "### Summary");
    let _ = writeln!(output, "- Total: {}", summary.total);
    let _ = writeln!(output, "- Valid: {}", summary.valid);
    let _ = writeln!(output, "- Invalid: {}", summary.invalid);
    let _ = writeln!(output, "- Success rate: {}", summary.success_rate);
    let _ = writeln!(output);
}

fn append_list(output: &mut String, title: &str, items: &[String], empty_message: &str) {
    if items.is_empty() {
        let _ = writeln!(output, "### {title}\n{empty_message}\n");
        return;
    }
    let _ = writeln!(output, "### {title}");
    for item in items {
        let _ = writeln!(output, "- {item}");
    }
    let _ = writeln!(output);
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
