//! Plain-text cleanup report.
//!
//! Section order:
//! 1. Header (input, timestamp, row counts)
//! 2. Configured defaults and canonical units
//! 3. One section per log category, plus unit resolutions and the
//!    sub-account summary
//! 4. Cleaning statistics and the de-duplication summary

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use inventory_core::CleaningRun;
use inventory_model::{Column, LogCategory, LogEntry, ReportLog, format_date};
use inventory_normalization::CANONICAL_UNITS;
use tracing::info;

use crate::error::{ReportError, Result};
use crate::stats::{CleaningStats, SUB_ACCOUNT_COLUMNS};

pub const REPORT_TITLE: &str = "MEDICENTRE v3 INVENTORY DATA CLEANUP REPORT";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const RULE_WIDTH: usize = 80;

/// Line buffer with the report's section conventions.
struct ReportText {
    out: String,
}

impl ReportText {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn double_rule(&mut self) {
        self.line("=".repeat(RULE_WIDTH));
    }

    fn heading(&mut self, title: &str) {
        self.line(format!("{title}:"));
        self.line("-".repeat(RULE_WIDTH));
    }

    /// Bulleted entries, or `empty` when there are none.
    fn entries<'a>(
        &mut self,
        marker: &str,
        entries: impl IntoIterator<Item = &'a LogEntry>,
        empty: &str,
    ) {
        let mut any = false;
        for entry in entries {
            any = true;
            self.line(format!("{marker} {entry}"));
        }
        if !any {
            self.line(empty);
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

fn header(text: &mut ReportText, input: &Path, timestamp: NaiveDateTime) {
    text.line(REPORT_TITLE);
    text.double_rule();
    text.blank();
    text.line(format!("Input File: {}", input.display()));
    text.line(format!("Processed: {}", timestamp.format(TIMESTAMP_FORMAT)));
}

fn log_sections(text: &mut ReportText, log: &ReportLog) {
    text.heading("WARNINGS");
    text.entries("⚠", log.entries(LogCategory::Warning), "No warnings.");
    text.blank();

    text.heading("ERRORS");
    text.entries("✗", log.entries(LogCategory::Error), "No errors.");
}

/// Render the full report for a finished run.
pub fn render_report(run: &CleaningRun, input: &Path, timestamp: NaiveDateTime) -> String {
    let stats = CleaningStats::from_run(run);
    let log = &run.log;
    let mut text = ReportText::new();

    header(&mut text, input, timestamp);
    text.line(format!("Processing Date: {}", format_date(run.processing_date)));
    text.line(format!("Rows Processed: {}", stats.rows_cleaned));
    text.line(format!("Rows Skipped: {}", stats.rows_skipped));
    text.line(format!("Blank Rows Ignored: {}", stats.blank_rows));
    text.line(format!("Duplicates Removed: {}", stats.duplicates_removed));
    text.blank();

    text.heading("DEFAULTS CONFIGURED");
    for (field, value) in run.defaults.entries() {
        text.line(format!("• {field}: {value}"));
    }
    text.blank();

    text.heading("CANONICAL UNITS RECOGNIZED");
    let mut units = CANONICAL_UNITS.to_vec();
    units.sort_unstable();
    for unit in units {
        text.line(format!("• {unit}"));
    }
    text.blank();

    text.heading("DUPLICATES REMOVED");
    text.entries(
        "•",
        log.entries(LogCategory::DuplicateRemoved),
        "No duplicates found.",
    );
    text.blank();

    text.heading("DEFAULTS USED");
    text.entries(
        "•",
        log.entries(LogCategory::DefaultUsed),
        "No defaults were used.",
    );
    text.blank();

    text.heading("NORMALIZATIONS APPLIED");
    text.entries(
        "•",
        log.entries(LogCategory::Normalization),
        "No normalizations were needed.",
    );
    text.blank();

    text.heading("USER DECISIONS (Unit Resolutions)");
    text.entries(
        "•",
        log.entries(LogCategory::UserDecision),
        "No user interventions were required.",
    );
    text.blank();

    text.heading("UNIT OF MEASURE RESOLUTIONS");
    if run.resolutions.is_empty() {
        text.line("No unit of measure resolutions were made.");
    }
    for resolution in run.resolutions.values() {
        text.line(format!(
            "• '{}' → '{}' ({})",
            resolution.raw, resolution.value, resolution.source
        ));
    }
    text.blank();

    text.heading("SUB-ACCOUNT NORMALIZATIONS SUMMARY");
    text.line(format!(
        "Total sub-account normalizations: {}",
        stats.sub_account_normalizations
    ));
    for column in SUB_ACCOUNT_COLUMNS {
        let label = match column {
            Column::AssetSubAccount => "Asset",
            Column::RevenueSubAccount => "Revenue",
            _ => "Cost",
        };
        for entry in log.entries_for(LogCategory::Normalization, column) {
            text.line(format!("  • {label}: {entry}"));
        }
    }
    text.blank();

    log_sections(&mut text, log);
    text.blank();

    text.double_rule();
    statistics(&mut text, &stats);
    text.blank();
    text.double_rule();
    text.heading("DE-DUPLICATION SUMMARY");
    text.line(format!(
        "Unique products after de-duplication: {}",
        stats.rows_cleaned
    ));
    text.line(format!(
        "Duplicate products removed: {}",
        stats.duplicates_removed
    ));
    text.line(format!(
        "De-duplication efficiency: {}",
        stats.dedup_efficiency_label()
    ));
    text.blank();
    text.double_rule();
    text.line("END OF REPORT");
    text.finish()
}

/// The CLEANING STATISTICS block on its own.
pub fn render_statistics(stats: &CleaningStats) -> String {
    let mut text = ReportText::new();
    statistics(&mut text, stats);
    text.finish()
}

fn statistics(text: &mut ReportText, stats: &CleaningStats) {
    text.heading("CLEANING STATISTICS");
    text.line(format!("Total rows in input: {}", stats.total_rows));
    text.line(format!("Rows successfully cleaned: {}", stats.rows_cleaned));
    text.line(format!("Duplicates removed: {}", stats.duplicates_removed));
    text.line(format!("Rows with errors: {}", stats.rows_with_errors));
    text.line(format!("Defaults applied: {}", stats.defaults_applied));
    text.line(format!("Normalizations: {}", stats.normalizations));
    text.line(format!("User decisions: {}", stats.user_decisions));
    text.line(format!("Warnings: {}", stats.warnings));
    text.line(format!("Errors: {}", stats.errors));
    text.line(format!(
        "Negative values corrected: {}",
        stats.negative_corrections
    ));
    text.line(format!(
        "Decimal/integer conversions: {}",
        stats.numeric_conversions
    ));
    text.line(format!(
        "Sub-account normalizations: {}",
        stats.sub_account_normalizations
    ));
}

/// Render the report written when a run fails before producing output.
pub fn render_error_report(
    input: &Path,
    failure: &str,
    log: &ReportLog,
    timestamp: NaiveDateTime,
) -> String {
    let mut text = ReportText::new();
    header(&mut text, input, timestamp);
    text.blank();
    text.heading("PROCESSING FAILED");
    text.line(format!("✗ {failure}"));
    text.blank();
    log_sections(&mut text, log);
    text.blank();
    text.double_rule();
    text.line("END OF REPORT");
    text.finish()
}

pub fn write_report(
    path: &Path,
    run: &CleaningRun,
    input: &Path,
    timestamp: NaiveDateTime,
) -> Result<()> {
    write_text(path, &render_report(run, input, timestamp))?;
    info!(path = %path.display(), "wrote cleanup report");
    Ok(())
}

pub fn write_error_report(
    path: &Path,
    input: &Path,
    failure: &str,
    log: &ReportLog,
    timestamp: NaiveDateTime,
) -> Result<()> {
    write_text(path, &render_error_report(input, failure, log, timestamp))?;
    info!(path = %path.display(), "wrote error report");
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| ReportError::io(path, source))
}
