//! Append-only audit trail collected while cleaning.

use std::collections::BTreeSet;
use std::fmt;

use crate::column::Column;

/// The six audit categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogCategory {
    /// A present value was reformatted or corrected to a canonical form.
    Normalization,
    /// A value was settled by the unit resolver.
    UserDecision,
    /// A missing or unrelated value was replaced by a configured default.
    DefaultUsed,
    Warning,
    Error,
    DuplicateRemoved,
}

impl LogCategory {
    pub const ALL: [LogCategory; 6] = [
        LogCategory::Normalization,
        LogCategory::UserDecision,
        LogCategory::DefaultUsed,
        LogCategory::Warning,
        LogCategory::Error,
        LogCategory::DuplicateRemoved,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LogCategory::Normalization => "normalizations",
            LogCategory::UserDecision => "user_decisions",
            LogCategory::DefaultUsed => "defaults_used",
            LogCategory::Warning => "warnings",
            LogCategory::Error => "errors",
            LogCategory::DuplicateRemoved => "duplicates_removed",
        }
    }
}

/// One human-readable audit line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Originating data row, or None for run-level entries.
    pub row: Option<usize>,
    /// Column the entry concerns, when there is one.
    pub column: Option<Column>,
    pub message: String,
}

impl LogEntry {
    pub fn row(row: usize, message: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            column: None,
            message: message.into(),
        }
    }

    pub fn run(message: impl Into<String>) -> Self {
        Self {
            row: None,
            column: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: Column) -> Self {
        self.column = Some(column);
        self
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "Row {row}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Counters the statistics block needs that are not one-per-entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Negative numeric cells clamped to zero.
    pub negative_corrections: usize,
    /// Currency values re-rounded or quantities truncated to integers.
    pub numeric_conversions: usize,
}

/// Process-wide accumulator for one cleaning run.
///
/// Entries are only ever appended; nothing in the pipeline reads them back.
#[derive(Debug, Clone, Default)]
pub struct ReportLog {
    normalizations: Vec<LogEntry>,
    user_decisions: Vec<LogEntry>,
    defaults_used: Vec<LogEntry>,
    warnings: Vec<LogEntry>,
    errors: Vec<LogEntry>,
    duplicates_removed: Vec<LogEntry>,
    tally: Tally,
}

impl ReportLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, category: LogCategory, entry: LogEntry) {
        self.bucket_mut(category).push(entry);
    }

    pub fn normalization(&mut self, row: usize, column: Column, message: impl Into<String>) {
        self.record(
            LogCategory::Normalization,
            LogEntry::row(row, message).with_column(column),
        );
    }

    pub fn default_used(&mut self, row: usize, column: Column, message: impl Into<String>) {
        self.record(
            LogCategory::DefaultUsed,
            LogEntry::row(row, message).with_column(column),
        );
    }

    pub fn user_decision(&mut self, row: usize, column: Column, message: impl Into<String>) {
        self.record(
            LogCategory::UserDecision,
            LogEntry::row(row, message).with_column(column),
        );
    }

    pub fn warning(&mut self, row: usize, message: impl Into<String>) {
        self.record(LogCategory::Warning, LogEntry::row(row, message));
    }

    pub fn error(&mut self, row: usize, message: impl Into<String>) {
        self.record(LogCategory::Error, LogEntry::row(row, message));
    }

    pub fn duplicate_removed(&mut self, row: usize, message: impl Into<String>) {
        self.record(LogCategory::DuplicateRemoved, LogEntry::row(row, message));
    }

    pub fn count_negative_correction(&mut self) {
        self.tally.negative_corrections += 1;
    }

    pub fn count_numeric_conversion(&mut self) {
        self.tally.numeric_conversions += 1;
    }

    pub fn entries(&self, category: LogCategory) -> &[LogEntry] {
        match category {
            LogCategory::Normalization => &self.normalizations,
            LogCategory::UserDecision => &self.user_decisions,
            LogCategory::DefaultUsed => &self.defaults_used,
            LogCategory::Warning => &self.warnings,
            LogCategory::Error => &self.errors,
            LogCategory::DuplicateRemoved => &self.duplicates_removed,
        }
    }

    pub fn count(&self, category: LogCategory) -> usize {
        self.entries(category).len()
    }

    /// Entries of a category that concern one column.
    pub fn entries_for(
        &self,
        category: LogCategory,
        column: Column,
    ) -> impl Iterator<Item = &LogEntry> {
        self.entries(category)
            .iter()
            .filter(move |entry| entry.column == Some(column))
    }

    /// True when nothing at all was recorded.
    pub fn is_empty(&self) -> bool {
        LogCategory::ALL
            .iter()
            .all(|category| self.entries(*category).is_empty())
            && self.tally == Tally::default()
    }

    /// Number of distinct rows that logged at least one error.
    pub fn rows_with_errors(&self) -> usize {
        self.errors
            .iter()
            .filter_map(|entry| entry.row)
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    fn bucket_mut(&mut self, category: LogCategory) -> &mut Vec<LogEntry> {
        match category {
            LogCategory::Normalization => &mut self.normalizations,
            LogCategory::UserDecision => &mut self.user_decisions,
            LogCategory::DefaultUsed => &mut self.defaults_used,
            LogCategory::Warning => &mut self.warnings,
            LogCategory::Error => &mut self.errors,
            LogCategory::DuplicateRemoved => &mut self.duplicates_removed,
        }
    }
}
