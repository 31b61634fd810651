//! Summary counts for the statistics and de-duplication blocks.

use inventory_core::CleaningRun;
use inventory_model::{Column, LogCategory};

pub const SUB_ACCOUNT_COLUMNS: [Column; 3] = [
    Column::AssetSubAccount,
    Column::RevenueSubAccount,
    Column::CostOfSaleSubAccount,
];

/// Counts derived from a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningStats {
    /// Non-blank rows that went through the pipeline.
    pub total_rows: usize,
    pub rows_cleaned: usize,
    pub rows_skipped: usize,
    pub blank_rows: usize,
    pub duplicates_removed: usize,
    /// Distinct rows with at least one error entry, emitted or not.
    pub rows_with_errors: usize,
    pub defaults_applied: usize,
    pub normalizations: usize,
    pub user_decisions: usize,
    pub warnings: usize,
    pub errors: usize,
    pub negative_corrections: usize,
    pub numeric_conversions: usize,
    pub sub_account_normalizations: usize,
}

impl CleaningStats {
    pub fn from_run(run: &CleaningRun) -> Self {
        let log = &run.log;
        let tally = log.tally();
        Self {
            total_rows: run.counters.rows_processed,
            rows_cleaned: run.counters.emitted,
            rows_skipped: run.counters.failed,
            blank_rows: run.counters.blank_rows,
            duplicates_removed: log.count(LogCategory::DuplicateRemoved),
            rows_with_errors: log.rows_with_errors(),
            defaults_applied: log.count(LogCategory::DefaultUsed),
            normalizations: log.count(LogCategory::Normalization),
            user_decisions: log.count(LogCategory::UserDecision),
            warnings: log.count(LogCategory::Warning),
            errors: log.count(LogCategory::Error),
            negative_corrections: tally.negative_corrections,
            numeric_conversions: tally.numeric_conversions,
            sub_account_normalizations: SUB_ACCOUNT_COLUMNS
                .iter()
                .map(|column| log.entries_for(LogCategory::Normalization, *column).count())
                .sum(),
        }
    }

    /// Share of processed rows dropped as duplicates, in percent.
    pub fn dedup_efficiency(&self) -> Option<f64> {
        if self.total_rows == 0 {
            return None;
        }
        Some(self.duplicates_removed as f64 / self.total_rows as f64 * 100.0)
    }

    /// `12.5%`, or `N/A (no rows processed)`.
    pub fn dedup_efficiency_label(&self) -> String {
        match self.dedup_efficiency() {
            Some(percent) => format!("{percent:.1}%"),
            None => "N/A (no rows processed)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn efficiency_is_one_decimal_percent() {
        let stats = CleaningStats {
            total_rows: 8,
            duplicates_removed: 1,
            ..CleaningStats::default()
        };
        assert_eq!(stats.dedup_efficiency_label(), "12.5%");

        let thirds = CleaningStats {
            total_rows: 3,
            duplicates_removed: 1,
            ..CleaningStats::default()
        };
        assert_eq!(thirds.dedup_efficiency_label(), "33.3%");
    }

    #[test]
    fn efficiency_is_not_available_without_rows() {
        let stats = CleaningStats::default();
        assert_eq!(stats.dedup_efficiency(), None);
        assert_eq!(stats.dedup_efficiency_label(), "N/A (no rows processed)");
    }
}
