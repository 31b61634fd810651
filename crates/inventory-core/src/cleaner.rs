//! Batch driver: validates defaults, then feeds every record through the
//! [`RowPipeline`] in input order.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use inventory_model::{
    CleanedRecord, ConfigError, LogCategory, LogEntry, RawRecord, ReportLog, UserDefaults,
    ValidatedDefaults,
};
use inventory_normalization::{UnitResolution, UnitResolver, title_case};
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use crate::pipeline::{DropReason, RowOutcome, RowPipeline};

/// Fatal errors that stop a run before any row is processed.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("invalid defaults: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, CleanError>;

/// Options for a cleaning run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanerOptions {
    /// Processing date; the local date when unset.
    pub today: Option<NaiveDate>,
}

impl CleanerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn processing_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Row counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Records handed to the driver.
    pub rows_read: usize,
    /// All-blank records skipped before processing.
    pub blank_rows: usize,
    pub rows_processed: usize,
    pub emitted: usize,
    pub duplicates: usize,
    pub failed: usize,
}

/// Progress notification, sent once per processed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub row: usize,
    pub processed: usize,
    pub total: usize,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct CleaningRun {
    pub records: Vec<CleanedRecord>,
    pub log: ReportLog,
    /// Unit cache at the end of the run, keyed by lower-cased raw token.
    pub resolutions: BTreeMap<String, UnitResolution>,
    pub counters: RunCounters,
    /// Defaults as applied (text defaults title-cased).
    pub defaults: ValidatedDefaults,
    pub processing_date: NaiveDate,
}

/// Owns the defaults and the resolver. Each [`clean`](Self::clean) call is a
/// fresh run with its own de-dup set, unit cache and log.
#[derive(Debug)]
pub struct InventoryCleaner<R> {
    defaults: ValidatedDefaults,
    options: CleanerOptions,
    resolver: R,
}

impl<R: UnitResolver> InventoryCleaner<R> {
    /// Validate `defaults` and build a cleaner.
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::Config`] when the defaults do not validate.
    pub fn new(defaults: &UserDefaults, resolver: R, options: CleanerOptions) -> Result<Self> {
        let validated = defaults.validate()?;
        Ok(Self {
            defaults: validated.recased(title_case),
            options,
            resolver,
        })
    }

    pub fn defaults(&self) -> &ValidatedDefaults {
        &self.defaults
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn into_resolver(self) -> R {
        self.resolver
    }

    pub fn clean(&mut self, records: &[RawRecord]) -> CleaningRun {
        self.clean_with_progress(records, |_| {})
    }

    /// Clean `records` in order, calling `progress` after every processed row.
    pub fn clean_with_progress(
        &mut self,
        records: &[RawRecord],
        mut progress: impl FnMut(Progress),
    ) -> CleaningRun {
        let today = self.options.processing_date();
        let span = info_span!("clean", rows = records.len(), %today);
        let _guard = span.enter();

        let mut log = ReportLog::new();
        if self.defaults.expiry_within_horizon(today) {
            let message = format!(
                "Default expiry date {} is less than a year after {}",
                self.defaults.settings().default_expiry_date,
                inventory_model::format_date(today)
            );
            warn!("{message}");
            log.record(LogCategory::Warning, LogEntry::run(message));
        }

        let mut pipeline = RowPipeline::new(&self.defaults, today);
        let mut counters = RunCounters {
            rows_read: records.len(),
            ..RunCounters::default()
        };
        let total = records.iter().filter(|raw| !raw.is_blank()).count();
        let mut cleaned = Vec::with_capacity(total);

        for raw in records {
            if raw.is_blank() {
                counters.blank_rows += 1;
                continue;
            }
            counters.rows_processed += 1;
            match pipeline.process(raw, &mut self.resolver, &mut log) {
                RowOutcome::Emitted(record) => {
                    counters.emitted += 1;
                    cleaned.push(record);
                }
                RowOutcome::Dropped(DropReason::Duplicate { .. }) => counters.duplicates += 1,
                RowOutcome::Dropped(DropReason::Failed { .. }) => counters.failed += 1,
            }
            progress(Progress {
                row: raw.row(),
                processed: counters.rows_processed,
                total,
            });
        }

        debug!(?counters, "run counters");
        info!(
            emitted = counters.emitted,
            duplicates = counters.duplicates,
            failed = counters.failed,
            errors = log.count(LogCategory::Error),
            "cleaning complete"
        );
        CleaningRun {
            records: cleaned,
            log,
            resolutions: pipeline.into_resolutions(),
            counters,
            defaults: self.defaults.clone(),
            processing_date: today,
        }
    }
}
