//! The `clean` workflow: read, clean, write outputs.
//!
//! Fatal problems (bad defaults, unreadable input) surface as errors before
//! any output is written; [`write_failure_report`] records them next to the
//! input.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use inventory_core::{
    AcceptUnitResolver, CleanerOptions, CleaningRun, DefaultUnitResolver, InventoryCleaner,
    MappedUnitResolver, Progress, RejectUnitResolver,
};
use inventory_ingest::read_inventory_csv;
use inventory_model::{ReportLog, UserDefaults};
use inventory_normalization::UnitResolver;
use inventory_report::{
    CleaningStats, OutputPaths, render_report, write_cleaned_csv, write_error_report, write_report,
};
use tracing::{info, info_span};

/// What to do with a unit that is neither canonical nor a known alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownUnitPolicy {
    /// Replace it with the default unit.
    #[default]
    Default,
    /// Keep it as written.
    Accept,
    /// Drop the row.
    Reject,
}

impl UnknownUnitPolicy {
    /// Resolver for this policy, consulting `unit_map` first.
    pub fn resolver(self, unit_map: &BTreeMap<String, String>) -> Box<dyn UnitResolver> {
        let mapping = unit_map.iter().map(|(raw, unit)| (raw.clone(), unit.clone()));
        match self {
            UnknownUnitPolicy::Default => {
                Box::new(MappedUnitResolver::new(mapping, DefaultUnitResolver))
            }
            UnknownUnitPolicy::Accept => {
                Box::new(MappedUnitResolver::new(mapping, AcceptUnitResolver))
            }
            UnknownUnitPolicy::Reject => {
                Box::new(MappedUnitResolver::new(mapping, RejectUnitResolver))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CleanRequest {
    pub input: PathBuf,
    pub defaults: UserDefaults,
    pub unknown_units: UnknownUnitPolicy,
    pub unit_map: BTreeMap<String, String>,
    /// Write outputs here instead of next to the input.
    pub output_dir: Option<PathBuf>,
    /// Render the report without writing any file.
    pub dry_run: bool,
    /// Processing date; today when unset.
    pub today: Option<NaiveDate>,
}

impl CleanRequest {
    pub fn new(input: impl Into<PathBuf>, defaults: UserDefaults) -> Self {
        Self {
            input: input.into(),
            defaults,
            unknown_units: UnknownUnitPolicy::default(),
            unit_map: BTreeMap::new(),
            output_dir: None,
            dry_run: false,
            today: None,
        }
    }

    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths::for_input(&self.input, self.output_dir.as_deref())
    }
}

#[derive(Debug)]
pub struct CleanOutcome {
    pub run: CleaningRun,
    pub stats: CleaningStats,
    pub report: String,
    /// Files written; empty on a dry run.
    pub written: Vec<PathBuf>,
}

/// Run one cleaning pass over `request.input`.
///
/// `progress` is called once per processed row, with the row total known
/// up front.
///
/// # Errors
///
/// Fails on invalid defaults, an unreadable or malformed input file, or an
/// output that cannot be written.
pub fn run_clean(request: &CleanRequest, progress: impl FnMut(Progress)) -> Result<CleanOutcome> {
    let span = info_span!("clean_file", input = %request.input.display());
    let _guard = span.enter();

    let mut options = CleanerOptions::new();
    if let Some(today) = request.today {
        options = options.with_today(today);
    }
    let resolver = request.unknown_units.resolver(&request.unit_map);
    let mut cleaner = InventoryCleaner::new(&request.defaults, resolver, options)
        .context("validate defaults")?;

    let table = read_inventory_csv(&request.input)?;
    info!(
        rows = table.len(),
        blank_rows = table.blank_rows,
        extra_columns = table.extra_columns.len(),
        "input loaded"
    );

    let run = cleaner.clean_with_progress(&table.records, progress);
    let stats = CleaningStats::from_run(&run);
    let timestamp = now();
    let report = render_report(&run, &request.input, timestamp);

    let mut written = Vec::new();
    if !request.dry_run {
        let paths = request.output_paths();
        if let Some(dir) = &request.output_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create output directory {}", dir.display()))?;
        }
        write_cleaned_csv(&paths.cleaned_csv, &run.records)?;
        write_report(&paths.report, &run, &request.input, timestamp)?;
        written.push(paths.cleaned_csv);
        written.push(paths.report);
    }

    Ok(CleanOutcome {
        run,
        stats,
        report,
        written,
    })
}

/// Write the error report for a run that failed before producing output.
///
/// # Errors
///
/// Fails when the report itself cannot be written.
pub fn write_failure_report(request: &CleanRequest, error: &anyhow::Error) -> Result<PathBuf> {
    let path = request.output_paths().error_report;
    if let Some(dir) = &request.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output directory {}", dir.display()))?;
    }
    write_error_report(
        &path,
        &request.input,
        &format!("Processing failed: {error:#}"),
        &ReportLog::new(),
        now(),
    )?;
    Ok(path)
}

/// True when there is a directory to put the error report in.
pub fn has_input_dir(request: &CleanRequest) -> bool {
    request.output_dir.is_some()
        || request
            .input
            .parent()
            .is_some_and(|dir| dir.as_os_str().is_empty() || dir.is_dir())
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
