use anyhow::{Context, Result};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use inventory_cli::config::{load_unit_map, resolve_defaults};
use inventory_cli::workflow::{
    CleanOutcome, CleanRequest, has_input_dir, run_clean, write_failure_report,
};
use inventory_normalization::{CANONICAL_UNITS, aliases_of};

use crate::cli::CleanArgs;
use crate::summary::apply_table_style;

pub fn run_units() -> Result<()> {
    let mut units = CANONICAL_UNITS.to_vec();
    units.sort_unstable();
    let mut table = Table::new();
    table.set_header(vec!["Unit", "Aliases"]);
    apply_table_style(&mut table);
    for unit in units {
        table.add_row(vec![unit.to_string(), aliases_of(unit).join(", ")]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_clean_command(args: &CleanArgs) -> Result<CleanOutcome> {
    let defaults = resolve_defaults(args.defaults.as_deref(), &args.overrides.to_overrides())?;
    let mut request = CleanRequest::new(&args.input, defaults);
    request.unknown_units = args.unknown_units.into();
    request.output_dir = args.output_dir.clone();
    request.dry_run = args.dry_run;
    if let Some(path) = &args.unit_map {
        request.unit_map = load_unit_map(path)?;
        info!(entries = request.unit_map.len(), "unit map loaded");
    }

    let bar = progress_bar();
    let result = run_clean(&request, |progress| {
        if bar.length() != Some(progress.total as u64) {
            bar.set_length(progress.total as u64);
        }
        bar.set_position(progress.processed as u64);
    });
    bar.finish_and_clear();

    match result {
        Ok(outcome) => {
            if request.dry_run {
                print!("{}", outcome.report);
            }
            Ok(outcome)
        }
        Err(err) => {
            if !request.dry_run && has_input_dir(&request) {
                match write_failure_report(&request, &err) {
                    Ok(path) => eprintln!("Error report: {}", path.display()),
                    Err(report_err) => error!("could not write error report: {report_err:#}"),
                }
            }
            Err(err).with_context(|| format!("clean {}", request.input.display()))
        }
    }
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows",
    ) {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}
