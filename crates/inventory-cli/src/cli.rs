//! CLI argument definitions for the inventory cleaner.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use inventory_cli::config::DefaultsOverrides;
use inventory_cli::workflow::UnknownUnitPolicy;

#[derive(Parser)]
#[command(
    name = "inventory-cleaner",
    version,
    about = "Clean and normalize pharmacy inventory CSV exports",
    long_about = "Clean and normalize pharmacy inventory CSV exports before import.\n\n\
                  Fixes casing, units, accounts, prices and expiry dates, removes\n\
                  duplicate products, and writes a cleaned CSV plus a cleanup report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix each log line with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean an inventory CSV and write the cleaned file and report.
    Clean(CleanArgs),

    /// List the canonical units of measure and their aliases.
    Units,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Inventory CSV export to clean.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// JSON file with the default values.
    #[arg(long = "defaults", value_name = "JSON")]
    pub defaults: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// How to settle units that are neither canonical nor known aliases.
    #[arg(long = "unknown-units", value_enum, default_value = "default")]
    pub unknown_units: UnknownUnitsArg,

    /// JSON object mapping raw unit spellings to replacements.
    #[arg(long = "unit-map", value_name = "JSON")]
    pub unit_map: Option<PathBuf>,

    /// Output directory (default: next to the input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the report instead of writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Per-field defaults; each overrides the `--defaults` file.
#[derive(Args)]
pub struct OverrideArgs {
    #[arg(long = "vat-type", value_name = "TEXT")]
    pub vat_type: Option<String>,

    #[arg(long = "item-class", value_name = "TEXT")]
    pub item_class: Option<String>,

    #[arg(long = "item-category", value_name = "TEXT")]
    pub item_category: Option<String>,

    #[arg(long = "unit", value_name = "TEXT")]
    pub unit_of_measure: Option<String>,

    /// Default expiry date, dd/mm/yyyy.
    #[arg(long = "expiry-date", value_name = "DATE")]
    pub expiry_date: Option<String>,

    #[arg(long = "reorder-level", value_name = "N")]
    pub reorder_level: Option<String>,

    #[arg(long = "asset-account", value_name = "TEXT")]
    pub asset_account: Option<String>,

    #[arg(long = "revenue-account", value_name = "TEXT")]
    pub revenue_account: Option<String>,

    #[arg(long = "cost-account", value_name = "TEXT")]
    pub cost_account: Option<String>,
}

impl OverrideArgs {
    pub fn to_overrides(&self) -> DefaultsOverrides {
        DefaultsOverrides {
            vat_type: self.vat_type.clone(),
            item_class: self.item_class.clone(),
            item_category: self.item_category.clone(),
            unit_of_measure: self.unit_of_measure.clone(),
            expiry_date: self.expiry_date.clone(),
            reorder_level: self.reorder_level.clone(),
            asset_account: self.asset_account.clone(),
            revenue_account: self.revenue_account.clone(),
            cost_account: self.cost_account.clone(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum UnknownUnitsArg {
    /// Use the default unit.
    Default,
    /// Keep the unit as written.
    Accept,
    /// Drop the row.
    Reject,
}

impl From<UnknownUnitsArg> for UnknownUnitPolicy {
    fn from(arg: UnknownUnitsArg) -> Self {
        match arg {
            UnknownUnitsArg::Default => UnknownUnitPolicy::Default,
            UnknownUnitsArg::Accept => UnknownUnitPolicy::Accept,
            UnknownUnitsArg::Reject => UnknownUnitPolicy::Reject,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn clean_parses_overrides_and_policy() {
        let cli = Cli::parse_from([
            "inventory-cleaner",
            "clean",
            "stock.csv",
            "--vat-type",
            "VAT Exempt",
            "--unknown-units",
            "reject",
            "--dry-run",
        ]);
        let Command::Clean(args) = cli.command else {
            panic!("expected clean");
        };
        assert_eq!(args.input, PathBuf::from("stock.csv"));
        assert!(args.dry_run);
        assert_eq!(
            UnknownUnitPolicy::from(args.unknown_units),
            UnknownUnitPolicy::Reject
        );
        let overrides = args.overrides.to_overrides();
        assert_eq!(overrides.vat_type.as_deref(), Some("VAT Exempt"));
        assert_eq!(overrides.expiry_date, None);
        assert!(!cli.log_timestamps);
    }

    #[test]
    fn logging_flags_are_global() {
        let cli = Cli::parse_from([
            "inventory-cleaner",
            "units",
            "--log-timestamps",
            "--log-format",
            "compact",
        ]);
        assert!(cli.log_timestamps);
        assert!(matches!(cli.log_format, LogFormatArg::Compact));
    }
}
