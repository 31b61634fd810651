//! Report rendering and output files for a real cleaning run.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use inventory_core::{CleanerOptions, CleaningRun, DefaultUnitResolver, InventoryCleaner};
use inventory_model::{Column, RawRecord, ReportLog, UserDefaults};
use inventory_report::{
    CleaningStats, OutputPaths, REPORT_TITLE, render_error_report, render_report,
    render_statistics, write_cleaned_csv, write_error_report, write_report,
};

fn test_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 15)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn test_run() -> CleaningRun {
    let defaults =
        UserDefaults::new("VAT Exempt", "Product", "Pharmacy Drugs", "Pack", "31/12/2027");
    let options = CleanerOptions::new().with_today(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    let mut cleaner = InventoryCleaner::new(&defaults, DefaultUnitResolver, options).unwrap();
    let rows = [
        RawRecord::new(1)
            .with(Column::Name, "paracetamol  500mg,  tabs")
            .with(Column::UnitOfMeasure, "tabs")
            .with(Column::UnitCost, "12.345")
            .with(Column::TotalQuantity, "10"),
        RawRecord::new(2)
            .with(Column::Name, "Aspirin")
            .with(Column::UnitOfMeasure, "Pack")
            .with(Column::AssetSubAccount, "inventory pharmacy drug")
            .with(Column::TotalQuantity, "3"),
        RawRecord::new(3)
            .with(Column::Name, "aspirin,")
            .with(Column::TotalQuantity, "1"),
    ];
    cleaner.clean(&rows)
}

#[test]
fn test_statistics_block() {
    let stats = CleaningStats {
        total_rows: 8,
        rows_cleaned: 6,
        rows_skipped: 1,
        blank_rows: 2,
        duplicates_removed: 1,
        rows_with_errors: 2,
        defaults_applied: 14,
        normalizations: 9,
        user_decisions: 1,
        warnings: 3,
        errors: 2,
        negative_corrections: 1,
        numeric_conversions: 4,
        sub_account_normalizations: 2,
    };

    insta::assert_snapshot!(render_statistics(&stats), @r"
    CLEANING STATISTICS:
    --------------------------------------------------------------------------------
    Total rows in input: 8
    Rows successfully cleaned: 6
    Duplicates removed: 1
    Rows with errors: 2
    Defaults applied: 14
    Normalizations: 9
    User decisions: 1
    Warnings: 3
    Errors: 2
    Negative values corrected: 1
    Decimal/integer conversions: 4
    Sub-account normalizations: 2
    ");
}

#[test]
fn test_report_sections_in_order() {
    let run = test_run();
    let report = render_report(&run, Path::new("stock.csv"), test_timestamp());

    let sections = [
        REPORT_TITLE,
        "Input File: stock.csv",
        "Processed: 2026-01-15 09:30:00",
        "DEFAULTS CONFIGURED:",
        "CANONICAL UNITS RECOGNIZED:",
        "DUPLICATES REMOVED:",
        "DEFAULTS USED:",
        "NORMALIZATIONS APPLIED:",
        "USER DECISIONS (Unit Resolutions):",
        "UNIT OF MEASURE RESOLUTIONS:",
        "SUB-ACCOUNT NORMALIZATIONS SUMMARY:",
        "WARNINGS:",
        "ERRORS:",
        "CLEANING STATISTICS:",
        "DE-DUPLICATION SUMMARY:",
        "END OF REPORT",
    ];
    let mut last = 0;
    for section in sections {
        let at = report[last..]
            .find(section)
            .unwrap_or_else(|| panic!("missing or out of order: {section}"));
        last += at + section.len();
    }
}

#[test]
fn test_report_reflects_the_run() {
    let run = test_run();
    let report = render_report(&run, Path::new("stock.csv"), test_timestamp());

    assert!(report.contains("Rows Processed: 2"));
    assert!(report.contains("Duplicates Removed: 1"));
    assert!(report.contains("• default_vat_type: VAT Exempt"));
    assert!(report.contains("• 'Tabs' → 'Tablet' (alias table)"));
    assert!(report.contains("(first seen on row 2)"));
    assert!(report.contains("Total sub-account normalizations: 1"));
    assert!(report.contains("  • Asset: Row 2:"));
    assert!(report.contains("No user interventions were required."));
    assert!(report.contains("De-duplication efficiency: 33.3%"));
    assert!(report.trim_end().ends_with("END OF REPORT"));
}

#[test]
fn test_empty_run_reports_not_available() {
    let defaults = UserDefaults::new("VAT Exempt", "Product", "Drugs", "Pack", "31/12/2027");
    let options = CleanerOptions::new().with_today(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    let run = InventoryCleaner::new(&defaults, DefaultUnitResolver, options)
        .unwrap()
        .clean(&[]);
    let report = render_report(&run, Path::new("empty.csv"), test_timestamp());

    assert!(report.contains("No duplicates found."));
    assert!(report.contains("No unit of measure resolutions were made."));
    assert!(report.contains("De-duplication efficiency: N/A (no rows processed)"));
}

#[test]
fn test_outputs_are_written_next_to_the_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("stock.csv");
    let paths = OutputPaths::for_input(&input, None);
    let run = test_run();

    write_cleaned_csv(&paths.cleaned_csv, &run.records).unwrap();
    write_report(&paths.report, &run, &input, test_timestamp()).unwrap();

    let csv = fs::read_to_string(dir.path().join("stock_cleaned.csv")).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.lines().nth(1).unwrap().starts_with("Paracetamol 500Mg Tabs,"));
    let report = fs::read_to_string(dir.path().join("stock_cleanup_report.txt")).unwrap();
    assert!(report.starts_with(REPORT_TITLE));
}

#[test]
fn test_error_report_carries_the_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("stock.csv");
    let paths = OutputPaths::for_input(&input, None);
    let mut log = ReportLog::new();
    log.warning(4, "Negative UnitCost '-1' replaced with 0.00");

    write_error_report(
        &paths.error_report,
        &input,
        "invalid defaults: default_expiry_date '31-02-2025' is not a valid dd/mm/yyyy date",
        &log,
        test_timestamp(),
    )
    .unwrap();

    let text = fs::read_to_string(dir.path().join("cleanup_error_report.txt")).unwrap();
    assert!(text.contains("✗ invalid defaults: default_expiry_date '31-02-2025'"));
    assert!(text.contains("⚠ Row 4: Negative UnitCost"));
    assert!(text.contains("No errors."));
    assert_eq!(
        text,
        render_error_report(
            &input,
            "invalid defaults: default_expiry_date '31-02-2025' is not a valid dd/mm/yyyy date",
            &log,
            test_timestamp(),
        )
    );
}

#[test]
fn test_write_fails_for_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent").join("out.csv");
    let err = write_cleaned_csv(&missing, &[]).unwrap_err();
    assert!(err.to_string().contains("out.csv"));
}
