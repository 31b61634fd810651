//! End-to-end `clean` runs against files on disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use inventory_cli::workflow::{
    CleanRequest, UnknownUnitPolicy, run_clean, write_failure_report,
};
use inventory_model::UserDefaults;

const HEADER: &str = "Name,Batch,ItemCode,Barcode,AssetSubAccount,RevenueSubAccount,\
CostOfSaleSubAccount,VATType,UnitOfMeasure,ItemClass,ItemCategory,UnitCost,\
TotalQuantity,UnitPrice,ExpiryDate,ReorderLevel";

fn test_defaults() -> UserDefaults {
    UserDefaults::new("VAT Exempt", "Product", "Pharmacy Drugs", "Pack", "31/12/2027")
}

fn test_input(dir: &Path, rows: &[&str]) -> std::path::PathBuf {
    let path = dir.join("stock.csv");
    let mut text = format!("{HEADER}\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    fs::write(&path, text).unwrap();
    path
}

fn test_request(input: &Path) -> CleanRequest {
    let mut request = CleanRequest::new(input, test_defaults());
    request.today = NaiveDate::from_ymd_opt(2026, 1, 15);
    request
}

#[test]
fn test_clean_writes_csv_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = test_input(
        dir.path(),
        &[
            "\"paracetamol  500mg,  tabs\",,P1,,,,,vat exempt,tabs,,,12.345,10.9,15,,",
            "Aspirin,,A1,,,,,,Pack,,,1,5,2,01/01/2030,4",
            ",,,,,,,,,,,,,,,",
            "\"aspirin,\",,A2,,,,,,Pack,,,1,5,2,,",
        ],
    );

    let mut seen = Vec::new();
    let outcome =
        run_clean(&test_request(&input), |progress| seen.push(progress.processed)).unwrap();

    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(outcome.stats.rows_cleaned, 2);
    assert_eq!(outcome.stats.duplicates_removed, 1);
    assert_eq!(outcome.written.len(), 2);

    let cleaned = fs::read_to_string(dir.path().join("stock_cleaned.csv")).unwrap();
    let lines: Vec<&str> = cleaned.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], HEADER);
    assert!(lines[1].starts_with("Paracetamol 500Mg Tabs,,P1,"));
    assert!(lines[1].contains(",Tablet,"));
    assert!(lines[1].contains(",12.35,10,15.00,31/12/2027,"));

    let report = fs::read_to_string(dir.path().join("stock_cleanup_report.txt")).unwrap();
    assert_eq!(report, outcome.report);
    assert!(report.contains("Duplicates Removed: 1"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = test_input(dir.path(), &["Aspirin,,A1,,,,,,Pack,,,1,5,2,,"]);
    let mut request = test_request(&input);
    request.dry_run = true;

    let outcome = run_clean(&request, |_| {}).unwrap();

    assert!(outcome.written.is_empty());
    assert!(outcome.report.contains("MEDICENTRE v3 INVENTORY DATA CLEANUP REPORT"));
    assert!(!dir.path().join("stock_cleaned.csv").exists());
    assert!(!dir.path().join("stock_cleanup_report.txt").exists());
}

#[test]
fn test_output_dir_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let input = test_input(dir.path(), &["Aspirin,,A1,,,,,,Pack,,,1,5,2,,"]);
    let mut request = test_request(&input);
    request.output_dir = Some(dir.path().join("out").join("nested"));

    run_clean(&request, |_| {}).unwrap();

    assert!(dir.path().join("out/nested/stock_cleaned.csv").is_file());
    assert!(dir.path().join("out/nested/stock_cleanup_report.txt").is_file());
}

#[test]
fn test_unit_map_then_policy() {
    let dir = tempfile::tempdir().unwrap();
    let input = test_input(
        dir.path(),
        &[
            "Salts,,S1,,,,,,pch,,,1,5,2,,",
            "Rice,,R1,,,,,,sack9,,,1,5,2,,",
        ],
    );
    let mut request = test_request(&input);
    request.unknown_units = UnknownUnitPolicy::Reject;
    request.unit_map = BTreeMap::from([("PCH".to_string(), "pouch".to_string())]);

    let outcome = run_clean(&request, |_| {}).unwrap();

    assert_eq!(outcome.run.records.len(), 1);
    assert_eq!(outcome.run.records[0].unit_of_measure, "Pouch");
    assert_eq!(outcome.stats.rows_skipped, 1);
}

#[test]
fn test_bad_defaults_fail_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("never-read.csv");
    let mut request = test_request(&input);
    request.defaults.default_expiry_date = "31-02-2025".to_string();

    let err = run_clean(&request, |_| {}).unwrap_err();
    assert!(format!("{err:#}").contains("31-02-2025"));

    let path = write_failure_report(&request, &err).unwrap();
    assert_eq!(path, dir.path().join("cleanup_error_report.txt"));
    let text = fs::read_to_string(path).unwrap();
    assert!(text.contains("Processing failed: validate defaults"));
    assert!(text.contains("31-02-2025"));
}

#[test]
fn test_missing_columns_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("stock.csv");
    fs::write(&input, "Name,UnitCost\nAspirin,1\n").unwrap();

    let err = run_clean(&test_request(&input), |_| {}).unwrap_err();
    assert!(format!("{err:#}").contains("Batch"));
    assert!(!dir.path().join("stock_cleaned.csv").exists());
}
