//! Defaults and unit-map loading.

use std::fs;

use inventory_cli::config::{DefaultsOverrides, load_unit_map, resolve_defaults};
use inventory_model::DEFAULT_COST_ACCOUNT;

fn test_overrides() -> DefaultsOverrides {
    DefaultsOverrides {
        vat_type: Some("VAT Exempt".to_string()),
        item_class: Some("Product".to_string()),
        item_category: Some("Pharmacy Drugs".to_string()),
        unit_of_measure: Some("Pack".to_string()),
        expiry_date: Some("31/12/2027".to_string()),
        ..DefaultsOverrides::default()
    }
}

#[test]
fn test_file_values_with_flag_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("defaults.json");
    fs::write(
        &path,
        r#"{
            "default_vat_type": "Standard VAT",
            "default_item_class": "Product",
            "default_item_category": "Drugs",
            "default_unit_of_measure": "Pack",
            "default_expiry_date": "31/12/2027",
            "default_reorder_level": 25
        }"#,
    )
    .unwrap();
    let overrides = DefaultsOverrides {
        vat_type: Some("Zero Rated".to_string()),
        ..DefaultsOverrides::default()
    };

    let defaults = resolve_defaults(Some(&path), &overrides).unwrap();
    assert_eq!(defaults.default_vat_type, "Zero Rated");
    assert_eq!(defaults.default_item_category, "Drugs");
    assert_eq!(defaults.default_reorder_level, "25");
    assert_eq!(defaults.default_cost_account, DEFAULT_COST_ACCOUNT);
}

#[test]
fn test_flags_alone_are_enough() {
    let defaults = resolve_defaults(None, &test_overrides()).unwrap();
    assert_eq!(defaults.default_unit_of_measure, "Pack");
    assert_eq!(defaults.default_reorder_level, "10");
    assert!(defaults.validate().is_ok());
}

#[test]
fn test_missing_required_flags_are_named() {
    let overrides = DefaultsOverrides {
        expiry_date: None,
        unit_of_measure: None,
        ..test_overrides()
    };
    let err = resolve_defaults(None, &overrides).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("--unit"), "{message}");
    assert!(message.contains("--expiry-date"), "{message}");
    assert!(!message.contains("--vat-type"), "{message}");
}

#[test]
fn test_unreadable_defaults_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("defaults.json");
    fs::write(&path, "{ not json").unwrap();
    let err = resolve_defaults(Some(&path), &DefaultsOverrides::default()).unwrap_err();
    assert!(format!("{err:#}").contains("parse defaults file"));

    let absent = dir.path().join("absent.json");
    let err = resolve_defaults(Some(&absent), &DefaultsOverrides::default()).unwrap_err();
    assert!(err.to_string().contains("read defaults file"));
}

#[test]
fn test_unit_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("units.json");
    fs::write(&path, r#"{"pch": "Pouch", "btl": "Bottle"}"#).unwrap();
    let map = load_unit_map(&path).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map["pch"], "Pouch");

    fs::write(&path, r#"{"pch": "  "}"#).unwrap();
    let err = load_unit_map(&path).unwrap_err();
    assert!(err.to_string().contains("blank unit"));
}
