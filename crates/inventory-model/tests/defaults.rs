//! Validation and deserialization of operator defaults.

use chrono::NaiveDate;
use inventory_model::{
    Column, ConfigError, DEFAULT_ASSET_ACCOUNT, DEFAULT_COST_ACCOUNT, DEFAULT_REORDER_LEVEL,
    UserDefaults,
};

fn defaults(expiry: &str) -> UserDefaults {
    UserDefaults::new("VAT Exempt", "Product", "Pharmacy Drugs", "Pack", expiry)
}

#[test]
fn valid_defaults_parse_typed_values() {
    let validated = defaults("1/6/2031").validate().unwrap();
    assert_eq!(
        validated.expiry_date(),
        NaiveDate::from_ymd_opt(2031, 6, 1).unwrap()
    );
    assert_eq!(validated.reorder_level(), DEFAULT_REORDER_LEVEL);
    assert_eq!(validated.settings().default_expiry_date, "01/06/2031");
    assert_eq!(
        validated.account_for(Column::AssetSubAccount),
        Some(DEFAULT_ASSET_ACCOUNT)
    );
    assert_eq!(validated.account_for(Column::Name), None);
}

#[test]
fn malformed_expiry_date_is_fatal() {
    let err = defaults("31-02-2025").validate().unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidExpiryDate {
            value: "31-02-2025".to_string()
        }
    );
}

#[test]
fn negative_or_fractional_reorder_level_is_fatal() {
    for value in ["-1", "2.5", "ten"] {
        let err = defaults("01/06/2031")
            .with_reorder_level(value)
            .validate()
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidReorderLevel { .. }),
            "{value} should be rejected"
        );
    }
}

#[test]
fn blank_required_default_is_fatal() {
    let err = UserDefaults::new("", "Product", "Drugs", "Pack", "01/06/2031")
        .validate()
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::MissingDefault {
            field: "default_vat_type"
        }
    );
}

#[test]
fn expiry_horizon_is_one_year() {
    let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let near = defaults("01/01/2027").validate().unwrap();
    let far = defaults("02/01/2027").validate().unwrap();
    assert!(near.expiry_within_horizon(today));
    assert!(!far.expiry_within_horizon(today));
}

#[test]
fn json_fills_optional_fields_and_accepts_numeric_reorder_level() {
    let json = r#"{
        "default_vat_type": "VAT Exempt",
        "default_item_class": "Product",
        "default_item_category": "Pharmacy Drugs",
        "default_unit_of_measure": "Pack",
        "default_expiry_date": "31/12/2031",
        "default_reorder_level": 25
    }"#;
    let parsed: UserDefaults = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.default_reorder_level, "25");
    assert_eq!(parsed.default_cost_account, DEFAULT_COST_ACCOUNT);
    assert_eq!(parsed.validate().unwrap().reorder_level(), 25);
}

#[test]
fn recased_touches_only_text_defaults() {
    let validated = UserDefaults::new("vat exempt", "product", "drugs", "pack", "01/06/2031")
        .validate()
        .unwrap();
    let recased = validated.recased(|value| value.to_uppercase());
    assert_eq!(recased.item_class(), "PRODUCT");
    assert_eq!(recased.unit_of_measure(), "PACK");
    assert_eq!(
        recased.account_for(Column::CostOfSaleSubAccount),
        Some("COST OF GOODS SOLD - PHARMACY DRUGS")
    );
    assert_eq!(recased.vat_type(), "vat exempt");
    assert_eq!(recased.expiry_date(), validated.expiry_date());
}
