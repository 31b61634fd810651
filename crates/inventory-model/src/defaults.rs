//! Operator-supplied defaults used to fill and replace bad cells.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::column::Column;
use crate::date::{format_date, parse_date};
use crate::error::{ConfigError, Result};

pub const DEFAULT_REORDER_LEVEL: u64 = 10;
pub const DEFAULT_ASSET_ACCOUNT: &str = "Inventory - Pharmacy Drugs";
pub const DEFAULT_REVENUE_ACCOUNT: &str = "Sales - Pharmacy Drugs";
pub const DEFAULT_COST_ACCOUNT: &str = "Cost Of Goods Sold - Pharmacy Drugs";

/// Minimum distance, in days, the default expiry date should sit in the future.
pub const EXPIRY_HORIZON_DAYS: u64 = 365;

/// Defaults as supplied by the operator, before validation.
///
/// Field names match the JSON configuration file. The reorder level is kept
/// as text so that a bad value surfaces as a validation error rather than a
/// deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDefaults {
    pub default_vat_type: String,
    pub default_item_class: String,
    pub default_item_category: String,
    pub default_unit_of_measure: String,
    pub default_expiry_date: String,
    #[serde(
        default = "default_reorder_level",
        deserialize_with = "string_or_number"
    )]
    pub default_reorder_level: String,
    #[serde(default = "default_asset_account")]
    pub default_asset_account: String,
    #[serde(default = "default_revenue_account")]
    pub default_revenue_account: String,
    #[serde(default = "default_cost_account")]
    pub default_cost_account: String,
}

fn default_reorder_level() -> String {
    DEFAULT_REORDER_LEVEL.to_string()
}

fn default_asset_account() -> String {
    DEFAULT_ASSET_ACCOUNT.to_string()
}

fn default_revenue_account() -> String {
    DEFAULT_REVENUE_ACCOUNT.to_string()
}

fn default_cost_account() -> String {
    DEFAULT_COST_ACCOUNT.to_string()
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
        Raw::Text(value) => value,
    })
}

impl UserDefaults {
    /// Create defaults from the required fields; optional fields take their fallbacks.
    pub fn new(
        vat_type: impl Into<String>,
        item_class: impl Into<String>,
        item_category: impl Into<String>,
        unit_of_measure: impl Into<String>,
        expiry_date: impl Into<String>,
    ) -> Self {
        Self {
            default_vat_type: vat_type.into(),
            default_item_class: item_class.into(),
            default_item_category: item_category.into(),
            default_unit_of_measure: unit_of_measure.into(),
            default_expiry_date: expiry_date.into(),
            default_reorder_level: default_reorder_level(),
            default_asset_account: default_asset_account(),
            default_revenue_account: default_revenue_account(),
            default_cost_account: default_cost_account(),
        }
    }

    #[must_use]
    pub fn with_reorder_level(mut self, value: impl Into<String>) -> Self {
        self.default_reorder_level = value.into();
        self
    }

    #[must_use]
    pub fn with_asset_account(mut self, value: impl Into<String>) -> Self {
        self.default_asset_account = value.into();
        self
    }

    #[must_use]
    pub fn with_revenue_account(mut self, value: impl Into<String>) -> Self {
        self.default_revenue_account = value.into();
        self
    }

    #[must_use]
    pub fn with_cost_account(mut self, value: impl Into<String>) -> Self {
        self.default_cost_account = value.into();
        self
    }

    /// Check every field once, before any row is touched.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a blank required field, an expiry date
    /// that is not `dd/mm/yyyy`, or a reorder level that is not a
    /// non-negative integer.
    pub fn validate(&self) -> Result<ValidatedDefaults> {
        let required = [
            ("default_vat_type", &self.default_vat_type),
            ("default_item_class", &self.default_item_class),
            ("default_item_category", &self.default_item_category),
            ("default_unit_of_measure", &self.default_unit_of_measure),
            ("default_expiry_date", &self.default_expiry_date),
            ("default_asset_account", &self.default_asset_account),
            ("default_revenue_account", &self.default_revenue_account),
            ("default_cost_account", &self.default_cost_account),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingDefault { field });
            }
        }

        let expiry_date =
            parse_date(&self.default_expiry_date).ok_or_else(|| ConfigError::InvalidExpiryDate {
                value: self.default_expiry_date.clone(),
            })?;

        let reorder_text = self.default_reorder_level.trim();
        let reorder_level = reorder_text
            .parse::<i64>()
            .ok()
            .and_then(|value| u64::try_from(value).ok())
            .ok_or_else(|| ConfigError::InvalidReorderLevel {
                value: self.default_reorder_level.clone(),
            })?;

        let settings = UserDefaults {
            default_vat_type: self.default_vat_type.trim().to_string(),
            default_item_class: self.default_item_class.trim().to_string(),
            default_item_category: self.default_item_category.trim().to_string(),
            default_unit_of_measure: self.default_unit_of_measure.trim().to_string(),
            default_expiry_date: format_date(expiry_date),
            default_reorder_level: reorder_level.to_string(),
            default_asset_account: self.default_asset_account.trim().to_string(),
            default_revenue_account: self.default_revenue_account.trim().to_string(),
            default_cost_account: self.default_cost_account.trim().to_string(),
        };

        Ok(ValidatedDefaults {
            settings,
            expiry_date,
            reorder_level,
        })
    }
}

/// Defaults that passed validation, with the typed values pre-parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDefaults {
    settings: UserDefaults,
    expiry_date: NaiveDate,
    reorder_level: u64,
}

impl ValidatedDefaults {
    pub fn settings(&self) -> &UserDefaults {
        &self.settings
    }

    pub fn vat_type(&self) -> &str {
        &self.settings.default_vat_type
    }

    pub fn item_class(&self) -> &str {
        &self.settings.default_item_class
    }

    pub fn item_category(&self) -> &str {
        &self.settings.default_item_category
    }

    pub fn unit_of_measure(&self) -> &str {
        &self.settings.default_unit_of_measure
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    pub fn reorder_level(&self) -> u64 {
        self.reorder_level
    }

    /// Authoritative account name for a sub-account column.
    pub fn account_for(&self, column: Column) -> Option<&str> {
        match column {
            Column::AssetSubAccount => Some(&self.settings.default_asset_account),
            Column::RevenueSubAccount => Some(&self.settings.default_revenue_account),
            Column::CostOfSaleSubAccount => Some(&self.settings.default_cost_account),
            _ => None,
        }
    }

    /// True when the default expiry is not at least a year past `today`.
    pub fn expiry_within_horizon(&self, today: NaiveDate) -> bool {
        match today.checked_add_days(Days::new(EXPIRY_HORIZON_DAYS)) {
            Some(horizon) => self.expiry_date <= horizon,
            None => true,
        }
    }

    /// Rewrite the defaults that land in cased text columns (class, category,
    /// unit and the three accounts) with `case`, leaving VAT and dates alone.
    #[must_use]
    pub fn recased(&self, case: impl Fn(&str) -> String) -> Self {
        let s = &self.settings;
        let settings = UserDefaults {
            default_item_class: case(&s.default_item_class),
            default_item_category: case(&s.default_item_category),
            default_unit_of_measure: case(&s.default_unit_of_measure),
            default_asset_account: case(&s.default_asset_account),
            default_revenue_account: case(&s.default_revenue_account),
            default_cost_account: case(&s.default_cost_account),
            ..s.clone()
        };
        Self {
            settings,
            ..self.clone()
        }
    }

    /// `(field, value)` pairs in configuration order, for reporting.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let s = &self.settings;
        vec![
            ("default_vat_type", s.default_vat_type.as_str()),
            ("default_item_class", s.default_item_class.as_str()),
            ("default_item_category", s.default_item_category.as_str()),
            ("default_unit_of_measure", s.default_unit_of_measure.as_str()),
            ("default_expiry_date", s.default_expiry_date.as_str()),
            ("default_reorder_level", s.default_reorder_level.as_str()),
            ("default_asset_account", s.default_asset_account.as_str()),
            ("default_revenue_account", s.default_revenue_account.as_str()),
            ("default_cost_account", s.default_cost_account.as_str()),
        ]
    }
}
