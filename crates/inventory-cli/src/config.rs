//! Defaults and unit-map files for the `clean` command.
//!
//! Defaults come from an optional JSON file; per-field command-line values
//! override whatever the file says. Validation is left to the cleaner.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use inventory_model::UserDefaults;
use tracing::debug;

/// Per-field overrides from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultsOverrides {
    pub vat_type: Option<String>,
    pub item_class: Option<String>,
    pub item_category: Option<String>,
    pub unit_of_measure: Option<String>,
    pub expiry_date: Option<String>,
    pub reorder_level: Option<String>,
    pub asset_account: Option<String>,
    pub revenue_account: Option<String>,
    pub cost_account: Option<String>,
}

impl DefaultsOverrides {
    pub fn apply(&self, defaults: &mut UserDefaults) {
        let fields = [
            (&self.vat_type, &mut defaults.default_vat_type),
            (&self.item_class, &mut defaults.default_item_class),
            (&self.item_category, &mut defaults.default_item_category),
            (&self.unit_of_measure, &mut defaults.default_unit_of_measure),
            (&self.expiry_date, &mut defaults.default_expiry_date),
            (&self.reorder_level, &mut defaults.default_reorder_level),
            (&self.asset_account, &mut defaults.default_asset_account),
            (&self.revenue_account, &mut defaults.default_revenue_account),
            (&self.cost_account, &mut defaults.default_cost_account),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        }
    }

    /// Flags for required defaults that were not given.
    fn missing_required(&self) -> Vec<&'static str> {
        [
            (&self.vat_type, "--vat-type"),
            (&self.item_class, "--item-class"),
            (&self.item_category, "--item-category"),
            (&self.unit_of_measure, "--unit"),
            (&self.expiry_date, "--expiry-date"),
        ]
        .into_iter()
        .filter(|(value, _)| value.is_none())
        .map(|(_, flag)| flag)
        .collect()
    }
}

pub fn load_defaults_file(path: &Path) -> Result<UserDefaults> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read defaults file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse defaults file {}", path.display()))
}

/// Defaults from `file` (when given) with `overrides` applied on top.
///
/// # Errors
///
/// Fails when the file cannot be read or parsed, or, without a file, when a
/// required default has no flag.
pub fn resolve_defaults(
    file: Option<&Path>,
    overrides: &DefaultsOverrides,
) -> Result<UserDefaults> {
    let mut defaults = match file {
        Some(path) => load_defaults_file(path)?,
        None => {
            let missing = overrides.missing_required();
            if !missing.is_empty() {
                bail!(
                    "missing defaults {}; pass --defaults <JSON> or set them on the command line",
                    missing.join(", ")
                );
            }
            UserDefaults::new("", "", "", "", "")
        }
    };
    overrides.apply(&mut defaults);
    debug!(?defaults, "resolved defaults");
    Ok(defaults)
}

/// Read a JSON object of `"raw unit": "replacement"` pairs.
pub fn load_unit_map(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read unit map {}", path.display()))?;
    let map: BTreeMap<String, String> = serde_json::from_str(&text)
        .with_context(|| format!("parse unit map {}", path.display()))?;
    if let Some((raw, _)) = map.iter().find(|(_, unit)| unit.trim().is_empty()) {
        bail!("unit map {} maps '{raw}' to a blank unit", path.display());
    }
    Ok(map)
}
