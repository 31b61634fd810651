//! Per-row cleaning pipeline.
//!
//! # Phase Order
//!
//! 1. **TitleCase** - case the descriptive columns, copy the rest
//! 2. **EmptyName** - substitute a placeholder for a missing name
//! 3. **NameCleaning** - strip commas and stray whitespace
//! 4. **Dedup** - drop rows whose cleaned name an emitted row already holds
//! 5. **Unit** - canonicalize the unit of measure
//! 6. **SubAccounts** - match account names against their defaults
//! 7. **Classification** - VAT type, item class and category
//! 8. **Validation** - currency, quantities, expiry and reorder level
//!
//! A row ends either `Emitted` or `Dropped`. Errors raised by a phase never
//! escape [`RowPipeline::process`]; they are logged and the row is dropped.
//! Only an emitted row claims its de-duplication key.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

use chrono::NaiveDate;
use inventory_model::{CleanedRecord, Column, RawRecord, ReportLog, ValidatedDefaults};
use inventory_normalization::{
    ResolveError, UnitNormalizer, UnitResolution, UnitResolver, apply_title_case,
    dedup_key, fill_default, is_placeholder_name, normalize_name, normalize_sub_account,
    normalize_vat_type, validate_currency, validate_expiry, validate_quantity,
    validate_reorder_level,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::dedupe::SeenNames;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    TitleCase,
    EmptyName,
    NameCleaning,
    Dedup,
    Unit,
    SubAccounts,
    Classification,
    Validation,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::TitleCase => "title case",
            Phase::EmptyName => "empty-name guard",
            Phase::NameCleaning => "name cleaning",
            Phase::Dedup => "de-duplication",
            Phase::Unit => "unit normalization",
            Phase::SubAccounts => "sub-account normalization",
            Phase::Classification => "classification defaults",
            Phase::Validation => "numeric and date validation",
        })
    }
}

/// A failure inside one row. Caught at the row boundary.
#[derive(Debug, Error)]
#[error("row {row} failed during {phase}")]
pub struct RowError {
    pub row: usize,
    pub phase: Phase,
    #[source]
    pub source: ResolveError,
}

/// Why a row produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    Duplicate { name: String, first_row: usize },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Emitted(CleanedRecord),
    Dropped(DropReason),
}

/// State that lives across rows for one run: the seen-names set and the
/// unit cache. Defaults are expected to be recased already.
#[derive(Debug)]
pub struct RowPipeline<'a> {
    defaults: &'a ValidatedDefaults,
    today: NaiveDate,
    seen: SeenNames,
    units: UnitNormalizer,
}

impl<'a> RowPipeline<'a> {
    pub fn new(defaults: &'a ValidatedDefaults, today: NaiveDate) -> Self {
        Self {
            defaults,
            today,
            seen: SeenNames::new(),
            units: UnitNormalizer::new(defaults.unit_of_measure()),
        }
    }

    /// Run every phase on `raw`.
    pub fn process(
        &mut self,
        raw: &RawRecord,
        resolver: &mut dyn UnitResolver,
        log: &mut ReportLog,
    ) -> RowOutcome {
        let row = raw.row();
        match self.run_phases(raw, resolver, log) {
            Ok(outcome) => outcome,
            Err(err) => {
                let message = error_chain(&err);
                warn!(row, error = %message, "row dropped");
                log.error(row, format!("Row dropped: {message}"));
                RowOutcome::Dropped(DropReason::Failed { message })
            }
        }
    }

    pub fn resolutions(&self) -> &BTreeMap<String, UnitResolution> {
        self.units.resolutions()
    }

    pub fn into_resolutions(self) -> BTreeMap<String, UnitResolution> {
        self.units.into_resolutions()
    }

    fn run_phases(
        &mut self,
        raw: &RawRecord,
        resolver: &mut dyn UnitResolver,
        log: &mut ReportLog,
    ) -> Result<RowOutcome, RowError> {
        let row = raw.row();
        let defaults = self.defaults;

        // TitleCase; a placeholder from an earlier run keeps its casing.
        let mut working = RawRecord::new(row);
        for column in Column::ALL {
            let value = raw.get(column);
            if column == Column::Name && is_placeholder_name(value) {
                working.set(column, value);
            } else if column.is_title_cased() {
                working.set(column, apply_title_case(value, column, row, log));
            } else {
                working.set(column, value.trim());
            }
        }

        // EmptyName + NameCleaning
        let name = normalize_name(working.get(Column::Name), row, log);

        // Dedup
        let key = (!name.is_placeholder()).then(|| dedup_key(name.as_str()));
        if let Some(key) = &key
            && let Some(first_row) = self.seen.first_row(key)
        {
            let cleaned = name.as_str();
            debug!(row, first_row, name = %cleaned, "duplicate dropped");
            log.duplicate_removed(
                row,
                format!("Duplicate '{cleaned}' removed (first seen on row {first_row})"),
            );
            return Ok(RowOutcome::Dropped(DropReason::Duplicate {
                name: cleaned.to_string(),
                first_row,
            }));
        }

        // Unit
        let unit_of_measure = self
            .units
            .normalize(
                working.get(Column::UnitOfMeasure),
                name.as_str(),
                row,
                resolver,
                log,
            )
            .map_err(|source| RowError {
                row,
                phase: Phase::Unit,
                source,
            })?;

        // SubAccounts
        let settings = defaults.settings();
        let asset_sub_account = normalize_sub_account(
            working.get(Column::AssetSubAccount),
            &settings.default_asset_account,
            Column::AssetSubAccount,
            row,
            log,
        );
        let revenue_sub_account = normalize_sub_account(
            working.get(Column::RevenueSubAccount),
            &settings.default_revenue_account,
            Column::RevenueSubAccount,
            row,
            log,
        );
        let cost_of_sale_sub_account = normalize_sub_account(
            working.get(Column::CostOfSaleSubAccount),
            &settings.default_cost_account,
            Column::CostOfSaleSubAccount,
            row,
            log,
        );

        // Classification
        let vat_type =
            normalize_vat_type(working.get(Column::VatType), defaults.vat_type(), row, log);
        let item_class = fill_default(
            working.get(Column::ItemClass),
            defaults.item_class(),
            Column::ItemClass,
            row,
            log,
        );
        let item_category = fill_default(
            working.get(Column::ItemCategory),
            defaults.item_category(),
            Column::ItemCategory,
            row,
            log,
        );

        // Validation
        let unit_cost =
            validate_currency(working.get(Column::UnitCost), Column::UnitCost, row, log);
        let total_quantity = validate_quantity(
            working.get(Column::TotalQuantity),
            Column::TotalQuantity,
            row,
            log,
        );
        let unit_price =
            validate_currency(working.get(Column::UnitPrice), Column::UnitPrice, row, log);
        let expiry_date = validate_expiry(
            working.get(Column::ExpiryDate),
            defaults.expiry_date(),
            self.today,
            row,
            log,
        );
        let reorder_level = validate_reorder_level(
            working.get(Column::ReorderLevel),
            defaults.reorder_level(),
            row,
            log,
        );

        if let Some(key) = key {
            self.seen.claim(key, row);
        }
        Ok(RowOutcome::Emitted(CleanedRecord {
            name: name.into_string(),
            batch: working.get(Column::Batch).to_string(),
            item_code: working.get(Column::ItemCode).to_string(),
            barcode: working.get(Column::Barcode).to_string(),
            asset_sub_account,
            revenue_sub_account,
            cost_of_sale_sub_account,
            vat_type,
            unit_of_measure,
            item_class,
            item_category,
            unit_cost,
            total_quantity,
            unit_price,
            expiry_date,
            reorder_level,
        }))
    }
}

/// `outer: inner: innermost`, following `source()` links.
pub fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(source) = current {
        message.push_str(": ");
        message.push_str(&source.to_string());
        current = source.source();
    }
    message
}
