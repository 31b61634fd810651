//! Raw and cleaned inventory records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::column::Column;
use crate::date::format_date;

/// One input row as read from the export, keyed by required column.
///
/// Missing cells read as empty strings. `row` is the 1-based data row number
/// (the header is not counted) and is what every log entry refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    row: usize,
    fields: BTreeMap<Column, String>,
}

impl RawRecord {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style setter, mostly used by tests and the ingest layer.
    #[must_use]
    pub fn with(mut self, column: Column, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        self.fields.insert(column, value.into());
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn get(&self, column: Column) -> &str {
        self.fields.get(&column).map(String::as_str).unwrap_or("")
    }

    /// True when every cell is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|value| value.trim().is_empty())
    }
}

/// A non-negative amount stored as whole cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Currency(u64);

impl Currency {
    pub const ZERO: Currency = Currency(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// A fully normalized record, ready for import.
///
/// Numeric fields are typed so the non-negativity and precision guarantees
/// hold by construction. Built once by the row pipeline and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedRecord {
    pub name: String,
    pub batch: String,
    pub item_code: String,
    pub barcode: String,
    pub asset_sub_account: String,
    pub revenue_sub_account: String,
    pub cost_of_sale_sub_account: String,
    pub vat_type: String,
    pub unit_of_measure: String,
    pub item_class: String,
    pub item_category: String,
    pub unit_cost: Currency,
    pub total_quantity: u64,
    pub unit_price: Currency,
    pub expiry_date: NaiveDate,
    pub reorder_level: u64,
}

impl CleanedRecord {
    /// Rendered cell value for a column.
    pub fn value(&self, column: Column) -> String {
        match column {
            Column::Name => self.name.clone(),
            Column::Batch => self.batch.clone(),
            Column::ItemCode => self.item_code.clone(),
            Column::Barcode => self.barcode.clone(),
            Column::AssetSubAccount => self.asset_sub_account.clone(),
            Column::RevenueSubAccount => self.revenue_sub_account.clone(),
            Column::CostOfSaleSubAccount => self.cost_of_sale_sub_account.clone(),
            Column::VatType => self.vat_type.clone(),
            Column::UnitOfMeasure => self.unit_of_measure.clone(),
            Column::ItemClass => self.item_class.clone(),
            Column::ItemCategory => self.item_category.clone(),
            Column::UnitCost => self.unit_cost.to_string(),
            Column::TotalQuantity => self.total_quantity.to_string(),
            Column::UnitPrice => self.unit_price.to_string(),
            Column::ExpiryDate => format_date(self.expiry_date),
            Column::ReorderLevel => self.reorder_level.to_string(),
        }
    }

    /// Cell values in canonical column order.
    pub fn to_row(&self) -> Vec<String> {
        Column::ALL.iter().map(|column| self.value(*column)).collect()
    }

    /// Re-reads this record as raw input, e.g. to feed a second cleaning pass.
    pub fn to_raw(&self, row: usize) -> RawRecord {
        let mut raw = RawRecord::new(row);
        for column in Column::ALL {
            raw.set(column, self.value(column));
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_renders_two_decimals() {
        assert_eq!(Currency::from_cents(1235).to_string(), "12.35");
        assert_eq!(Currency::from_cents(5).to_string(), "0.05");
        assert_eq!(Currency::ZERO.to_string(), "0.00");
    }

    #[test]
    fn raw_record_reads_missing_cells_as_empty() {
        let raw = RawRecord::new(3).with(Column::Name, "Aspirin");
        assert_eq!(raw.row(), 3);
        assert_eq!(raw.get(Column::Name), "Aspirin");
        assert_eq!(raw.get(Column::Batch), "");
        assert!(!raw.is_blank());
        assert!(RawRecord::new(4).with(Column::Batch, "  ").is_blank());
    }
}
