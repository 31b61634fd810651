//! The fixed inventory column set.

use std::fmt;

/// One of the 16 columns every inventory export must carry.
///
/// Variant order is the canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Name,
    Batch,
    ItemCode,
    Barcode,
    AssetSubAccount,
    RevenueSubAccount,
    CostOfSaleSubAccount,
    VatType,
    UnitOfMeasure,
    ItemClass,
    ItemCategory,
    UnitCost,
    TotalQuantity,
    UnitPrice,
    ExpiryDate,
    ReorderLevel,
}

impl Column {
    /// Required columns in canonical order.
    pub const ALL: [Column; 16] = [
        Column::Name,
        Column::Batch,
        Column::ItemCode,
        Column::Barcode,
        Column::AssetSubAccount,
        Column::RevenueSubAccount,
        Column::CostOfSaleSubAccount,
        Column::VatType,
        Column::UnitOfMeasure,
        Column::ItemClass,
        Column::ItemCategory,
        Column::UnitCost,
        Column::TotalQuantity,
        Column::UnitPrice,
        Column::ExpiryDate,
        Column::ReorderLevel,
    ];

    /// Columns that are title-cased before any other pass runs.
    pub const TITLE_CASE: [Column; 7] = [
        Column::Name,
        Column::UnitOfMeasure,
        Column::AssetSubAccount,
        Column::RevenueSubAccount,
        Column::CostOfSaleSubAccount,
        Column::ItemClass,
        Column::ItemCategory,
    ];

    /// Header text as it appears in the CSV.
    pub const fn as_str(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Batch => "Batch",
            Column::ItemCode => "ItemCode",
            Column::Barcode => "Barcode",
            Column::AssetSubAccount => "AssetSubAccount",
            Column::RevenueSubAccount => "RevenueSubAccount",
            Column::CostOfSaleSubAccount => "CostOfSaleSubAccount",
            Column::VatType => "VATType",
            Column::UnitOfMeasure => "UnitOfMeasure",
            Column::ItemClass => "ItemClass",
            Column::ItemCategory => "ItemCategory",
            Column::UnitCost => "UnitCost",
            Column::TotalQuantity => "TotalQuantity",
            Column::UnitPrice => "UnitPrice",
            Column::ExpiryDate => "ExpiryDate",
            Column::ReorderLevel => "ReorderLevel",
        }
    }

    /// Resolve a header cell to a column. Matching is exact after trimming.
    pub fn from_header(header: &str) -> Option<Column> {
        let trimmed = header.trim();
        Column::ALL
            .iter()
            .copied()
            .find(|column| column.as_str() == trimmed)
    }

    pub fn is_sub_account(self) -> bool {
        matches!(
            self,
            Column::AssetSubAccount | Column::RevenueSubAccount | Column::CostOfSaleSubAccount
        )
    }

    pub fn is_title_cased(self) -> bool {
        Column::TITLE_CASE.contains(&self)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
