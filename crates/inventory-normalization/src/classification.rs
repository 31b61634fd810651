//! VAT type and item classification defaults.

use inventory_model::{Column, ReportLog};

use crate::tables::VALID_VAT_TYPES;

/// Canonical spelling for a case-insensitive VAT type match.
pub fn canonical_vat_type(value: &str) -> Option<&'static str> {
    let value = value.trim();
    VALID_VAT_TYPES
        .iter()
        .find(|valid| valid.eq_ignore_ascii_case(value))
        .copied()
}

/// Validate `VATType` against the accepted spellings and the configured default.
pub fn normalize_vat_type(value: &str, default: &str, row: usize, log: &mut ReportLog) -> String {
    let column = Column::VatType;
    let value = value.trim();
    if value.is_empty() {
        log.default_used(
            row,
            column,
            format!("Empty VATType replaced with default '{default}'"),
        );
        return default.to_string();
    }
    if value == default || VALID_VAT_TYPES.contains(&value) {
        return value.to_string();
    }
    if value.eq_ignore_ascii_case(default) {
        log.normalization(
            row,
            column,
            format!("VATType normalized: '{value}' → '{default}'"),
        );
        return default.to_string();
    }
    match canonical_vat_type(value) {
        Some(canonical) => {
            log.normalization(
                row,
                column,
                format!("VATType normalized: '{value}' → '{canonical}'"),
            );
            canonical.to_string()
        }
        None => {
            log.warning(
                row,
                format!("Invalid VATType '{value}' replaced with default '{default}'"),
            );
            default.to_string()
        }
    }
}

/// Fill an empty `ItemClass` / `ItemCategory` cell from its default.
pub fn fill_default(
    value: &str,
    default: &str,
    column: Column,
    row: usize,
    log: &mut ReportLog,
) -> String {
    let value = value.trim();
    if value.is_empty() {
        log.default_used(
            row,
            column,
            format!("Empty {column} replaced with default '{default}'"),
        );
        return default.to_string();
    }
    value.to_string()
}
