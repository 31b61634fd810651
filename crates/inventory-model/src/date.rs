//! `dd/mm/yyyy` handling shared by configuration validation and the expiry validator.

use chrono::NaiveDate;

/// The only accepted date layout for expiry dates.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a `dd/mm/yyyy` string, returning None for empty or invalid input.
///
/// Single-digit day and month values are accepted (`1/2/2030`).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

/// Formats a date as zero-padded `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
