//! Currency, quantity and reorder-level validation.
//!
//! Values are parsed as exact decimals from the cleaned text, so rounding
//! follows what was typed rather than its binary approximation.

use inventory_model::{Column, Currency, ReportLog};

/// Keep digits, `.` and `-`; everything else (currency symbols, thousands
/// separators, units) is dropped.
pub fn strip_numeric_noise(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == '-')
        .collect()
}

/// A decimal literal split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimal<'a> {
    pub negative: bool,
    pub whole: &'a str,
    pub fraction: &'a str,
}

impl<'a> Decimal<'a> {
    /// Parse `-?digits(.digits)?`; either side of the point may be empty, not both.
    pub fn parse(text: &'a str) -> Option<Self> {
        let (negative, rest) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (whole, fraction) = rest.split_once('.').unwrap_or((rest, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !digits(whole) || !digits(fraction) {
            return None;
        }
        Some(Self {
            negative,
            whole,
            fraction,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.whole.bytes().chain(self.fraction.bytes()).all(|b| b == b'0')
    }

    /// True when the value is below zero (`-0` is not).
    pub fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    /// Integer part, or None if it does not fit.
    pub fn whole_value(&self) -> Option<u64> {
        if self.whole.is_empty() {
            return Some(0);
        }
        self.whole.parse().ok()
    }

    /// Whether any non-zero digit sits past `places` fractional digits.
    pub fn has_digits_beyond(&self, places: usize) -> bool {
        self.fraction.bytes().skip(places).any(|b| b != b'0')
    }

    /// Magnitude rounded half-up to cents.
    pub fn cents_half_up(&self) -> Option<u64> {
        let mut digits = self.fraction.bytes().map(|b| u64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|digit| digit >= 5);
        self.whole_value()?
            .checked_mul(100)?
            .checked_add(tenths * 10 + hundredths)?
            .checked_add(u64::from(round_up))
    }
}

/// Validate `UnitCost` / `UnitPrice`.
///
/// Empty, unparsable and negative values become `0.00` with an error entry;
/// the row is kept.
pub fn validate_currency(value: &str, column: Column, row: usize, log: &mut ReportLog) -> Currency {
    let raw = value.trim();
    if raw.is_empty() {
        log.error(row, format!("{column} is empty; set to {}", Currency::ZERO));
        return Currency::ZERO;
    }
    let cleaned = strip_numeric_noise(raw);
    let Some(decimal) = Decimal::parse(&cleaned) else {
        log.error(
            row,
            format!("Invalid {column} value '{raw}'; set to {}", Currency::ZERO),
        );
        return Currency::ZERO;
    };
    if decimal.is_negative() {
        log.error(
            row,
            format!("Negative {column} '{raw}' corrected to {}", Currency::ZERO),
        );
        log.count_negative_correction();
        return Currency::ZERO;
    }
    let Some(cents) = decimal.cents_half_up() else {
        log.error(
            row,
            format!("{column} value '{raw}' is out of range; set to {}", Currency::ZERO),
        );
        return Currency::ZERO;
    };
    let amount = Currency::from_cents(cents);
    if decimal.has_digits_beyond(2) {
        log.normalization(row, column, format!("{column} rounded: '{raw}' → '{amount}'"));
        log.count_numeric_conversion();
    }
    amount
}

/// Validate `TotalQuantity`; decimals are truncated, never rounded.
pub fn validate_quantity(value: &str, column: Column, row: usize, log: &mut ReportLog) -> u64 {
    let raw = value.trim();
    if raw.is_empty() {
        log.error(row, format!("{column} is empty; set to 0"));
        return 0;
    }
    let cleaned = strip_numeric_noise(raw);
    let Some(decimal) = Decimal::parse(&cleaned) else {
        log.error(row, format!("Invalid {column} value '{raw}'; set to 0"));
        return 0;
    };
    if decimal.is_negative() {
        log.error(row, format!("Negative {column} '{raw}' corrected to 0"));
        log.count_negative_correction();
        return 0;
    }
    let Some(quantity) = decimal.whole_value() else {
        log.error(row, format!("{column} value '{raw}' is out of range; set to 0"));
        return 0;
    };
    if decimal.has_digits_beyond(0) {
        log.normalization(
            row,
            column,
            format!("{column} '{raw}' converted to integer '{quantity}'"),
        );
        log.count_numeric_conversion();
    }
    quantity
}

/// Validate `ReorderLevel`, falling back to the configured default.
pub fn validate_reorder_level(value: &str, default: u64, row: usize, log: &mut ReportLog) -> u64 {
    let column = Column::ReorderLevel;
    let raw = value.trim();
    if raw.is_empty() {
        log.default_used(
            row,
            column,
            format!("Empty ReorderLevel replaced with default '{default}'"),
        );
        return default;
    }
    let cleaned = strip_numeric_noise(raw);
    let Some(level) = Decimal::parse(&cleaned).filter(|decimal| decimal.whole_value().is_some())
    else {
        log.error(row, format!("Invalid ReorderLevel value '{raw}'"));
        log.default_used(
            row,
            column,
            format!("Invalid ReorderLevel '{raw}' replaced with default '{default}'"),
        );
        return default;
    };
    if level.is_negative() {
        log.warning(
            row,
            format!("Negative ReorderLevel '{raw}' replaced with default '{default}'"),
        );
        log.count_negative_correction();
        return default;
    }
    let whole = level.whole_value().unwrap_or(default);
    if level.has_digits_beyond(0) {
        log.normalization(
            row,
            column,
            format!("ReorderLevel '{raw}' converted to integer '{whole}'"),
        );
        log.count_numeric_conversion();
    }
    whole
}

#[cfg(test)]
mod tests {
    use inventory_model::{LogCategory, Tally};

    use super::*;

    #[test]
    fn decimal_parsing_accepts_loose_forms() {
        assert!(Decimal::parse("5.").is_some());
        assert!(Decimal::parse(".5").is_some());
        assert!(Decimal::parse("-0").is_some_and(|d| !d.is_negative()));
        for bad in ["", "-", ".", "1.2.3", "1-2", "--1"] {
            assert!(Decimal::parse(bad).is_none(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn half_up_rounding_uses_typed_digits() {
        let cents = |text| Decimal::parse(text).and_then(|d| d.cents_half_up());
        assert_eq!(cents("12.345"), Some(1235));
        assert_eq!(cents("12.344"), Some(1234));
        assert_eq!(cents("0.005"), Some(1));
        assert_eq!(cents("7"), Some(700));
        assert_eq!(cents("99999999999999999999"), None);
    }

    #[test]
    fn currency_noise_is_stripped_and_rounding_logged() {
        let mut log = ReportLog::new();
        assert_eq!(
            validate_currency("KSh 1,250.50", Column::UnitPrice, 1, &mut log).to_string(),
            "1250.50"
        );
        assert_eq!(log.count(LogCategory::Normalization), 0);

        let rounded = validate_currency("12.345", Column::UnitCost, 2, &mut log);
        assert_eq!(rounded.to_string(), "12.35");
        assert_eq!(log.count(LogCategory::Normalization), 1);
        assert_eq!(log.tally().numeric_conversions, 1);
    }

    #[test]
    fn bad_currency_becomes_zero_with_errors() {
        let mut log = ReportLog::new();
        for value in ["", "abc", "-5"] {
            assert_eq!(
                validate_currency(value, Column::UnitCost, 3, &mut log),
                Currency::ZERO
            );
        }
        assert_eq!(log.count(LogCategory::Error), 3);
        assert_eq!(log.tally().negative_corrections, 1);
    }

    #[test]
    fn quantities_truncate() {
        let mut log = ReportLog::new();
        assert_eq!(validate_quantity("10.9", Column::TotalQuantity, 1, &mut log), 10);
        assert_eq!(validate_quantity("10.0", Column::TotalQuantity, 1, &mut log), 10);
        assert_eq!(validate_quantity("-3", Column::TotalQuantity, 2, &mut log), 0);
        assert_eq!(
            log.tally(),
            Tally {
                negative_corrections: 1,
                numeric_conversions: 1
            }
        );
        assert_eq!(log.count(LogCategory::Normalization), 1);
        assert_eq!(log.count(LogCategory::Error), 1);
    }

    #[test]
    fn reorder_level_falls_back_to_default() {
        let mut log = ReportLog::new();
        assert_eq!(validate_reorder_level("", 10, 1, &mut log), 10);
        assert_eq!(validate_reorder_level("lots", 10, 2, &mut log), 10);
        assert_eq!(validate_reorder_level("-4", 10, 3, &mut log), 10);
        assert_eq!(validate_reorder_level("7.8", 10, 4, &mut log), 7);
        assert_eq!(validate_reorder_level("25", 10, 5, &mut log), 25);

        assert_eq!(log.count(LogCategory::DefaultUsed), 2);
        assert_eq!(log.count(LogCategory::Error), 1);
        assert_eq!(log.count(LogCategory::Warning), 1);
        assert_eq!(log.count(LogCategory::Normalization), 1);
    }
}
