//! Expiry-date validation with future-date substitution.

use chrono::{Days, NaiveDate};
use inventory_model::{Column, EXPIRY_HORIZON_DAYS, ReportLog, format_date, parse_date};

/// Date used when a row's own expiry cannot be kept.
///
/// The configured default wins when it is still in the future; otherwise a
/// year from `today`.
pub fn substitute_expiry(default: NaiveDate, today: NaiveDate) -> (NaiveDate, bool) {
    if default > today {
        return (default, true);
    }
    let computed = today
        .checked_add_days(Days::new(EXPIRY_HORIZON_DAYS))
        .unwrap_or(NaiveDate::MAX);
    (computed, false)
}

/// Validate one `ExpiryDate` cell. Always yields a date after `today`.
pub fn validate_expiry(
    value: &str,
    default: NaiveDate,
    today: NaiveDate,
    row: usize,
    log: &mut ReportLog,
) -> NaiveDate {
    let column = Column::ExpiryDate;
    let raw = value.trim();
    let (fallback, from_default) = substitute_expiry(default, today);
    let fallback_text = format_date(fallback);
    let describe = if from_default {
        format!("default '{fallback_text}'")
    } else {
        format!("computed future date '{fallback_text}'")
    };

    if raw.is_empty() {
        log.default_used(
            row,
            column,
            format!("Missing expiry date replaced with {describe}"),
        );
        return fallback;
    }

    match parse_date(raw) {
        Some(date) if date > today => {
            let rendered = format_date(date);
            if rendered != raw {
                log.normalization(
                    row,
                    column,
                    format!("ExpiryDate reformatted: '{raw}' → '{rendered}'"),
                );
            }
            date
        }
        Some(_) => {
            log.default_used(
                row,
                column,
                format!("Expired date '{raw}' replaced with {describe}"),
            );
            fallback
        }
        None => {
            log.error(
                row,
                format!("Invalid ExpiryDate '{raw}' (expected dd/mm/yyyy)"),
            );
            log.default_used(
                row,
                column,
                format!("Invalid expiry date '{raw}' replaced with {describe}"),
            );
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use inventory_model::LogCategory;

    use super::*;

    fn date(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn future_dates_are_kept_and_padded() {
        let mut log = ReportLog::new();
        let today = date(1, 1, 2026);
        let kept = validate_expiry("1/2/2030", date(31, 12, 2027), today, 1, &mut log);
        assert_eq!(kept, date(1, 2, 2030));
        assert_eq!(log.count(LogCategory::Normalization), 1);

        validate_expiry("01/02/2030", date(31, 12, 2027), today, 2, &mut log);
        assert_eq!(log.count(LogCategory::Normalization), 1);
    }

    #[test]
    fn missing_expired_and_invalid_use_default() {
        let mut log = ReportLog::new();
        let today = date(1, 1, 2026);
        let default = date(31, 12, 2027);
        for value in ["", "01/01/2026", "2030-01-01"] {
            assert_eq!(validate_expiry(value, default, today, 1, &mut log), default);
        }
        assert_eq!(log.count(LogCategory::DefaultUsed), 3);
        assert_eq!(log.count(LogCategory::Error), 1);
    }

    #[test]
    fn stale_default_falls_back_to_a_year_out() {
        let mut log = ReportLog::new();
        let today = date(15, 3, 2026);
        let result = validate_expiry("", date(1, 1, 2026), today, 1, &mut log);
        assert_eq!(result, date(15, 3, 2027));
        assert!(
            log.entries(LogCategory::DefaultUsed)[0]
                .message
                .contains("computed future date '15/03/2027'")
        );
    }
}
