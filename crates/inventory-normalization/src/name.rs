//! Product-name cleanup and the de-duplication key.

use inventory_model::{Column, ReportLog};

use crate::title_case::title_case;

pub const PLACEHOLDER_PREFIX: &str = "EMPTY_NAME_ROW_";

/// A cleaned product name, or the placeholder substituted for a missing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductName {
    Named(String),
    Placeholder(String),
}

impl ProductName {
    pub fn placeholder(row: usize) -> Self {
        ProductName::Placeholder(format!("{PLACEHOLDER_PREFIX}{row}"))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProductName::Named(name) | ProductName::Placeholder(name) => name,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ProductName::Placeholder(_))
    }

    pub fn into_string(self) -> String {
        match self {
            ProductName::Named(name) | ProductName::Placeholder(name) => name,
        }
    }
}

/// True for a previously substituted `EMPTY_NAME_ROW_<n>` placeholder.
pub fn is_placeholder_name(value: &str) -> bool {
    value
        .strip_prefix(PLACEHOLDER_PREFIX)
        .is_some_and(|row| !row.is_empty() && row.bytes().all(|b| b.is_ascii_digit()))
}

/// Commas become spaces, whitespace runs collapse, ends are trimmed.
pub fn clean_name(value: &str) -> String {
    value
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case- and whitespace-insensitive key used to spot duplicate products.
pub fn dedup_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Clean an already title-cased name.
///
/// Words split apart at commas are cased again: `Mr,Smith` becomes `MR Smith`.
///
/// A blank name, or one that cleans down to nothing, is replaced by the
/// row placeholder and logged as an error.
pub fn normalize_name(value: &str, row: usize, log: &mut ReportLog) -> ProductName {
    if value.trim().is_empty() {
        return substitute_placeholder(value, row, log);
    }
    let cleaned = title_case(&clean_name(value));
    if cleaned != value {
        log.normalization(
            row,
            Column::Name,
            format!("Name cleaned: '{value}' → '{cleaned}'"),
        );
    }
    if cleaned.is_empty() {
        return substitute_placeholder(value, row, log);
    }
    ProductName::Named(cleaned)
}

fn substitute_placeholder(value: &str, row: usize, log: &mut ReportLog) -> ProductName {
    let placeholder = ProductName::placeholder(row);
    log.error(
        row,
        format!(
            "Product name '{value}' is empty; using placeholder '{}'",
            placeholder.as_str()
        ),
    );
    placeholder
}

#[cfg(test)]
mod tests {
    use inventory_model::LogCategory;

    use super::*;

    #[test]
    fn commas_and_spaces_are_cleaned() {
        assert_eq!(clean_name("Paracetamol  500Mg,  Tabs"), "Paracetamol 500Mg Tabs");
        assert_eq!(clean_name(" Aspirin, "), "Aspirin");
    }

    #[test]
    fn dedup_key_ignores_case_and_spacing() {
        assert_eq!(dedup_key("Aspirin  500Mg"), dedup_key("aspirin 500mg"));
        assert_ne!(dedup_key("Aspirin"), dedup_key("Aspirin 75Mg"));
    }

    #[test]
    fn blank_and_comma_only_names_get_placeholders() {
        let mut log = ReportLog::new();
        let blank = normalize_name("", 4, &mut log);
        assert_eq!(blank, ProductName::Placeholder("EMPTY_NAME_ROW_4".to_string()));

        let commas = normalize_name(",,", 7, &mut log);
        assert!(commas.is_placeholder());
        assert_eq!(commas.as_str(), "EMPTY_NAME_ROW_7");
        assert_eq!(log.count(LogCategory::Error), 2);
        assert_eq!(log.count(LogCategory::Normalization), 1);
    }

    #[test]
    fn recognizes_placeholders() {
        assert!(is_placeholder_name("EMPTY_NAME_ROW_12"));
        assert!(!is_placeholder_name("EMPTY_NAME_ROW_"));
        assert!(!is_placeholder_name("Empty_name_row_12"));
    }

    #[test]
    fn comma_split_words_are_cased_again() {
        let mut log = ReportLog::new();
        let name = normalize_name("Mr,Smith Plasters", 3, &mut log);
        assert_eq!(name, ProductName::Named("MR Smith Plasters".to_string()));
        let entries = log.entries(LogCategory::Normalization);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].to_string(),
            "Row 3: Name cleaned: 'Mr,Smith Plasters' → 'MR Smith Plasters'"
        );

        let mut second = ReportLog::new();
        normalize_name(name.as_str(), 3, &mut second);
        assert!(second.is_empty());
    }

    #[test]
    fn clean_name_is_not_logged() {
        let mut log = ReportLog::new();
        let name = normalize_name("Aspirin 75Mg", 1, &mut log);
        assert_eq!(name, ProductName::Named("Aspirin 75Mg".to_string()));
        assert_eq!(log.count(LogCategory::Normalization), 0);
    }
}
