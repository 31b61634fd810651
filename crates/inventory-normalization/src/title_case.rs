//! Word-aware title casing for descriptive columns.

use inventory_model::{Column, ReportLog};

use crate::tables::UPPERCASE_WORDS;

/// Title-case a value word by word.
///
/// Whitespace runs collapse to single spaces. Known acronyms come out upper
/// case, hyphenated words are cased per segment (all-upper segments are kept),
/// and words already in `Capital` + lowercase form are left alone.
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title-case `value` for `column`, logging a normalization when it changed.
pub fn apply_title_case(value: &str, column: Column, row: usize, log: &mut ReportLog) -> String {
    if value.is_empty() {
        return String::new();
    }
    let result = title_case(value);
    if result != value {
        log.normalization(
            row,
            column,
            format!("Title Case applied to {column}: '{value}' → '{result}'"),
        );
    }
    result
}

fn title_case_word(word: &str) -> String {
    let upper = word.to_uppercase();
    if UPPERCASE_WORDS.contains(&upper.as_str()) {
        return upper;
    }
    if word.contains('-') {
        return word
            .split('-')
            .map(|part| {
                if is_all_upper(part) {
                    part.to_string()
                } else {
                    generic_title(part)
                }
            })
            .collect::<Vec<_>>()
            .join("-");
    }
    if is_all_upper(word) || is_all_lower(word) {
        return generic_title(word);
    }
    if is_capitalized(word) {
        return word.to_string();
    }
    generic_title(word)
}

/// Uppercase every cased character that follows an uncased one, lowercase the rest.
pub fn generic_title(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut previous_cased = false;
    for ch in word.chars() {
        if previous_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        previous_cased = is_cased(ch);
    }
    out
}

fn is_cased(ch: char) -> bool {
    ch.is_uppercase() || ch.is_lowercase()
}

fn is_all_upper(text: &str) -> bool {
    text.chars().any(is_cased) && !text.chars().any(char::is_lowercase)
}

fn is_all_lower(text: &str) -> bool {
    text.chars().any(is_cased) && !text.chars().any(char::is_uppercase)
}

fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let rest = chars.as_str();
            !rest.is_empty() && is_all_lower(rest)
        }
        _ => false,
    }
}
