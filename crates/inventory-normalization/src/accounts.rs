//! Fuzzy matching of sub-account names against their configured default.
//!
//! Both sides are reduced to lower-case content words before comparison;
//! similarity is the normalized InDel ratio from `rapidfuzz`.

use inventory_model::{Column, ReportLog};
use rapidfuzz::fuzz;

use crate::tables::FILLER_WORDS;

/// At or above: treated as the same account.
pub const HIGH_SIMILARITY: f64 = 0.85;
/// At or above: probably the same account, spelled differently.
pub const MODERATE_SIMILARITY: f64 = 0.60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityTier {
    High,
    Moderate,
    Low,
}

impl SimilarityTier {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= HIGH_SIMILARITY {
            SimilarityTier::High
        } else if ratio >= MODERATE_SIMILARITY {
            SimilarityTier::Moderate
        } else {
            SimilarityTier::Low
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SimilarityTier::High => "high",
            SimilarityTier::Moderate => "moderate",
            SimilarityTier::Low => "low",
        }
    }
}

/// Lower-case, hyphens to spaces, collapse whitespace, drop filler words.
pub fn preprocess_account(value: &str) -> String {
    value
        .to_lowercase()
        .replace('-', " ")
        .split_whitespace()
        .filter(|word| !FILLER_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Similarity in `0.0..=1.0` of two account names after preprocessing.
pub fn account_similarity(value: &str, reference: &str) -> f64 {
    let left = preprocess_account(value);
    let right = preprocess_account(reference);
    fuzz::ratio(left.chars(), right.chars())
}

/// Replace a sub-account value with its default, logging how far off it was.
///
/// The result is always `default`; only the log entry depends on the input.
pub fn normalize_sub_account(
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

    let ratio = account_similarity(value, default);
    match SimilarityTier::from_ratio(ratio) {
        tier @ (SimilarityTier::High | SimilarityTier::Moderate) => {
            if value != default {
                log.normalization(
                    row,
                    column,
                    format!(
                        "{column} normalized: '{value}' → '{default}' (similarity {ratio:.2}, {} match)",
                        tier.as_str()
                    ),
                );
            }
        }
        SimilarityTier::Low => {
            log.default_used(
                row,
                column,
                format!(
                    "{column} '{value}' replaced with default '{default}' (similarity {ratio:.2} too low)"
                ),
            );
        }
    }
    default.to_string()
}

#[cfg(test)]
mod tests {
    use inventory_model::{DEFAULT_ASSET_ACCOUNT, LogCategory};

    use super::*;

    #[test]
    fn preprocessing_drops_filler_and_hyphens() {
        assert_eq!(
            preprocess_account("Cost Of Goods Sold - Pharmacy Drugs"),
            "cost goods sold pharmacy drugs"
        );
        assert_eq!(preprocess_account("Inventory & The Drugs"), "inventory drugs");
    }

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(SimilarityTier::from_ratio(1.0), SimilarityTier::High);
        assert_eq!(SimilarityTier::from_ratio(0.85), SimilarityTier::High);
        assert_eq!(SimilarityTier::from_ratio(0.7), SimilarityTier::Moderate);
        assert_eq!(SimilarityTier::from_ratio(0.59), SimilarityTier::Low);
    }

    #[test]
    fn identical_after_preprocessing_is_perfect() {
        let ratio = account_similarity("inventory-pharmacy drugs", DEFAULT_ASSET_ACCOUNT);
        assert!((ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn close_spelling_is_a_normalization() {
        let mut log = ReportLog::new();
        let value = normalize_sub_account(
            "Inventory Pharmacy Drug",
            DEFAULT_ASSET_ACCOUNT,
            Column::AssetSubAccount,
            1,
            &mut log,
        );
        assert_eq!(value, DEFAULT_ASSET_ACCOUNT);
        assert_eq!(log.count(LogCategory::Normalization), 1);
        assert_eq!(log.count(LogCategory::DefaultUsed), 0);
    }

    #[test]
    fn dropping_a_word_lands_in_the_moderate_tier() {
        let ratio = account_similarity("Inventory and Drugs", DEFAULT_ASSET_ACCOUNT);
        assert_eq!(SimilarityTier::from_ratio(ratio), SimilarityTier::Moderate);
    }

    #[test]
    fn unrelated_value_uses_default() {
        let mut log = ReportLog::new();
        let value = normalize_sub_account(
            "Office Furniture",
            DEFAULT_ASSET_ACCOUNT,
            Column::AssetSubAccount,
            2,
            &mut log,
        );
        assert_eq!(value, DEFAULT_ASSET_ACCOUNT);
        assert_eq!(log.count(LogCategory::DefaultUsed), 1);
        assert_eq!(log.count(LogCategory::Normalization), 0);
    }

    #[test]
    fn exact_default_is_silent() {
        let mut log = ReportLog::new();
        normalize_sub_account(
            DEFAULT_ASSET_ACCOUNT,
            DEFAULT_ASSET_ACCOUNT,
            Column::AssetSubAccount,
            3,
            &mut log,
        );
        assert_eq!(log.count(LogCategory::Normalization), 0);
        assert_eq!(log.count(LogCategory::DefaultUsed), 0);
    }
}
