//! Field-level normalizers for inventory records.
//!
//! Each normalizer takes one cell, returns the cleaned value, and appends to
//! the run's [`ReportLog`](inventory_model::ReportLog) whatever it changed:
//! - **title_case**: word-aware casing for descriptive columns
//! - **name**: product-name cleanup and de-duplication keys
//! - **units**: unit-of-measure canonicalization and the resolver contract
//! - **accounts**: fuzzy sub-account matching
//! - **classification**: VAT type and class/category defaults
//! - **numeric**: currency, quantity and reorder level
//! - **expiry**: expiry dates

pub mod accounts;
pub mod classification;
pub mod expiry;
pub mod name;
pub mod numeric;
pub mod tables;
pub mod title_case;
pub mod units;

pub use accounts::{
    HIGH_SIMILARITY, MODERATE_SIMILARITY, SimilarityTier, account_similarity, normalize_sub_account,
    preprocess_account,
};
pub use classification::{canonical_vat_type, fill_default, normalize_vat_type};
pub use expiry::{substitute_expiry, validate_expiry};
pub use name::{
    PLACEHOLDER_PREFIX, ProductName, clean_name, dedup_key, is_placeholder_name, normalize_name,
};
pub use numeric::{
    Decimal, strip_numeric_noise, validate_currency, validate_quantity, validate_reorder_level,
};
pub use tables::{CANONICAL_UNITS, UNIT_ALIASES, VALID_VAT_TYPES, aliases_of, is_canonical_unit};
pub use title_case::{apply_title_case, title_case};
pub use units::{
    AliasMatch, ResolutionSource, ResolveError, ResolvedUnit, UnitNormalizer, UnitResolution,
    UnitResolver, lookup_alias,
};
