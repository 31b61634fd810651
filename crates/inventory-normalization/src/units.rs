//! Unit-of-measure canonicalization.
//!
//! [`UnitNormalizer`] walks a fixed precedence: empty, canonical, configured
//! default, run cache, alias table (exact, space-stripped, prefix, plural),
//! and finally the [`UnitResolver`] collaborator. Every alias hit and every
//! resolver outcome is cached for the rest of the run, keyed by the
//! lower-cased raw token.

use std::collections::BTreeMap;
use std::fmt;

use inventory_model::{Column, ReportLog};
use thiserror::Error;
use tracing::{debug, trace};

use crate::tables::{
    CANONICAL_UNITS, MIN_PREFIX_ALIAS_LEN, UNIT_ALIASES, alias_target, is_canonical_unit,
};
use crate::title_case::title_case;

/// Longest token still considered a plausible unit name.
const MAX_PLAUSIBLE_UNIT_LEN: usize = 20;

/// What a resolver decided for a unit the tables do not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedUnit {
    /// Use the configured default unit.
    UseDefault,
    /// Replace with this unit.
    NewUnit(String),
    /// Replace with this unit, and treat every later spelling the same way.
    NewUnitForAllSimilar(String),
    /// Keep the unit as written.
    AcceptAsIs,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unit '{unit}' was rejected")]
    Rejected { unit: String },

    #[error("no scripted answer left for unit '{unit}'")]
    Exhausted { unit: String },

    #[error("resolver returned a blank unit for '{unit}'")]
    BlankUnit { unit: String },

    #[error("{0}")]
    Message(String),
}

/// Decides units the alias tables cannot place.
///
/// Called at most once per distinct unit spelling per run; the normalizer
/// caches the answer.
pub trait UnitResolver {
    /// Resolve `unknown_unit` for the product on data row `row`.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] when no decision can be made; the row is
    /// then dropped.
    fn resolve(
        &mut self,
        unknown_unit: &str,
        product_name: &str,
        row: usize,
    ) -> Result<ResolvedUnit, ResolveError>;
}

impl<R: UnitResolver + ?Sized> UnitResolver for Box<R> {
    fn resolve(
        &mut self,
        unknown_unit: &str,
        product_name: &str,
        row: usize,
    ) -> Result<ResolvedUnit, ResolveError> {
        (**self).resolve(unknown_unit, product_name, row)
    }
}

/// Which alias rule placed a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasMatch {
    Exact,
    /// Matched once embedded spaces were removed.
    Compact,
    /// Matched the longest alias key prefixing the token.
    Prefix(&'static str),
    /// Matched a canonical unit after plural reduction.
    Plural,
}

impl AliasMatch {
    fn describe(self, unit: &str, canonical: &str) -> String {
        match self {
            AliasMatch::Exact => format!("Unit normalized: '{unit}' → '{canonical}'"),
            AliasMatch::Compact => {
                format!("Unit normalized (spaces ignored): '{unit}' → '{canonical}'")
            }
            AliasMatch::Prefix(key) => {
                format!("Unit normalized via alias prefix '{key}': '{unit}' → '{canonical}'")
            }
            AliasMatch::Plural => format!("Unit normalized from plural: '{unit}' → '{canonical}'"),
        }
    }
}

/// How a cached unit value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Alias(AliasMatch),
    Default,
    NewUnit,
    NewUnitForAllSimilar,
    AcceptedAsIs,
}

impl ResolutionSource {
    /// True for outcomes that came from the resolver rather than the tables.
    pub fn is_decision(self) -> bool {
        !matches!(self, ResolutionSource::Alias(_))
    }
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResolutionSource::Alias(_) => "alias table",
            ResolutionSource::Default => "default unit",
            ResolutionSource::NewUnit => "new unit",
            ResolutionSource::NewUnitForAllSimilar => "new unit, all similar",
            ResolutionSource::AcceptedAsIs => "accepted as-is",
        })
    }
}

/// One cache entry: the first spelling seen and what it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitResolution {
    pub raw: String,
    pub value: String,
    pub source: ResolutionSource,
}

/// Look a unit up in the alias tables, without touching the resolver.
pub fn lookup_alias(unit: &str) -> Option<(&'static str, AliasMatch)> {
    let key = unit.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }
    if let Some(canonical) = alias_target(&key) {
        return Some((canonical, AliasMatch::Exact));
    }

    let compact: String = key.chars().filter(|ch| !ch.is_whitespace()).collect();
    if compact != key
        && let Some(canonical) = alias_target(&compact)
    {
        return Some((canonical, AliasMatch::Compact));
    }

    let prefix = UNIT_ALIASES
        .iter()
        .filter(|(alias, _)| alias.len() >= MIN_PREFIX_ALIAS_LEN && compact.starts_with(alias))
        .max_by_key(|(alias, _)| alias.len());
    if let Some((alias, canonical)) = prefix {
        return Some((*canonical, AliasMatch::Prefix(*alias)));
    }

    let singular = singular_form(&compact)?;
    CANONICAL_UNITS
        .iter()
        .find(|canonical| canonical.to_lowercase() == singular)
        .map(|canonical| (*canonical, AliasMatch::Plural))
}

/// Reduce an English plural to its singular, if it looks like one.
pub fn singular_form(word: &str) -> Option<String> {
    if let Some(stem) = word.strip_suffix("ies")
        && !stem.is_empty()
    {
        return Some(format!("{stem}y"));
    }
    if let Some(stem) = word.strip_suffix("ves")
        && !stem.is_empty()
    {
        return Some(format!("{stem}f"));
    }
    if let Some(stem) = word.strip_suffix("es")
        && ["ch", "sh", "x", "s", "z"]
            .iter()
            .any(|ending| stem.ends_with(ending))
    {
        return Some(stem.to_string());
    }
    word.strip_suffix('s')
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

/// Single alphabetic word in `Capital` + lowercase form, of modest length.
pub fn looks_like_unit(unit: &str) -> bool {
    let mut chars = unit.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    unit.chars().count() <= MAX_PLAUSIBLE_UNIT_LEN
        && first.is_alphabetic()
        && first.is_uppercase()
        && chars.all(|ch| ch.is_alphabetic() && ch.is_lowercase())
}

/// Stateful unit canonicalizer for one run.
#[derive(Debug, Clone)]
pub struct UnitNormalizer {
    default_unit: String,
    cache: BTreeMap<String, UnitResolution>,
}

impl UnitNormalizer {
    pub fn new(default_unit: impl Into<String>) -> Self {
        Self {
            default_unit: default_unit.into(),
            cache: BTreeMap::new(),
        }
    }

    pub fn default_unit(&self) -> &str {
        &self.default_unit
    }

    /// Cache snapshot, keyed by lower-cased raw token.
    pub fn resolutions(&self) -> &BTreeMap<String, UnitResolution> {
        &self.cache
    }

    pub fn into_resolutions(self) -> BTreeMap<String, UnitResolution> {
        self.cache
    }

    /// Canonicalize the unit on one row.
    ///
    /// # Errors
    ///
    /// Propagates a [`ResolveError`] from the resolver, or
    /// [`ResolveError::BlankUnit`] when it supplies a blank replacement.
    pub fn normalize(
        &mut self,
        unit: &str,
        product_name: &str,
        row: usize,
        resolver: &mut dyn UnitResolver,
        log: &mut ReportLog,
    ) -> Result<String, ResolveError> {
        let unit = unit.trim();
        if unit.is_empty() {
            log.default_used(
                row,
                Column::UnitOfMeasure,
                format!("Empty UnitOfMeasure replaced with default '{}'", self.default_unit),
            );
            return Ok(self.default_unit.clone());
        }
        if is_canonical_unit(unit) || unit == self.default_unit {
            return Ok(unit.to_string());
        }

        let key = unit.to_lowercase();
        if let Some(cached) = self.cache.get(&key) {
            trace!(unit, value = %cached.value, source = %cached.source, "unit cache hit");
            if let ResolutionSource::Alias(rule) = cached.source
                && cached.value != unit
            {
                log.normalization(row, Column::UnitOfMeasure, rule.describe(unit, &cached.value));
            }
            return Ok(cached.value.clone());
        }

        if let Some((canonical, rule)) = lookup_alias(unit) {
            log.normalization(row, Column::UnitOfMeasure, rule.describe(unit, canonical));
            self.remember(key, unit, canonical.to_string(), ResolutionSource::Alias(rule));
            return Ok(canonical.to_string());
        }

        if looks_like_unit(unit) {
            log.warning(
                row,
                format!("Unit '{unit}' looks valid but is not in the known units list"),
            );
        }

        debug!(unit, product = product_name, row, "delegating unknown unit");
        let (value, source, message) = match resolver.resolve(unit, product_name, row)? {
            ResolvedUnit::UseDefault => (
                self.default_unit.clone(),
                ResolutionSource::Default,
                format!(
                    "Unit '{unit}' for '{product_name}' set to default '{}'",
                    self.default_unit
                ),
            ),
            ResolvedUnit::NewUnit(entered) => {
                let value = resolved_value(&entered, unit)?;
                let message = format!(
                    "Unit '{unit}' for '{product_name}' changed to '{value}'{}",
                    entered_note(&entered, &value)
                );
                (value, ResolutionSource::NewUnit, message)
            }
            ResolvedUnit::NewUnitForAllSimilar(entered) => {
                let value = resolved_value(&entered, unit)?;
                let message = format!(
                    "Unit '{unit}' for '{product_name}' changed to '{value}'{} (applied to all similar)",
                    entered_note(&entered, &value)
                );
                (value, ResolutionSource::NewUnitForAllSimilar, message)
            }
            ResolvedUnit::AcceptAsIs => (
                unit.to_string(),
                ResolutionSource::AcceptedAsIs,
                format!("Unit '{unit}' for '{product_name}' accepted as-is"),
            ),
        };
        log.user_decision(row, Column::UnitOfMeasure, message);
        self.remember(key, unit, value.clone(), source);
        Ok(value)
    }

    fn remember(&mut self, key: String, raw: &str, value: String, source: ResolutionSource) {
        self.cache.insert(
            key,
            UnitResolution {
                raw: raw.to_string(),
                value,
                source,
            },
        );
    }
}

/// Title-cased form of a resolver-supplied unit. Recorded with the decision,
/// not as a cell normalization.
fn resolved_value(value: &str, unit: &str) -> Result<String, ResolveError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ResolveError::BlankUnit {
            unit: unit.to_string(),
        });
    }
    Ok(title_case(trimmed))
}

fn entered_note(entered: &str, value: &str) -> String {
    if entered == value {
        String::new()
    } else {
        format!(" (entered as '{entered}')")
    }
}
