//! Built-in [`UnitResolver`] implementations.
//!
//! None of these prompt; interactive resolution lives outside the engine.

use std::collections::{BTreeMap, VecDeque};

use inventory_normalization::{ResolveError, ResolvedUnit, UnitResolver};

/// Always falls back to the configured default unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultUnitResolver;

impl UnitResolver for DefaultUnitResolver {
    fn resolve(&mut self, _: &str, _: &str, _: usize) -> Result<ResolvedUnit, ResolveError> {
        Ok(ResolvedUnit::UseDefault)
    }
}

/// Keeps every unknown unit as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptUnitResolver;

impl UnitResolver for AcceptUnitResolver {
    fn resolve(&mut self, _: &str, _: &str, _: usize) -> Result<ResolvedUnit, ResolveError> {
        Ok(ResolvedUnit::AcceptAsIs)
    }
}

/// Refuses every unknown unit, dropping its rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectUnitResolver;

impl UnitResolver for RejectUnitResolver {
    fn resolve(
        &mut self,
        unknown_unit: &str,
        _: &str,
        _: usize,
    ) -> Result<ResolvedUnit, ResolveError> {
        Err(ResolveError::Rejected {
            unit: unknown_unit.to_string(),
        })
    }
}

/// Applies an operator-supplied `raw → unit` table, deferring the rest to `fallback`.
#[derive(Debug, Clone, Default)]
pub struct MappedUnitResolver<R> {
    mapping: BTreeMap<String, String>,
    fallback: R,
}

impl<R: UnitResolver> MappedUnitResolver<R> {
    /// Keys are matched case-insensitively.
    pub fn new(mapping: impl IntoIterator<Item = (String, String)>, fallback: R) -> Self {
        let mapping = mapping
            .into_iter()
            .map(|(raw, unit)| (raw.trim().to_lowercase(), unit))
            .collect();
        Self { mapping, fallback }
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

impl<R: UnitResolver> UnitResolver for MappedUnitResolver<R> {
    fn resolve(
        &mut self,
        unknown_unit: &str,
        product_name: &str,
        row: usize,
    ) -> Result<ResolvedUnit, ResolveError> {
        match self.mapping.get(&unknown_unit.trim().to_lowercase()) {
            Some(unit) => Ok(ResolvedUnit::NewUnitForAllSimilar(unit.clone())),
            None => self.fallback.resolve(unknown_unit, product_name, row),
        }
    }
}

/// One question a [`ScriptedUnitResolver`] was asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitQuestion {
    pub unit: String,
    pub product_name: String,
    pub row: usize,
}

/// Answers from a fixed queue, recording every question. Runs dry with
/// [`ResolveError::Exhausted`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedUnitResolver {
    answers: VecDeque<ResolvedUnit>,
    asked: Vec<UnitQuestion>,
}

impl ScriptedUnitResolver {
    pub fn new(answers: impl IntoIterator<Item = ResolvedUnit>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    pub fn asked(&self) -> &[UnitQuestion] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl UnitResolver for ScriptedUnitResolver {
    fn resolve(
        &mut self,
        unknown_unit: &str,
        product_name: &str,
        row: usize,
    ) -> Result<ResolvedUnit, ResolveError> {
        self.asked.push(UnitQuestion {
            unit: unknown_unit.to_string(),
            product_name: product_name.to_string(),
            row,
        });
        self.answers
            .pop_front()
            .ok_or_else(|| ResolveError::Exhausted {
                unit: unknown_unit.to_string(),
            })
    }
}
