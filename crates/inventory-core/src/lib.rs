//! Inventory cleaning engine.
//!
//! [`InventoryCleaner`] validates the operator defaults once, then runs each
//! record through the [`pipeline`] phases, collecting cleaned records and the
//! audit log into a [`CleaningRun`].

pub mod cleaner;
pub mod dedupe;
pub mod pipeline;
pub mod resolver;

pub use cleaner::{
    CleanError, CleanerOptions, CleaningRun, InventoryCleaner, Progress, Result, RunCounters,
};
pub use dedupe::SeenNames;
pub use pipeline::{DropReason, Phase, RowError, RowOutcome, RowPipeline, error_chain};
pub use resolver::{
    AcceptUnitResolver, DefaultUnitResolver, MappedUnitResolver, RejectUnitResolver,
    ScriptedUnitResolver, UnitQuestion,
};
