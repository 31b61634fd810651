//! CLI library components for the inventory cleaner.

pub mod config;
pub mod logging;
pub mod workflow;
