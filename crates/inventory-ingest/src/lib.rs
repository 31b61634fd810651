//! Inventory CSV ingestion.

mod csv_table;
pub mod error;

pub use csv_table::{InventoryTable, read_inventory, read_inventory_csv};
pub use error::{IngestError, Result};
