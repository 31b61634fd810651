//! Cleaned-record CSV output.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use inventory_model::{CleanedRecord, Column};
use tracing::info;

use crate::error::{ReportError, Result};

/// Write `records` as CSV to any writer: the 16 columns in canonical order,
/// header first.
pub fn write_cleaned<W: Write>(writer: W, records: &[CleanedRecord]) -> csv::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(Column::ALL.iter().map(|column| column.as_str()))?;
    for record in records {
        csv.write_record(record.to_row())?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the cleaned CSV file.
pub fn write_cleaned_csv(path: &Path, records: &[CleanedRecord]) -> Result<()> {
    let file = File::create(path).map_err(|source| ReportError::io(path, source))?;
    write_cleaned(file, records).map_err(|source| ReportError::csv(path, source))?;
    info!(path = %path.display(), rows = records.len(), "wrote cleaned CSV");
    Ok(())
}
