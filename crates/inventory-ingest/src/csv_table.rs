use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use inventory_model::{Column, RawRecord};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// The loaded export: header as written plus one [`RawRecord`] per data row.
#[derive(Debug, Clone, Default)]
pub struct InventoryTable {
    pub source: PathBuf,
    pub headers: Vec<String>,
    /// Header names that are not one of the required columns; carried, never read.
    pub extra_columns: Vec<String>,
    pub records: Vec<RawRecord>,
    /// Fully blank data rows that were skipped.
    pub blank_rows: usize,
}

impl InventoryTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read an inventory CSV from disk.
///
/// # Errors
///
/// Returns an [`IngestError`] if the file is missing or unreadable, is not
/// valid CSV, is empty, or lacks any of the required columns.
pub fn read_inventory_csv(path: &Path) -> Result<InventoryTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_inventory(file, path)
}

/// Read an inventory CSV from any reader; `source` is only used in errors and reports.
///
/// Data rows are numbered from 1 in file order, blank rows included, so that
/// row numbers in the report point at the right line of the spreadsheet.
///
/// # Errors
///
/// See [`read_inventory_csv`].
pub fn read_inventory<R: Read>(reader: R, source: &Path) -> Result<InventoryTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = reader.records();

    let header = match rows.next() {
        Some(record) => record.map_err(|err| csv_error(source, 0, err))?,
        None => {
            return Err(IngestError::EmptyCsv {
                path: source.to_path_buf(),
            });
        }
    };
    let headers: Vec<String> = header.iter().map(normalize_header).collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: source.to_path_buf(),
        });
    }

    let mut positions: BTreeMap<Column, usize> = BTreeMap::new();
    let mut extra_columns = Vec::new();
    for (idx, name) in headers.iter().enumerate() {
        match Column::from_header(name) {
            Some(column) => {
                positions.entry(column).or_insert(idx);
            }
            None if !name.is_empty() => extra_columns.push(name.clone()),
            None => {}
        }
    }
    let missing: Vec<String> = Column::ALL
        .iter()
        .filter(|column| !positions.contains_key(*column))
        .map(|column| column.as_str().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns {
            path: source.to_path_buf(),
            columns: missing,
        });
    }
    if !extra_columns.is_empty() {
        debug!(columns = ?extra_columns, "ignoring extra columns");
    }

    let mut records = Vec::new();
    let mut blank_rows = 0usize;
    for (idx, record) in rows.enumerate() {
        let row = idx + 1;
        let record = record.map_err(|err| csv_error(source, row, err))?;
        let mut raw = RawRecord::new(row);
        for (column, position) in &positions {
            let value = record.get(*position).unwrap_or("");
            raw.set(*column, normalize_cell(value));
        }
        if raw.is_blank() {
            blank_rows += 1;
            continue;
        }
        records.push(raw);
    }

    info!(
        path = %source.display(),
        rows = records.len(),
        blank_rows,
        "loaded inventory CSV"
    );
    Ok(InventoryTable {
        source: source.to_path_buf(),
        headers,
        extra_columns,
        records,
        blank_rows,
    })
}

fn csv_error(path: &Path, row: usize, source: csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        row,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization_strips_bom_and_spacing() {
        assert_eq!(normalize_header("\u{feff}Name"), "Name");
        assert_eq!(normalize_header("  Unit  Cost "), "Unit Cost");
    }

    #[test]
    fn cells_are_trimmed() {
        assert_eq!(normalize_cell("  tabs "), "tabs");
        assert_eq!(normalize_cell(""), "");
    }
}
