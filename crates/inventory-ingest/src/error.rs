//! Error types for inventory CSV ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal problems with the input file. Nothing is cleaned when one occurs.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV (bad quoting, invalid UTF-8).
    #[error("failed to parse CSV {path} at data row {row}: {source}")]
    CsvParse {
        path: PathBuf,
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// No header row at all.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header lacks one or more required columns.
    #[error("missing required columns in {path}: {}", columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },
}

pub type Result<T> = std::result::Result<T, IngestError>;
