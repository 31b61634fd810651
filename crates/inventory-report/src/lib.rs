//! Run outputs: the cleaned CSV, the text cleanup report and the fatal-error
//! report, plus the summary counts they share.

pub mod csv_output;
pub mod error;
pub mod paths;
pub mod stats;
pub mod text_report;

pub use csv_output::{write_cleaned, write_cleaned_csv};
pub use error::{ReportError, Result};
pub use paths::{ERROR_REPORT_FILE, OutputPaths};
pub use stats::{CleaningStats, SUB_ACCOUNT_COLUMNS};
pub use text_report::{
    REPORT_TITLE, TIMESTAMP_FORMAT, render_error_report, render_report, render_statistics,
    write_error_report, write_report,
};
