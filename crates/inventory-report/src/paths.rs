//! Output file locations derived from the input path.

use std::path::{Path, PathBuf};

pub const CLEANED_SUFFIX: &str = "_cleaned";
pub const REPORT_SUFFIX: &str = "_cleanup_report";
pub const ERROR_REPORT_FILE: &str = "cleanup_error_report.txt";

/// Where a run's outputs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub cleaned_csv: PathBuf,
    pub report: PathBuf,
    pub error_report: PathBuf,
}

impl OutputPaths {
    /// Paths next to `input`, or inside `output_dir` when one is given.
    pub fn for_input(input: &Path, output_dir: Option<&Path>) -> Self {
        let dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| input.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "inventory".to_string());
        let extension = input
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_else(|| "csv".to_string());
        Self {
            cleaned_csv: dir.join(format!("{stem}{CLEANED_SUFFIX}.{extension}")),
            report: dir.join(format!("{stem}{REPORT_SUFFIX}.txt")),
            error_report: dir.join(ERROR_REPORT_FILE),
        }
    }
}
