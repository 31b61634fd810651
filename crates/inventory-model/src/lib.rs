pub mod column;
pub mod date;
pub mod defaults;
pub mod error;
pub mod record;
pub mod report_log;

pub use column::Column;
pub use date::{DATE_FORMAT, format_date, parse_date};
pub use defaults::{
    DEFAULT_ASSET_ACCOUNT, DEFAULT_COST_ACCOUNT, DEFAULT_REORDER_LEVEL, DEFAULT_REVENUE_ACCOUNT,
    EXPIRY_HORIZON_DAYS, UserDefaults, ValidatedDefaults,
};
pub use error::{ConfigError, Result};
pub use record::{CleanedRecord, Currency, RawRecord};
pub use report_log::{LogCategory, LogEntry, ReportLog, Tally};
