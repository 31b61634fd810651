use thiserror::Error;

/// Fatal problems with the configured defaults. Nothing is cleaned when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid expiry date format: expected dd/mm/yyyy, got '{value}'")]
    InvalidExpiryDate { value: String },
    #[error("invalid default reorder level: must be a non-negative integer, got '{value}'")]
    InvalidReorderLevel { value: String },
    #[error("required default '{field}' is blank")]
    MissingDefault { field: &'static str },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
