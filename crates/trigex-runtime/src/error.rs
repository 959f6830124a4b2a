//! Runtime error types

use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Host already has an item with this key
    #[error("Duplicate item {key} on host {host}")]
    DuplicateItem { host: String, key: String },

    /// No item with this id
    #[error("Item not found: {0}")]
    ItemNotFound(u64),

    /// Period parameter is not a time value
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
