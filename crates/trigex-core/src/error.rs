//! Error types for trigex Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Function already defined: {0}")]
    DuplicateFunction(String),

    #[error("Invalid value type: {0}")]
    InvalidValueType(String),

    #[error("Invalid time value: {0}")]
    InvalidTime(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
