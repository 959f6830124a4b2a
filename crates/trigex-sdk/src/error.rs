//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input rejected before scanning
    #[error("Input too long: {length} bytes, limit is {limit}")]
    InputTooLong { length: usize, limit: usize },

    /// Parser error
    #[error("Parser error: {0}")]
    ParseError(#[from] trigex_parser::ParseError),

    /// Compiler error
    #[error("Compiler error: {0}")]
    CompileError(#[from] trigex_compiler::CompileError),

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] trigex_runtime::RuntimeError),

    /// Catalog error
    #[error("Catalog error: {0}")]
    CoreError(#[from] trigex_core::CoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
