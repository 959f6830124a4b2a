//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Item key does not follow the key grammar
    #[error("Invalid item key \"{input}\": {message}")]
    InvalidKey { input: String, message: String },

    /// No function call at the given position
    #[error("Invalid function call at position {position}: {message}")]
    InvalidFunction { position: usize, message: String },

    /// Boolean clause is malformed
    #[error("Invalid clause at position {position}: {message}")]
    InvalidClause { position: usize, message: String },

    /// Input ended where more text was required
    #[error("Unexpected end of input")]
    UnexpectedEnd,
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
