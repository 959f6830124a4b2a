//! Compiler error types

use thiserror::Error;
use trigex_core::ValueType;
use trigex_parser::ParseError;

/// Compiler error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// No parts to build from, or nothing to split
    #[error("Expression is empty")]
    EmptyExpression,

    /// A part's text is not a clause of function calls
    #[error("Invalid expression part {index}: {source}")]
    InvalidPart {
        index: usize,
        #[source]
        source: ParseError,
    },

    /// Host or key the expression refers to is invalid
    #[error("Invalid item reference: {0}")]
    InvalidReference(String),

    /// Expression text does not have the constructor's structure
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// Function not present in the catalog
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Parameter fails the catalog constraints
    #[error("Invalid parameter {index} of function {function}: {message}")]
    InvalidParameter {
        function: String,
        index: usize,
        message: String,
    },

    /// Function cannot be applied to items of this value type
    #[error("Function {function} does not support {value_type} items")]
    UnsupportedValueType {
        function: String,
        value_type: ValueType,
    },
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
