//! trigex Core - Core types and definitions for the trigex grammar engine
//!
//! This crate provides the value types shared across the trigex crates:
//! - Parameter trees produced by the key and function scanners
//! - Parsed item keys and function calls
//! - Expression parts exchanged with the expression constructor
//! - Item references used by macro resolution
//! - The trigger function catalog
//! - Error types

pub mod catalog;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use catalog::{FunctionCatalog, FunctionDef, Metric, MetricUnit, ParamDef, ParamKind};
pub use error::{CoreError, Result};
pub use types::{
    parse_time_suffix, ExpressionPart, ItemRef, ParameterNode, ParsedFunction, ParsedKey,
    PartType, ValueType, UNRESOLVED_MACRO_STRING,
};
