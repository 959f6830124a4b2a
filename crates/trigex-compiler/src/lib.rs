//! trigex Compiler - trigger expression construction and function validation
//!
//! This crate builds trigger expressions from operator-entered parts, splits
//! them back into parts, and validates trigger function calls against the
//! function catalog.

mod canonical;
pub mod constructor;
pub mod error;
pub mod validator;

// Re-export main types
pub use constructor::ExpressionConstructor;
pub use error::{CompileError, Result};
pub use validator::FunctionValidator;
