//! trigex Parser - scanners for item keys, function calls and boolean clauses
//!
//! This crate turns raw operator-entered text into the structures defined in
//! `trigex-core`:
//! - [`KeyParser`] splits item keys into identifier and parameters
//! - [`FunctionParser`] recognises trigger function calls inside larger text
//! - [`FunctionMacroParser`] recognises `{host:key.func()}` references
//! - [`ClauseTokenizer`] lexes `and`/`or`/`not` clauses of function calls

pub mod clause;
pub mod error;
pub mod function;
pub mod function_macro;
pub mod item_key;
mod params;

// Re-export main parser types
pub use clause::{ClauseToken, ClauseTokenizer, OperandSyntax};
pub use error::{ParseError, Result};
pub use function::{FunctionParser, ParseOutcome};
pub use function_macro::{FunctionMacro, FunctionMacroParser};
pub use item_key::{KeyMatch, KeyParser};
