//! Value types for trigex
//!
//! This module contains the structures produced and consumed by the engine:
//! - Parameter trees
//! - Parsed item keys and function calls
//! - Expression parts
//! - Item references and value types

pub mod expression;
pub mod function;
pub mod item;
pub mod key;
pub mod parameter;
pub mod time;

pub use expression::{ExpressionPart, PartType};
pub use function::ParsedFunction;
pub use item::{ItemRef, ValueType, UNRESOLVED_MACRO_STRING};
pub use key::ParsedKey;
pub use parameter::{quote_param, unquote_param, ParameterNode};
pub use time::parse_time_suffix;
