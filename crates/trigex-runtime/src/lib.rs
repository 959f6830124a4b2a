//! trigex Runtime - Macro resolution for the trigex grammar engine
//!
//! This crate resolves the macros found in graph and map labels:
//! - Positional host macros (`{HOST.HOST2}`) against an ordered item list
//! - Functional item macros (`{host:key.avg(5m)}`) through an injected
//!   [`ItemDataSource`]

pub mod error;
pub mod resolver;
pub mod source;

// Re-export main types
pub use error::{Result, RuntimeError};
pub use resolver::MacroResolver;
pub use source::{AggregateFunction, HistoryValue, InMemoryItemSource, ItemDataSource, ItemRecord};
