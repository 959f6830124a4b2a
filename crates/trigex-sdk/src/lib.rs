//! trigex SDK
//!
//! High-level API over the trigex grammar engine: item key and function
//! parsing, trigger expression construction and macro resolution behind one
//! configured [`Engine`].

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;

// Re-export main types
pub use builder::EngineBuilder;
pub use config::{EngineConfig, DEFAULT_MAX_INPUT_LENGTH};
pub use engine::Engine;
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use trigex_core::{
    ExpressionPart, FunctionCatalog, FunctionDef, ItemRef, ParamDef, ParsedFunction, ParsedKey,
    PartType, ValueType,
};
pub use trigex_parser::ParseOutcome;
pub use trigex_runtime::{InMemoryItemSource, ItemDataSource, ItemRecord};
