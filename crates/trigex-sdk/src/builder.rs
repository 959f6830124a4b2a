//! Builder pattern for Engine

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::Result;
use std::path::Path;
use trigex_core::{FunctionCatalog, FunctionDef};

/// Builder for Engine
///
/// # Example
///
/// ```rust,ignore
/// use trigex_sdk::EngineBuilder;
///
/// let engine = EngineBuilder::new()
///     .max_input_length(4096)
///     .unresolved_macro("n/a")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    config: EngineConfig,
    catalog: FunctionCatalog,
    functions: Vec<FunctionDef>,
}

impl EngineBuilder {
    /// Create a new builder with the standard function catalog
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            catalog: FunctionCatalog::standard(),
            functions: Vec::new(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a YAML file
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.config = EngineConfig::from_yaml_file(path)?;
        Ok(self)
    }

    /// Set the input length limit
    pub fn max_input_length(mut self, limit: usize) -> Self {
        self.config.max_input_length = limit;
        self
    }

    /// Set the unresolved macro replacement
    pub fn unresolved_macro(mut self, value: impl Into<String>) -> Self {
        self.config.unresolved_macro = value.into();
        self
    }

    /// Enable function validation when building expressions
    pub fn validate_functions(mut self, enable: bool) -> Self {
        self.config.validate_functions = enable;
        self
    }

    /// Replace the function catalog
    pub fn with_catalog(mut self, catalog: FunctionCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Add a function to the catalog
    pub fn register_function(mut self, def: FunctionDef) -> Self {
        self.functions.push(def);
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<Engine> {
        let mut catalog = self.catalog;
        for def in self.functions {
            catalog.register(def)?;
        }

        Engine::with_catalog(self.config, catalog)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
