//! Trigger function catalog
//!
//! Describes which trigger functions exist, which parameters they take and
//! which item value types they apply to. The expression editors and the
//! function validator read parameter metadata from here instead of inspecting
//! it ad hoc.

mod definition;
mod standard;

pub use definition::{FunctionDef, Metric, MetricUnit, ParamDef, ParamKind};

use crate::error::{CoreError, Result};
use std::collections::BTreeMap;

/// Registry of function definitions keyed by function name
#[derive(Debug, Clone, Default)]
pub struct FunctionCatalog {
    functions: BTreeMap<String, FunctionDef>,
}

impl FunctionCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the built-in trigger functions
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for def in standard::definitions() {
            catalog.functions.insert(def.name.clone(), def);
        }
        catalog
    }

    /// Add a definition; names must be unique
    pub fn register(&mut self, def: FunctionDef) -> Result<()> {
        if self.functions.contains_key(&def.name) {
            return Err(CoreError::DuplicateFunction(def.name));
        }

        log::debug!("Registering trigger function '{}'", def.name);
        self.functions.insert(def.name.clone(), def);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    /// Like [`FunctionCatalog::get`] but reports unknown names as an error
    pub fn lookup(&self, name: &str) -> Result<&FunctionDef> {
        self.get(name)
            .ok_or_else(|| CoreError::UnknownFunction(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Function names in alphabetical order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
