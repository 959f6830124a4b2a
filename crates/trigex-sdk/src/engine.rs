//! Engine facade
//!
//! Bundles the parsers, the expression constructor, the function validator
//! and the macro resolver behind one configured entry point. Every input is
//! checked against the configured length limit before it is scanned.

use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use tracing::debug;
use trigex_compiler::{ExpressionConstructor, FunctionValidator};
use trigex_core::{ExpressionPart, FunctionCatalog, ItemRef, ParsedFunction, ParsedKey, ValueType};
use trigex_parser::{ClauseToken, ClauseTokenizer, FunctionParser, KeyParser, ParseOutcome};
use trigex_runtime::{ItemDataSource, MacroResolver};

/// Configured entry point to the grammar engine
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    constructor: ExpressionConstructor,
    validator: FunctionValidator,
    resolver: MacroResolver,
    clauses: ClauseTokenizer,
}

impl Engine {
    /// Create an engine with the standard function catalog
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_catalog(config, FunctionCatalog::standard())
    }

    pub(crate) fn with_catalog(config: EngineConfig, catalog: FunctionCatalog) -> Result<Self> {
        config.validate()?;
        debug!(
            "Engine ready: {} function(s), input limit {} bytes",
            catalog.len(),
            config.max_input_length
        );

        Ok(Self {
            resolver: MacroResolver::with_unresolved(config.unresolved_macro.clone()),
            constructor: ExpressionConstructor::new(),
            validator: FunctionValidator::new(catalog),
            clauses: ClauseTokenizer::bare(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &FunctionCatalog {
        self.validator.catalog()
    }

    /// Split an item key into identifier and parameters
    pub fn parse_key(&self, key: &str) -> Result<ParsedKey> {
        self.check_length(key)?;
        Ok(KeyParser::parse(key)?)
    }

    /// Recognise a function call at `offset` of a larger text
    pub fn parse_function(&self, input: &str, offset: usize) -> Result<ParseOutcome> {
        self.check_length(input)?;
        Ok(FunctionParser::parse(input, offset))
    }

    /// Parse a complete function call and validate it for items of `value_type`
    pub fn validate_function(&self, call: &str, value_type: ValueType) -> Result<ParsedFunction> {
        self.check_length(call)?;
        let function = FunctionParser::parse_strict(call)?;
        self.validator.validate(&function, value_type)?;
        Ok(function)
    }

    /// Combine parts into an expression over a log item
    pub fn build_expression(&self, host: &str, key: &str, parts: &[ExpressionPart]) -> Result<String> {
        self.build_expression_for(host, key, ValueType::Log, parts)
    }

    /// Combine parts into an expression over an item of `value_type`.
    ///
    /// With function validation enabled, every function call in the parts
    /// must be valid for that value type.
    pub fn build_expression_for(
        &self,
        host: &str,
        key: &str,
        value_type: ValueType,
        parts: &[ExpressionPart],
    ) -> Result<String> {
        self.check_length(host)?;
        self.check_length(key)?;
        for part in parts {
            self.check_length(&part.value)?;
        }

        let expression = self.constructor.build(host, key, parts)?;

        if self.config.validate_functions {
            for part in parts {
                self.validate_part(part, value_type)?;
            }
        }

        self.check_length(&expression)?;
        Ok(expression)
    }

    /// Split an expression back into parts
    pub fn split_expression(&self, expression: &str) -> Result<Vec<ExpressionPart>> {
        self.check_length(expression)?;
        Ok(self.constructor.split(expression)?)
    }

    /// Resolve positional and functional macros in `text`
    pub fn resolve_macros(&self, text: &str, items: &[ItemRef], source: &dyn ItemDataSource) -> Result<String> {
        self.check_length(text)?;
        Ok(self.resolver.resolve(text, items, source))
    }

    fn validate_part(&self, part: &ExpressionPart, value_type: ValueType) -> Result<()> {
        // `build` has already accepted the part, so the clause prefix is complete
        let (tokens, _) = self.clauses.tokenize_prefix(part.value.trim())?;

        for token in tokens {
            if let ClauseToken::Function(call) = token {
                let function = FunctionParser::parse_strict(&call)?;
                self.validator.validate(&function, value_type)?;
            }
        }
        Ok(())
    }

    fn check_length(&self, input: &str) -> Result<()> {
        let limit = self.config.max_input_length;
        if input.len() > limit {
            tracing::warn!("Rejected input of {} bytes (limit {})", input.len(), limit);
            return Err(SdkError::InputTooLong {
                length: input.len(),
                limit,
            });
        }
        Ok(())
    }
}
