//! Function validator
//!
//! Checks a parsed trigger function call against the function catalog: the
//! function must exist, its parameters must fit the definition and the item
//! it is applied to must have a supported value type.

use crate::error::{CompileError, Result};
use trigex_core::{
    parse_time_suffix, FunctionCatalog, FunctionDef, MetricUnit, ParamDef, ParamKind,
    ParsedFunction, ValueType,
};

/// Validates function calls against a catalog
#[derive(Debug, Clone)]
pub struct FunctionValidator {
    catalog: FunctionCatalog,
}

impl Default for FunctionValidator {
    fn default() -> Self {
        Self::new(FunctionCatalog::standard())
    }
}

impl FunctionValidator {
    pub fn new(catalog: FunctionCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &FunctionCatalog {
        &self.catalog
    }

    /// Validate `function` applied to an item of `value_type`.
    pub fn validate(&self, function: &ParsedFunction, value_type: ValueType) -> Result<()> {
        let name = function.function_name.as_str();
        let def = self
            .catalog
            .get(name)
            .ok_or_else(|| CompileError::UnknownFunction(name.to_string()))?;

        // `func()` carries one empty parameter
        let supplied = match function.params_num() {
            1 if function.parameters()[0].raw().is_empty() => 0,
            n => n,
        };

        if supplied > def.params.len() {
            return Err(CompileError::InvalidParameter {
                function: name.to_string(),
                index: def.params.len(),
                message: format!(
                    "too many parameters, {} supplied, at most {} expected",
                    supplied,
                    def.params.len()
                ),
            });
        }

        for (index, param) in def.params.iter().enumerate() {
            let node = function.parameters().get(index).filter(|_| index < supplied);
            let value = node.map(|n| n.unquoted()).unwrap_or_default();

            if value.is_empty() {
                if param.mandatory {
                    return Err(Self::param_error(def, index, "mandatory parameter is missing"));
                }
                continue;
            }

            if node.is_some_and(|n| n.is_array()) {
                return Err(Self::param_error(def, index, "array parameters are not supported"));
            }

            if is_user_macro(&value) {
                continue;
            }

            Self::check_value(def, index, param, &value)?;
        }

        if !def.accepts(value_type) {
            return Err(CompileError::UnsupportedValueType {
                function: name.to_string(),
                value_type,
            });
        }

        log::trace!("Function '{}' is valid for {} items", function.matched, value_type);
        Ok(())
    }

    fn check_value(def: &FunctionDef, index: usize, param: &ParamDef, value: &str) -> Result<()> {
        match param.kind {
            ParamKind::Str => Ok(()),
            ParamKind::Float => value
                .parse::<f64>()
                .map(|_| ())
                .map_err(|_| Self::param_error(def, index, &format!("\"{value}\" is not a number"))),
            ParamKind::Int => {
                let Some(metric) = &param.metric else {
                    // time shift
                    return parse_time_suffix(value).map(|_| ()).map_err(|_| {
                        Self::param_error(def, index, &format!("invalid time shift \"{value}\""))
                    });
                };

                let amount = match value.strip_prefix('#') {
                    Some(count) if metric.allows(MetricUnit::Counts) => {
                        if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
                            return Err(Self::param_error(
                                def,
                                index,
                                &format!("invalid value count \"{value}\""),
                            ));
                        }
                        count.parse::<u64>().map_err(|_| {
                            Self::param_error(def, index, &format!("value count \"{value}\" is too large"))
                        })?
                    }
                    Some(_) => {
                        return Err(Self::param_error(
                            def,
                            index,
                            "value counts are not supported by this parameter",
                        ))
                    }
                    None if metric.allows(MetricUnit::Time) => parse_time_suffix(value).map_err(|_| {
                        Self::param_error(def, index, &format!("invalid time period \"{value}\""))
                    })?,
                    None => {
                        return Err(Self::param_error(
                            def,
                            index,
                            "parameter expects a value count (#N)",
                        ))
                    }
                };

                if amount == 0 && !param.zero_allowed {
                    return Err(Self::param_error(def, index, "must be greater than zero"));
                }
                Ok(())
            }
        }
    }

    fn param_error(def: &FunctionDef, index: usize, message: &str) -> CompileError {
        CompileError::InvalidParameter {
            function: def.name.clone(),
            index,
            message: message.to_string(),
        }
    }
}

/// `{$NAME}` user macros are resolved by the server and accepted as-is
fn is_user_macro(value: &str) -> bool {
    value
        .strip_prefix("{$")
        .and_then(|rest| rest.strip_suffix('}'))
        .is_some_and(|name| {
            !name.is_empty()
                && name
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || matches!(b, b'_' | b'.'))
        })
}
