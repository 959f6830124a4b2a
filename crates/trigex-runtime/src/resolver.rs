//! Macro resolution
//!
//! Labels of graphs and maps may reference the hosts of their items by
//! position (`{HOST.HOST2}`) and show item values through functional macros
//! (`{host:key.last()}`, `{host:key.avg(5m)}`). Resolution runs in two
//! passes; the positional pass goes first so that a functional macro can use a
//! positional macro as its host.

use crate::error::{Result, RuntimeError};
use crate::source::{AggregateFunction, ItemDataSource};
use std::collections::HashMap;
use tracing::debug;
use trigex_core::{parse_time_suffix, ItemRef, UNRESOLVED_MACRO_STRING};
use trigex_parser::{FunctionMacro, FunctionMacroParser};

const POSITIONAL_PREFIXES: [&str; 2] = ["{HOST.HOST", "{HOSTNAME"];

/// Resolves positional and functional macros in free text
#[derive(Debug, Clone)]
pub struct MacroResolver {
    unresolved: String,
    references: FunctionMacroParser,
}

impl Default for MacroResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroResolver {
    pub fn new() -> Self {
        Self::with_unresolved(UNRESOLVED_MACRO_STRING)
    }

    /// Resolver replacing unresolvable macros with `unresolved`
    pub fn with_unresolved(unresolved: impl Into<String>) -> Self {
        let unresolved = unresolved.into();
        Self {
            references: FunctionMacroParser::new().allow_host(unresolved.clone()),
            unresolved,
        }
    }

    pub fn unresolved(&self) -> &str {
        &self.unresolved
    }

    /// Resolve all macros in `text`.
    ///
    /// `items` is the ordered item list positional macros refer to. Macros
    /// that cannot be resolved become the unresolved string; text that does
    /// not form a macro is kept as is.
    pub fn resolve(&self, text: &str, items: &[ItemRef], source: &dyn ItemDataSource) -> String {
        let text = self.resolve_positional(text, items);
        self.resolve_functional(&text, source)
    }

    /// Replace `{HOST.HOST}`, `{HOST.HOSTn}`, `{HOSTNAME}` and `{HOSTNAMEn}`.
    pub fn resolve_positional(&self, text: &str, items: &[ItemRef]) -> String {
        let mut cache: HashMap<&str, String> = HashMap::new();
        let mut resolved = String::with_capacity(text.len());
        let mut copied = 0;
        let mut p = 0;

        while let Some(found) = text[p..].find('{') {
            let start = p + found;
            let Some((length, index)) = positional_at(&text[start..]) else {
                p = start + 1;
                continue;
            };

            let matched = &text[start..start + length];
            let value = cache.entry(matched).or_insert_with(|| match items.get(index) {
                Some(item) => item.host.clone(),
                None => {
                    debug!(
                        "Macro {} refers to item {} of {}",
                        matched,
                        index + 1,
                        items.len()
                    );
                    self.unresolved.clone()
                }
            });

            resolved.push_str(&text[copied..start]);
            resolved.push_str(value);
            copied = start + length;
            p = copied;
        }

        resolved.push_str(&text[copied..]);
        resolved
    }

    /// Replace `{host:key.func(param)}` for `last`, `min`, `max` and `avg`.
    pub fn resolve_functional(&self, text: &str, source: &dyn ItemDataSource) -> String {
        let mut resolved = String::with_capacity(text.len());
        let mut copied = 0;
        let mut p = 0;

        while let Some(found) = text[p..].find('{') {
            let start = p + found;
            let Some(reference) = self
                .references
                .parse(text, start)
                .filter(is_supported_reference)
            else {
                p = start + 1;
                continue;
            };

            let value = self.evaluate(&reference, source).unwrap_or_else(|| {
                debug!("Macro {} cannot be resolved", reference.matched);
                self.unresolved.clone()
            });

            resolved.push_str(&text[copied..start]);
            resolved.push_str(&value);
            copied = start + reference.length;
            p = copied;
        }

        resolved.push_str(&text[copied..]);
        resolved
    }

    fn evaluate(&self, reference: &FunctionMacro, source: &dyn ItemDataSource) -> Option<String> {
        if reference.host == self.unresolved {
            return None;
        }

        let item = source.find_item(&reference.host, &reference.key_raw)?;
        let name = reference.function.function_name.as_str();

        match AggregateFunction::from_name(name) {
            None => source.format_last_value(&item),
            Some(function) => {
                let param = reference.function.param(0).unwrap_or_default();
                let period = period_seconds(&param)
                    .map_err(|err| debug!("Macro {}: {}", reference.matched, err))
                    .ok()?;
                source.aggregate(&item, function, period)
            }
        }
    }
}

/// Length and zero-based item index of a positional macro at the start of `text`
fn positional_at(text: &str) -> Option<(usize, usize)> {
    let rest = POSITIONAL_PREFIXES
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))?;
    let consumed = text.len() - rest.len();

    match rest.as_bytes() {
        [b'}', ..] => Some((consumed + 1, 0)),
        [digit @ b'1'..=b'9', b'}', ..] => Some((consumed + 2, usize::from(digit - b'1'))),
        _ => None,
    }
}

/// Only `last`, `min`, `max` and `avg` with at most one `N[smhdw]` parameter are macros
fn is_supported_reference(reference: &FunctionMacro) -> bool {
    let function = &reference.function;
    if !matches!(function.function_name.as_str(), "last" | "min" | "max" | "avg") {
        return false;
    }

    match function.parameters() {
        [] => true,
        [param] => {
            let raw = param.raw();
            raw.is_empty() || (!param.is_quoted() && parse_time_suffix(raw).is_ok())
        }
        _ => false,
    }
}

fn period_seconds(param: &str) -> Result<u64> {
    parse_time_suffix(param).map_err(|_| RuntimeError::InvalidPeriod(param.to_string()))
}
