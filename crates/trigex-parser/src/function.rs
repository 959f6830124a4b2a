//! Trigger function call parser
//!
//! Recognises `name(params)` at a given offset of a larger string. The caller
//! decides whether text following the call is acceptable; the parser only
//! reports whether the call ends the input, is followed by something that may
//! legitimately continue (`}`, `)`, operators, spaces), or abuts text that
//! cannot follow a call at all.

use crate::error::{ParseError, Result};
use crate::params::{scan_param_list, ScanErrorKind};
use serde::{Deserialize, Serialize};
use trigex_core::{ParameterNode, ParsedFunction};

/// Result of [`FunctionParser::parse`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseOutcome {
    /// The call runs to the end of the input
    Success(ParsedFunction),
    /// The call is followed by more text the caller has to scan
    SuccessContinues(ParsedFunction),
    /// No valid call at the offset
    Fail,
}

impl ParseOutcome {
    pub fn is_fail(&self) -> bool {
        matches!(self, ParseOutcome::Fail)
    }

    pub fn function(&self) -> Option<&ParsedFunction> {
        match self {
            ParseOutcome::Success(f) | ParseOutcome::SuccessContinues(f) => Some(f),
            ParseOutcome::Fail => None,
        }
    }

    pub fn into_function(self) -> Option<ParsedFunction> {
        match self {
            ParseOutcome::Success(f) | ParseOutcome::SuccessContinues(f) => Some(f),
            ParseOutcome::Fail => None,
        }
    }
}

/// Trigger function call parser
pub struct FunctionParser;

impl FunctionParser {
    /// Parse a function call starting at `offset`.
    pub fn parse(input: &str, offset: usize) -> ParseOutcome {
        let function = match Self::scan(input, offset) {
            Ok(function) => function,
            Err(err) => {
                log::trace!("No function call in '{}': {}", input, err);
                return ParseOutcome::Fail;
            }
        };

        match input.as_bytes().get(offset + function.length) {
            None => ParseOutcome::Success(function),
            Some(&next) if Self::abuts(next) => {
                log::trace!(
                    "Function call '{}' is followed by '{}'",
                    function.matched,
                    next as char
                );
                ParseOutcome::Fail
            }
            Some(_) => ParseOutcome::SuccessContinues(function),
        }
    }

    /// Parse a whole string that must consist of exactly one function call.
    pub fn parse_strict(input: &str) -> Result<ParsedFunction> {
        let function = Self::scan(input, 0)?;

        if function.length != input.len() {
            return Err(ParseError::InvalidFunction {
                position: function.length,
                message: format!("unexpected text \"{}\"", &input[function.length..]),
            });
        }

        Ok(function)
    }

    /// Scan the call itself, ignoring what follows it.
    pub fn scan(input: &str, offset: usize) -> Result<ParsedFunction> {
        if offset > input.len() || !input.is_char_boundary(offset) {
            return Err(ParseError::InvalidFunction {
                position: offset,
                message: "offset is outside of the input".to_string(),
            });
        }

        let bytes = input.as_bytes();
        let mut p = offset;

        while p < bytes.len() && Self::is_name_char(bytes[p]) {
            p += 1;
        }

        if p == offset {
            return Err(ParseError::InvalidFunction {
                position: offset,
                message: "function name expected".to_string(),
            });
        }

        if bytes.get(p) != Some(&b'(') {
            return Err(ParseError::InvalidFunction {
                position: p,
                message: "\"(\" expected".to_string(),
            });
        }

        let open = p;
        let list = scan_param_list(input, open, b')', open + 1).map_err(|err| match err.kind {
            ScanErrorKind::UnexpectedEnd => ParseError::UnexpectedEnd,
            ScanErrorKind::UnexpectedChar => ParseError::InvalidFunction {
                position: err.position,
                message: "\",\" or \")\" expected".to_string(),
            },
        })?;

        let end = list.end;
        Ok(ParsedFunction {
            matched: input[offset..end].to_string(),
            function_name: input[offset..open].to_string(),
            parameters_raw: input[open + 1..end - 1].to_string(),
            params_tree: ParameterNode::array(&input[open..end], open - offset, list.parameters),
            length: end - offset,
        })
    }

    fn is_name_char(c: u8) -> bool {
        c.is_ascii_lowercase()
    }

    /// Characters that cannot directly follow a call
    fn abuts(c: u8) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, b'_' | b'(' | b'"')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_tree() {
        let function = FunctionParser::parse("last(#1, \"x\")", 0).into_function().unwrap();

        assert_eq!(function.params_tree.raw(), "(#1, \"x\")");
        assert_eq!(function.params_tree.offset(), 4);
        assert_eq!(function.parameters()[0].offset(), 0);
        assert_eq!(function.parameters()[1].offset(), 4);
        assert_eq!(function.parameters_raw, "#1, \"x\"");
    }

    #[test]
    fn test_offsets_relative_to_parenthesis() {
        let function = FunctionParser::parse("1+min(5m,1h)", 2).into_function().unwrap();

        assert_eq!(function.matched, "min(5m,1h)");
        assert_eq!(function.params_tree.offset(), 3);
        assert_eq!(function.parameters()[1].offset(), 3);
    }

    #[test]
    fn test_parse_strict() {
        assert_eq!(FunctionParser::parse_strict("count(5m)").unwrap().function_name, "count");
        assert!(matches!(
            FunctionParser::parse_strict("count(5m)=1"),
            Err(ParseError::InvalidFunction { position: 9, .. })
        ));
        assert_eq!(FunctionParser::parse_strict("count(5m"), Err(ParseError::UnexpectedEnd));
    }

    #[test]
    fn test_uppercase_name_rejected() {
        assert!(FunctionParser::parse("Last()", 0).is_fail());
    }
}
