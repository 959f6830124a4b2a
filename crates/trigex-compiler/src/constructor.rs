//! Expression constructor
//!
//! Turns operator-entered parts such as `regexp(a) and not regexp(b)` (each
//! with a MATCH / NO_MATCH polarity) into one trigger expression over a host
//! item, and splits such expressions back into parts.
//!
//! ```text
//! [regexp(a) MATCH, regexp(b) NO_MATCH]
//!   <=> ((({host:key.regexp(a)})<>0) or (({host:key.regexp(b)})=0))
//! ```

use crate::canonical::{emit, matching_close, simplify};
use crate::error::{CompileError, Result};
use trigex_core::{ExpressionPart, PartType};
use trigex_parser::clause::keyword_at;
use trigex_parser::{ClauseToken, ClauseTokenizer, FunctionMacroParser, KeyParser, ParseError};

/// Comparators a user may close a parenthesized part with, longest first
const COMPARATORS: [&str; 7] = [">=", "<=", "<>", "=", "#", ">", "<"];

/// Builds trigger expressions from parts and splits them back.
#[derive(Debug, Clone)]
pub struct ExpressionConstructor {
    bare: ClauseTokenizer,
    references: ClauseTokenizer,
    reference_parser: FunctionMacroParser,
}

impl Default for ExpressionConstructor {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionConstructor {
    pub fn new() -> Self {
        let reference_parser = FunctionMacroParser::new();
        Self {
            bare: ClauseTokenizer::bare(),
            references: ClauseTokenizer::references(reference_parser.clone()),
            reference_parser,
        }
    }

    /// Combine `parts` into one expression over `host:item_key`.
    pub fn build(&self, host: &str, item_key: &str, parts: &[ExpressionPart]) -> Result<String> {
        if host.trim().is_empty() || !host.bytes().all(FunctionMacroParser::is_host_char) {
            return Err(CompileError::InvalidReference(format!(
                "invalid host name \"{host}\""
            )));
        }

        KeyParser::parse(item_key).map_err(|err| CompileError::InvalidReference(err.to_string()))?;

        if parts.is_empty() {
            return Err(CompileError::EmptyExpression);
        }

        let mut built = Vec::with_capacity(parts.len());
        for (index, part) in parts.iter().enumerate() {
            let tokens = self
                .part_tokens(part.value.trim())
                .map_err(|source| CompileError::InvalidPart { index, source })?;

            let body = emit(&tokens, |call| format!("{{{host}:{item_key}.{call}}}"));
            built.push(format!("(({body}){})", part.part_type.comparison()));
        }

        let expression = if built.len() == 1 {
            built.remove(0)
        } else {
            format!("({})", built.join(" or "))
        };

        log::debug!("Built expression from {} part(s): {}", parts.len(), expression);
        Ok(expression)
    }

    /// Split an expression produced by [`ExpressionConstructor::build`] back into parts.
    pub fn split(&self, expression: &str) -> Result<Vec<ExpressionPart>> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(CompileError::EmptyExpression);
        }

        let inner = self.strip_wrapping(expression);
        let parts = self
            .top_level_segments(inner)?
            .into_iter()
            .enumerate()
            .map(|(index, segment)| self.split_segment(index, segment))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Split expression into {} part(s)", parts.len());
        Ok(parts)
    }

    /// Tokens of one operator-entered part.
    ///
    /// `(clause)>0` and similar forms lose their comparison; the part's
    /// polarity supplies a new one.
    fn part_tokens(&self, value: &str) -> std::result::Result<Vec<ClauseToken>, ParseError> {
        let (mut tokens, consumed) = self.bare.tokenize_prefix(value)?;

        if consumed < value.len() {
            let rest = &value[consumed..];
            let wrapped = tokens.first() == Some(&ClauseToken::Open)
                && matching_close(&tokens, 0) == Some(tokens.len() - 1);

            if !wrapped || !is_numeric_comparison(rest) {
                return Err(ParseError::InvalidClause {
                    position: consumed,
                    message: format!("unexpected text \"{rest}\""),
                });
            }

            tokens.pop();
            tokens.remove(0);
        }

        Ok(simplify(tokens))
    }

    fn split_segment(&self, index: usize, segment: &str) -> Result<ExpressionPart> {
        let segment = self.strip_wrapping(segment.trim());

        let (prefix, rest) = if keyword_at(segment.as_bytes(), 0, "not") {
            (Some("not"), &segment[3..])
        } else if let Some(rest) = segment.strip_prefix('-') {
            (Some("-"), rest)
        } else {
            (None, segment)
        };
        let rest = self.strip_wrapping(rest.trim());

        let close = rest
            .starts_with('(')
            .then(|| self.matching_paren(rest, 0))
            .flatten()
            .ok_or_else(|| {
                CompileError::InvalidExpression(format!("\"{segment}\" is not a comparison"))
            })?;

        let comparison: String = rest[close + 1..]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let part_type = PartType::from_comparison(&comparison).ok_or_else(|| {
            CompileError::InvalidExpression(format!("unsupported comparison \"{comparison}\""))
        })?;

        let tokens = self
            .references
            .tokenize(&rest[1..close])
            .map_err(|source| CompileError::InvalidPart { index, source })?;
        let tokens = simplify(tokens);
        let mut value = emit(&tokens, str::to_string);

        if let Some(prefix) = prefix {
            value = if has_top_level_binary(&tokens) {
                format!("{prefix} ({value})")
            } else {
                format!("{prefix} {value}")
            };
        }

        Ok(ExpressionPart::new(value, part_type))
    }

    /// Remove parentheses enclosing the whole text
    fn strip_wrapping<'a>(&self, mut text: &'a str) -> &'a str {
        while text.starts_with('(') && self.matching_paren(text, 0) == Some(text.len() - 1) {
            text = text[1..text.len() - 1].trim();
        }
        text
    }

    /// Segments separated by `or` outside any parentheses
    fn top_level_segments<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let bytes = text.as_bytes();
        let mut segments = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;
        let mut p = 0;

        while p < bytes.len() {
            match bytes[p] {
                b'{' => {
                    if let Some(reference) = self.reference_parser.parse(text, p) {
                        p += reference.length;
                        continue;
                    }
                }
                b'(' => depth += 1,
                b')' => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        CompileError::InvalidExpression("unbalanced parentheses".to_string())
                    })?;
                }
                b'o' if depth == 0
                    && p > 0
                    && (bytes[p - 1].is_ascii_whitespace() || bytes[p - 1] == b')')
                    && keyword_at(bytes, p, "or") =>
                {
                    segments.push(&text[start..p]);
                    start = p + 2;
                    p += 2;
                    continue;
                }
                _ => {}
            }
            p += 1;
        }

        if depth != 0 {
            return Err(CompileError::InvalidExpression(
                "unbalanced parentheses".to_string(),
            ));
        }

        segments.push(&text[start..]);
        Ok(segments)
    }

    /// Position of the `)` closing the `(` at `open`, skipping function references
    fn matching_paren(&self, text: &str, open: usize) -> Option<usize> {
        let bytes = text.as_bytes();
        let mut depth = 0usize;
        let mut p = open;

        while p < bytes.len() {
            match bytes[p] {
                b'{' => {
                    if let Some(reference) = self.reference_parser.parse(text, p) {
                        p += reference.length;
                        continue;
                    }
                }
                b'(' => depth += 1,
                b')' => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(p);
                    }
                }
                _ => {}
            }
            p += 1;
        }

        None
    }
}

fn has_top_level_binary(tokens: &[ClauseToken]) -> bool {
    let mut depth = 0usize;
    for token in tokens {
        match token {
            ClauseToken::Open => depth += 1,
            ClauseToken::Close => depth = depth.saturating_sub(1),
            token if token.is_binary() && depth == 0 => return true,
            _ => {}
        }
    }
    false
}

/// `<cmp> <number>`, e.g. `>0`, `= 1`, `<>-2.5`
fn is_numeric_comparison(text: &str) -> bool {
    let text = text.trim();
    let Some(rest) = COMPARATORS.iter().find_map(|cmp| text.strip_prefix(cmp)) else {
        return false;
    };

    let number = rest.trim_start();
    let number = number.strip_prefix('-').unwrap_or(number);
    let (whole, fraction) = match number.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (number, None),
    };

    !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.map_or(true, |f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()))
}
