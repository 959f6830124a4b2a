//! Boolean clause tokenizer
//!
//! Lexes clauses such as `regexp(a) and not (iregexp(b) or str(c))` into a
//! flat token list and checks the clause grammar on the way:
//!
//! ```text
//! clause  := unary (('and' | 'or') unary)*
//! unary   := ('not' | '-')* primary
//! primary := function | '(' clause ')'
//! ```
//!
//! Nesting is tracked with a depth counter; the tokenizer never recurses.

use crate::error::{ParseError, Result};
use crate::function::FunctionParser;
use crate::function_macro::FunctionMacroParser;
use serde::{Deserialize, Serialize};

/// One lexical element of a clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClauseToken {
    /// A bare function call, `regexp(a)`
    Function(String),
    And,
    Or,
    Not,
    Minus,
    Open,
    Close,
}

impl ClauseToken {
    pub fn is_binary(&self) -> bool {
        matches!(self, ClauseToken::And | ClauseToken::Or)
    }
}

/// How operands are written in the text being tokenized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperandSyntax {
    /// `regexp(a)`, as entered by operators
    #[default]
    Bare,
    /// `{host:key.regexp(a)}`, as stored in trigger expressions
    Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Operand,
    Operator,
}

/// Clause tokenizer
#[derive(Debug, Clone, Default)]
pub struct ClauseTokenizer {
    syntax: OperandSyntax,
    references: FunctionMacroParser,
}

impl ClauseTokenizer {
    /// Tokenizer for operator-entered clauses with bare function calls
    pub fn bare() -> Self {
        Self::default()
    }

    /// Tokenizer for clauses whose operands are `{host:key.func()}` references.
    ///
    /// Function tokens carry the bare call; host and key are dropped.
    pub fn references(parser: FunctionMacroParser) -> Self {
        Self {
            syntax: OperandSyntax::Reference,
            references: parser,
        }
    }

    pub fn syntax(&self) -> OperandSyntax {
        self.syntax
    }

    /// Tokenize a whole clause; trailing text is an error.
    pub fn tokenize(&self, input: &str) -> Result<Vec<ClauseToken>> {
        let (tokens, consumed) = self.tokenize_prefix(input)?;

        if consumed < input.len() {
            return Err(ParseError::InvalidClause {
                position: consumed,
                message: format!("unexpected text \"{}\"", &input[consumed..]),
            });
        }

        Ok(tokens)
    }

    /// Tokenize the longest complete clause at the start of `input`.
    ///
    /// Returns the tokens and the position of the first byte not belonging to
    /// the clause (trailing spaces are consumed).
    pub fn tokenize_prefix(&self, input: &str) -> Result<(Vec<ClauseToken>, usize)> {
        let bytes = input.as_bytes();
        let mut tokens = Vec::new();
        let mut expect = Expect::Operand;
        let mut depth = 0usize;
        let mut p = 0;

        loop {
            while p < bytes.len() && bytes[p].is_ascii_whitespace() {
                p += 1;
            }

            match expect {
                Expect::Operand => {
                    if p == bytes.len() {
                        return Err(ParseError::UnexpectedEnd);
                    }

                    if bytes[p] == b'(' {
                        tokens.push(ClauseToken::Open);
                        depth += 1;
                        p += 1;
                    } else if bytes[p] == b'-' {
                        tokens.push(ClauseToken::Minus);
                        p += 1;
                    } else if keyword_at(bytes, p, "not") {
                        tokens.push(ClauseToken::Not);
                        p += 3;
                    } else {
                        let (call, length) = self.operand_at(input, p)?;
                        tokens.push(ClauseToken::Function(call));
                        p += length;
                        expect = Expect::Operator;
                    }
                }
                Expect::Operator => {
                    if keyword_at(bytes, p, "and") {
                        tokens.push(ClauseToken::And);
                        p += 3;
                        expect = Expect::Operand;
                    } else if keyword_at(bytes, p, "or") {
                        tokens.push(ClauseToken::Or);
                        p += 2;
                        expect = Expect::Operand;
                    } else if depth > 0 && bytes.get(p) == Some(&b')') {
                        tokens.push(ClauseToken::Close);
                        depth -= 1;
                        p += 1;
                    } else if depth > 0 {
                        return Err(if p == bytes.len() {
                            ParseError::UnexpectedEnd
                        } else {
                            ParseError::InvalidClause {
                                position: p,
                                message: "\")\" expected".to_string(),
                            }
                        });
                    } else {
                        log::trace!("Clause '{}' ends at {}", input, p);
                        return Ok((tokens, p));
                    }
                }
            }
        }
    }

    /// Operand at `p`, returned as the bare call and the bytes consumed
    fn operand_at(&self, input: &str, p: usize) -> Result<(String, usize)> {
        match self.syntax {
            OperandSyntax::Bare => match FunctionParser::parse(input, p).into_function() {
                Some(function) => Ok((function.matched, function.length)),
                None => Err(ParseError::InvalidClause {
                    position: p,
                    message: format!("function expected near \"{}\"", &input[p..]),
                }),
            },
            OperandSyntax::Reference => match self.references.parse(input, p) {
                Some(reference) => Ok((reference.function.matched, reference.length)),
                None => Err(ParseError::InvalidClause {
                    position: p,
                    message: format!("function reference expected near \"{}\"", &input[p..]),
                }),
            },
        }
    }
}

/// `word` at `p`, not followed by an identifier character
pub fn keyword_at(bytes: &[u8], p: usize, word: &str) -> bool {
    let end = p + word.len();
    bytes.len() >= end
        && &bytes[p..end] == word.as_bytes()
        && bytes
            .get(end)
            .map_or(true, |c| !(c.is_ascii_alphanumeric() || *c == b'_'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ClauseToken::*;

    fn func(call: &str) -> ClauseToken {
        Function(call.to_string())
    }

    #[test]
    fn test_single_function() {
        let tokens = ClauseTokenizer::bare().tokenize("regexp(test)").unwrap();
        assert_eq!(tokens, vec![func("regexp(test)")]);
    }

    #[test]
    fn test_operators_and_groups() {
        let tokens = ClauseTokenizer::bare()
            .tokenize("regexp(a) and not (iregexp(b) or - str(c))")
            .unwrap();

        assert_eq!(
            tokens,
            vec![
                func("regexp(a)"),
                And,
                Not,
                Open,
                func("iregexp(b)"),
                Or,
                Minus,
                func("str(c)"),
                Close,
            ]
        );
    }

    #[test]
    fn test_keyword_needs_boundary() {
        // `notice(x)` is a function, not `not` followed by `ice(x)`
        let tokens = ClauseTokenizer::bare().tokenize("notice(x)").unwrap();
        assert_eq!(tokens, vec![func("notice(x)")]);

        assert!(ClauseTokenizer::bare().tokenize("regexp(a) andregexp(b)").is_err());
    }

    #[test]
    fn test_prefix_stops_at_comparison() {
        let (tokens, consumed) = ClauseTokenizer::bare()
            .tokenize_prefix("(regexp(a)) >0")
            .unwrap();

        assert_eq!(tokens, vec![Open, func("regexp(a)"), Close]);
        assert_eq!(consumed, 12);
    }

    #[test]
    fn test_unbalanced_groups() {
        let tokenizer = ClauseTokenizer::bare();
        assert_eq!(tokenizer.tokenize("(regexp(a)"), Err(ParseError::UnexpectedEnd));
        assert!(tokenizer.tokenize("regexp(a))").is_err());
        assert_eq!(tokenizer.tokenize("regexp(a) and"), Err(ParseError::UnexpectedEnd));
        assert_eq!(tokenizer.tokenize("  "), Err(ParseError::UnexpectedEnd));
    }

    #[test]
    fn test_reference_operands() {
        let tokenizer = ClauseTokenizer::references(FunctionMacroParser::new());
        let tokens = tokenizer
            .tokenize("not {Zabbix server:system.hostname.regexp(a)}")
            .unwrap();

        assert_eq!(tokens, vec![Not, func("regexp(a)")]);
        assert!(tokenizer.tokenize("regexp(a)").is_err());
    }
}
