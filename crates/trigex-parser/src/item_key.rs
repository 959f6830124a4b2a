//! Item key parser
//!
//! Splits keys such as `system.run["echo a, b",nowait]` or `key[a][b]` into
//! the key identifier and a flat list of parameter nodes.

use crate::error::{ParseError, Result};
use crate::params::{scan_param_list, ScanError, ScanErrorKind};
use serde::{Deserialize, Serialize};
use trigex_core::ParsedKey;

/// Characters allowed in a key identifier
pub(crate) fn is_key_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'_' | b'.' | b'-')
}

/// A key found at the start of a longer text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMatch {
    pub key: ParsedKey,
    /// Bytes consumed from the offset the scan started at
    pub length: usize,
}

/// Item key parser
pub struct KeyParser;

impl KeyParser {
    /// Parse a complete item key.
    ///
    /// Parameter offsets are byte positions within `input`.
    pub fn parse(input: &str) -> Result<ParsedKey> {
        let found = Self::parse_prefix(input, 0)?;

        if found.length != input.len() {
            return Err(Self::syntax_error(input, found.length));
        }

        Ok(found.key)
    }

    /// Parse a key starting at `offset` and stop after its last bracket group.
    ///
    /// Trailing text is left for the caller; parameter offsets stay relative to
    /// the start of `input`.
    pub fn parse_prefix(input: &str, offset: usize) -> Result<KeyMatch> {
        if offset > input.len() || !input.is_char_boundary(offset) {
            return Err(ParseError::InvalidKey {
                input: input.to_string(),
                message: format!("offset {offset} is outside of the key"),
            });
        }

        let bytes = input.as_bytes();
        let mut p = offset;

        while p < bytes.len() && is_key_char(bytes[p]) {
            p += 1;
        }

        if p == offset {
            return Err(if offset == bytes.len() {
                ParseError::InvalidKey {
                    input: input.to_string(),
                    message: "key is empty".to_string(),
                }
            } else {
                Self::syntax_error(input, offset)
            });
        }

        let key_id = &input[offset..p];
        let mut parameters = Vec::new();

        while p < bytes.len() && bytes[p] == b'[' {
            let list = scan_param_list(input, p, b']', 0)
                .map_err(|err| Self::scan_error(input, err))?;
            parameters.extend(list.parameters);
            p = list.end;
        }

        log::trace!(
            "Parsed key '{}' with {} parameter(s)",
            key_id,
            parameters.len()
        );

        Ok(KeyMatch {
            key: ParsedKey::new(key_id, parameters),
            length: p - offset,
        })
    }

    fn syntax_error(input: &str, position: usize) -> ParseError {
        ParseError::InvalidKey {
            input: input.to_string(),
            message: format!("incorrect syntax near \"{}\"", &input[position..]),
        }
    }

    fn scan_error(input: &str, err: ScanError) -> ParseError {
        match err.kind {
            ScanErrorKind::UnexpectedEnd => ParseError::InvalidKey {
                input: input.to_string(),
                message: "unexpected end of key".to_string(),
            },
            ScanErrorKind::UnexpectedChar => Self::syntax_error(input, err.position),
        }
    }
}
