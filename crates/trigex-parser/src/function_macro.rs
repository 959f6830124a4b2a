//! Parser for `{host:key.func(params)}` references

use crate::function::{FunctionParser, ParseOutcome};
use crate::item_key::{is_key_char, KeyParser};
use serde::{Deserialize, Serialize};
use trigex_core::{ParsedFunction, ParsedKey};

/// A function applied to a host item, as written inside braces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMacro {
    /// Whole reference including braces
    pub matched: String,
    pub host: String,
    pub key: ParsedKey,
    /// Key text as written, `system.run[a]`
    pub key_raw: String,
    pub function: ParsedFunction,
    /// Bytes consumed from the opening brace
    pub length: usize,
}

/// Recognises function references at a position of a larger text.
#[derive(Debug, Clone, Default)]
pub struct FunctionMacroParser {
    /// Literal host values accepted in addition to plain host names
    allowed_hosts: Vec<String>,
}

impl FunctionMacroParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also accept `host` verbatim in the host position, even if it contains
    /// characters a host name cannot have.
    pub fn allow_host(mut self, host: impl Into<String>) -> Self {
        self.allowed_hosts.push(host.into());
        self
    }

    pub fn is_host_char(c: u8) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, b'_' | b'.' | b' ' | b'-')
    }

    /// Parse a reference whose `{` is at `offset`.
    pub fn parse(&self, input: &str, offset: usize) -> Option<FunctionMacro> {
        let bytes = input.as_bytes();
        if bytes.get(offset) != Some(&b'{') {
            return None;
        }

        let host_start = offset + 1;
        let host_end = self.scan_host(input, host_start)?;
        let key_start = host_end + 1;

        let mut p = key_start;
        while p < bytes.len() && is_key_char(bytes[p]) {
            p += 1;
        }
        if p == key_start {
            return None;
        }

        let (key, key_end, function_start) = match bytes.get(p) {
            Some(b'[') => {
                let found = KeyParser::parse_prefix(input, key_start).ok()?;
                let key_end = key_start + found.length;
                if bytes.get(key_end) != Some(&b'.') {
                    return None;
                }
                (found.key, key_end, key_end + 1)
            }
            Some(b'(') => {
                // The identifier run covers `key.func`; the function starts after the last dot.
                let dot = key_start + input[key_start..p].rfind('.')?;
                if dot == key_start || dot + 1 == p {
                    return None;
                }
                (ParsedKey::new(&input[key_start..dot], Vec::new()), dot, dot + 1)
            }
            _ => return None,
        };

        let function = match FunctionParser::parse(input, function_start) {
            ParseOutcome::SuccessContinues(function) => function,
            _ => return None,
        };

        let close = function_start + function.length;
        if bytes.get(close) != Some(&b'}') {
            return None;
        }

        Some(FunctionMacro {
            matched: input[offset..=close].to_string(),
            host: input[host_start..host_end].to_string(),
            key,
            key_raw: input[key_start..key_end].to_string(),
            function,
            length: close + 1 - offset,
        })
    }

    /// Position of the `:` ending the host
    fn scan_host(&self, input: &str, start: usize) -> Option<usize> {
        let rest = &input[start..];
        for host in &self.allowed_hosts {
            if rest.starts_with(host.as_str()) && rest.as_bytes().get(host.len()) == Some(&b':') {
                return Some(start + host.len());
            }
        }

        let bytes = input.as_bytes();
        let mut p = start;
        while p < bytes.len() && Self::is_host_char(bytes[p]) {
            p += 1;
        }

        (p > start && bytes.get(p) == Some(&b':')).then_some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_reference() {
        let found = FunctionMacroParser::new()
            .parse("{Zabbix server:system.hostname.regexp(a)}", 0)
            .unwrap();

        assert_eq!(found.host, "Zabbix server");
        assert_eq!(found.key.key_id, "system.hostname");
        assert_eq!(found.key_raw, "system.hostname");
        assert_eq!(found.function.matched, "regexp(a)");
        assert_eq!(found.length, found.matched.len());
    }

    #[test]
    fn test_reference_with_key_parameters() {
        let input = "x {host:vfs.fs.size[/,free].last(0)} y";
        let found = FunctionMacroParser::new().parse(input, 2).unwrap();

        assert_eq!(found.key_raw, "vfs.fs.size[/,free]");
        assert_eq!(found.key.param(1).as_deref(), Some("free"));
        assert_eq!(found.function.function_name, "last");
        assert_eq!(found.matched, "{host:vfs.fs.size[/,free].last(0)}");
    }

    #[test]
    fn test_allowed_host_literal() {
        let input = "{*UNKNOWN*:agent.ping.last()}";
        assert!(FunctionMacroParser::new().parse(input, 0).is_none());

        let found = FunctionMacroParser::new()
            .allow_host("*UNKNOWN*")
            .parse(input, 0)
            .unwrap();
        assert_eq!(found.host, "*UNKNOWN*");
    }

    #[test]
    fn test_rejected_references() {
        let parser = FunctionMacroParser::new();
        for input in [
            "{host:item}",
            "{host:last()}",
            "{host:item.last()",
            "{host:item.last()x}",
            "{:item.last()}",
            "{host:item[a]last()}",
            "host:item.last()}",
        ] {
            assert!(parser.parse(input, 0).is_none(), "{input}");
        }
    }
}
