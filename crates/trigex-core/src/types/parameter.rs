//! Parameter tree nodes
//!
//! Both the item key scanner and the function scanner produce the same tree:
//! a parameter is either an unquoted string, a quoted string (raw text keeps its
//! quotes and escapes) or a bracketed array of nested parameters.

use serde::{Deserialize, Serialize};

/// A single parameter of an item key or function call.
///
/// `offset` is the byte position of `raw` inside the text the scanner was
/// given. Quoted values are never unescaped eagerly; use [`ParameterNode::unquoted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParameterNode {
    /// Plain text, kept verbatim (trailing spaces included)
    Unquoted { raw: String, offset: usize },
    /// Quoted string, `raw` includes the surrounding quotes
    Quoted { raw: String, offset: usize },
    /// Nested parameter list, `raw` includes the surrounding brackets
    Array {
        raw: String,
        offset: usize,
        parameters: Vec<ParameterNode>,
    },
}

impl ParameterNode {
    /// Create an unquoted parameter
    pub fn unquoted_raw(raw: impl Into<String>, offset: usize) -> Self {
        ParameterNode::Unquoted {
            raw: raw.into(),
            offset,
        }
    }

    /// Create a quoted parameter; `raw` must include the quotes
    pub fn quoted_raw(raw: impl Into<String>, offset: usize) -> Self {
        ParameterNode::Quoted {
            raw: raw.into(),
            offset,
        }
    }

    /// Create an array parameter; `raw` must include the brackets
    pub fn array(raw: impl Into<String>, offset: usize, parameters: Vec<ParameterNode>) -> Self {
        ParameterNode::Array {
            raw: raw.into(),
            offset,
            parameters,
        }
    }

    /// Raw text exactly as written in the source
    pub fn raw(&self) -> &str {
        match self {
            ParameterNode::Unquoted { raw, .. }
            | ParameterNode::Quoted { raw, .. }
            | ParameterNode::Array { raw, .. } => raw,
        }
    }

    /// Byte offset of the raw text
    pub fn offset(&self) -> usize {
        match self {
            ParameterNode::Unquoted { offset, .. }
            | ParameterNode::Quoted { offset, .. }
            | ParameterNode::Array { offset, .. } => *offset,
        }
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self, ParameterNode::Quoted { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ParameterNode::Array { .. })
    }

    /// Nested parameters; empty for scalar nodes
    pub fn parameters(&self) -> &[ParameterNode] {
        match self {
            ParameterNode::Array { parameters, .. } => parameters,
            _ => &[],
        }
    }

    /// Value with quoting resolved.
    ///
    /// Quoted parameters lose their quotes and `\"` becomes `"`. Unquoted and
    /// array parameters are returned as written.
    pub fn unquoted(&self) -> String {
        match self {
            ParameterNode::Quoted { raw, .. } => unquote_param(raw),
            other => other.raw().to_string(),
        }
    }
}

/// Remove the surrounding quotes of a quoted parameter and resolve `\"`.
///
/// Text that is not wrapped in quotes is returned unchanged.
pub fn unquote_param(raw: &str) -> String {
    if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
        return raw.to_string();
    }

    raw[1..raw.len() - 1].replace("\\\"", "\"")
}

/// Quote a value so that it survives re-parsing as a parameter.
///
/// Values that parse back unchanged without quotes are returned as they are.
/// Returns `None` when the value needs quotes but ends with a backslash, which
/// would escape the closing quote.
pub fn quote_param(value: &str) -> Option<String> {
    let needs_quotes = value.starts_with(' ')
        || value.starts_with('"')
        || value.starts_with('[')
        || value.contains(',')
        || value.contains(']')
        || value.contains(')');

    if !needs_quotes {
        return Some(value.to_string());
    }

    if value.ends_with('\\') {
        return None;
    }

    Some(format!("\"{}\"", value.replace('"', "\\\"")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_plain() {
        assert_eq!(unquote_param("\"abc\""), "abc");
        assert_eq!(unquote_param("abc"), "abc");
    }

    #[test]
    fn test_unquote_escaped_quote() {
        assert_eq!(unquote_param(r#""\"""#), "\"");
        assert_eq!(unquote_param(r#""a\"b""#), "a\"b");
    }

    #[test]
    fn test_unquote_keeps_other_backslashes() {
        assert_eq!(unquote_param(r#""C:\temp\n""#), r"C:\temp\n");
    }

    #[test]
    fn test_quote_param() {
        assert_eq!(quote_param("abc").as_deref(), Some("abc"));
        assert_eq!(quote_param("a,b").as_deref(), Some("\"a,b\""));
        assert_eq!(quote_param("\"x\"").as_deref(), Some(r#""\"x\"""#));
        assert_eq!(quote_param(" lead").as_deref(), Some("\" lead\""));
        assert_eq!(quote_param("a,b\\"), None);
    }

    #[test]
    fn test_node_accessors() {
        let node = ParameterNode::array(
            "[a,\"b\"]",
            4,
            vec![
                ParameterNode::unquoted_raw("a", 5),
                ParameterNode::quoted_raw("\"b\"", 7),
            ],
        );

        assert!(node.is_array());
        assert_eq!(node.offset(), 4);
        assert_eq!(node.parameters().len(), 2);
        assert_eq!(node.parameters()[1].unquoted(), "b");
        assert!(node.parameters()[1].is_quoted());
        assert_eq!(node.unquoted(), "[a,\"b\"]");
    }

    #[test]
    fn test_node_serialization() {
        let node = ParameterNode::quoted_raw("\"x\"", 3);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "quoted");
        assert_eq!(json["raw"], "\"x\"");
        assert_eq!(json["offset"], 3);
    }
}
