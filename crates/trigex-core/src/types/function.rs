//! Parsed trigger function call

use super::parameter::ParameterNode;
use serde::{Deserialize, Serialize};

/// A function call such as `last(#3)` recognised inside a larger string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFunction {
    /// The whole call, `last(#3)`
    pub matched: String,

    /// Function name, `last`
    pub function_name: String,

    /// Text between the parentheses, `#3`
    pub parameters_raw: String,

    /// Always an `Array` node whose raw text is the parenthesized list
    pub params_tree: ParameterNode,

    /// Bytes consumed from the start offset; equals `matched.len()`
    pub length: usize,
}

impl ParsedFunction {
    /// Top-level parameters
    pub fn parameters(&self) -> &[ParameterNode] {
        self.params_tree.parameters()
    }

    /// Number of top-level parameters
    pub fn params_num(&self) -> usize {
        self.parameters().len()
    }

    /// Unquoted value of parameter `n`
    pub fn param(&self, n: usize) -> Option<String> {
        self.parameters().get(n).map(ParameterNode::unquoted)
    }
}
