//! Parsed item key

use super::parameter::ParameterNode;
use serde::{Deserialize, Serialize};

/// An item key split into its identifier and parameters.
///
/// Parameters of consecutive bracket groups (`key[a][b]`) are flattened into one
/// sequence in left-to-right order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedKey {
    /// Key identifier, e.g. `system.run`
    pub key_id: String,

    /// Parameters of every bracket group
    pub parameters: Vec<ParameterNode>,
}

impl ParsedKey {
    pub fn new(key_id: impl Into<String>, parameters: Vec<ParameterNode>) -> Self {
        Self {
            key_id: key_id.into(),
            parameters,
        }
    }

    /// Number of top-level parameters
    pub fn param_count(&self) -> usize {
        self.parameters.len()
    }

    /// Unquoted value of parameter `n`
    pub fn param(&self, n: usize) -> Option<String> {
        self.parameters.get(n).map(ParameterNode::unquoted)
    }

    /// Raw text of every top-level parameter
    pub fn params_raw(&self) -> Vec<&str> {
        self.parameters.iter().map(ParameterNode::raw).collect()
    }

    /// Re-assemble the key with all parameters in a single bracket group.
    ///
    /// Keys without parameters are returned as the bare identifier.
    pub fn to_key_string(&self) -> String {
        if self.parameters.is_empty() {
            return self.key_id.clone();
        }

        format!("{}[{}]", self.key_id, self.params_raw().join(","))
    }
}

impl std::fmt::Display for ParsedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_key_string())
    }
}
