//! Expression parts exchanged with the expression constructor

use serde::{Deserialize, Serialize};

/// Polarity of an expression part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartType {
    /// The clause must match: compared with `<>0`
    Match,
    /// The clause must not match: compared with `=0`
    NoMatch,
}

impl PartType {
    /// Comparison appended to the part when building an expression
    pub fn comparison(&self) -> &'static str {
        match self {
            PartType::Match => "<>0",
            PartType::NoMatch => "=0",
        }
    }

    /// Inverse of [`PartType::comparison`]
    pub fn from_comparison(comparison: &str) -> Option<Self> {
        match comparison {
            "<>0" => Some(PartType::Match),
            "=0" => Some(PartType::NoMatch),
            _ => None,
        }
    }
}

/// One user-entered free-text clause with its polarity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionPart {
    /// Free-text boolean clause, e.g. `regexp(a) and regexp(b)`
    pub value: String,

    #[serde(rename = "type")]
    pub part_type: PartType,
}

impl ExpressionPart {
    pub fn new(value: impl Into<String>, part_type: PartType) -> Self {
        Self {
            value: value.into(),
            part_type,
        }
    }

    /// Part that must match
    pub fn matching(value: impl Into<String>) -> Self {
        Self::new(value, PartType::Match)
    }

    /// Part that must not match
    pub fn not_matching(value: impl Into<String>) -> Self {
        Self::new(value, PartType::NoMatch)
    }
}
