//! Item references and value types

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Replacement for macros that cannot be resolved
pub const UNRESOLVED_MACRO_STRING: &str = "*UNKNOWN*";

/// One entry of an ordered item list (graph items, map elements).
///
/// Positional macros such as `{HOST.HOST2}` refer to entries by 1-based index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    /// Technical host name
    pub host: String,
}

impl ItemRef {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

/// Type of the values an item collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Float,
    Str,
    Log,
    Unsigned,
    Text,
}

impl ValueType {
    pub const ALL: [ValueType; 5] = [
        ValueType::Float,
        ValueType::Str,
        ValueType::Log,
        ValueType::Unsigned,
        ValueType::Text,
    ];

    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Float | ValueType::Unsigned)
    }

    pub fn is_textual(&self) -> bool {
        !self.is_numeric()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Float => "float",
            ValueType::Str => "str",
            ValueType::Log => "log",
            ValueType::Unsigned => "unsigned",
            ValueType::Text => "text",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float" => Ok(ValueType::Float),
            "str" => Ok(ValueType::Str),
            "log" => Ok(ValueType::Log),
            "unsigned" => Ok(ValueType::Unsigned),
            "text" => Ok(ValueType::Text),
            other => Err(CoreError::InvalidValueType(other.to_string())),
        }
    }
}

/// Numeric codes as stored by the monitoring backend
impl TryFrom<u8> for ValueType {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ValueType::Float),
            1 => Ok(ValueType::Str),
            2 => Ok(ValueType::Log),
            3 => Ok(ValueType::Unsigned),
            4 => Ok(ValueType::Text),
            other => Err(CoreError::InvalidValueType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_codes() {
        assert_eq!(ValueType::try_from(0).unwrap(), ValueType::Float);
        assert_eq!(ValueType::try_from(3).unwrap(), ValueType::Unsigned);
        assert!(ValueType::try_from(9).is_err());
    }

    #[test]
    fn test_value_type_names() {
        for value_type in ValueType::ALL {
            assert_eq!(value_type.as_str().parse::<ValueType>().unwrap(), value_type);
        }
        assert!("double".parse::<ValueType>().is_err());
    }

    #[test]
    fn test_numeric_types() {
        assert!(ValueType::Float.is_numeric());
        assert!(ValueType::Unsigned.is_numeric());
        assert!(ValueType::Log.is_textual());
    }
}
