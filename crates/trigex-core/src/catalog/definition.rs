//! Trigger function definitions

use crate::types::ValueType;
use serde::{Deserialize, Serialize};

/// Unit an integer parameter can be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricUnit {
    /// Seconds, optionally with a suffix (`300`, `5m`)
    Time,
    /// Number of values, written `#<n>`
    Counts,
}

/// Units accepted by an integer parameter.
///
/// Some parameters accept exactly one unit, others let the operator choose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Single(MetricUnit),
    Choice(Vec<MetricUnit>),
}

impl Metric {
    /// Time or count, time preselected
    pub fn time_or_counts() -> Self {
        Metric::Choice(vec![MetricUnit::Time, MetricUnit::Counts])
    }

    /// Unit preselected in an editor
    pub fn default_unit(&self) -> MetricUnit {
        match self {
            Metric::Single(unit) => *unit,
            Metric::Choice(units) => units.first().copied().unwrap_or(MetricUnit::Time),
        }
    }

    pub fn allows(&self, unit: MetricUnit) -> bool {
        match self {
            Metric::Single(single) => *single == unit,
            Metric::Choice(units) => units.contains(&unit),
        }
    }
}

/// Kind of value a parameter holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Int,
    Str,
    Float,
}

/// One positional parameter of a trigger function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDef {
    /// Caption shown next to the input field
    pub caption: String,

    pub kind: ParamKind,

    /// Units for `Int` parameters measuring a period; `None` for plain shifts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<Metric>,

    /// Parameter must be present and non-empty
    #[serde(default)]
    pub mandatory: bool,

    /// A zero period (`0`, `#0`) is accepted
    #[serde(default)]
    pub zero_allowed: bool,
}

impl ParamDef {
    fn with_kind(caption: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            caption: caption.into(),
            kind,
            metric: None,
            mandatory: false,
            zero_allowed: false,
        }
    }

    pub fn int(caption: impl Into<String>) -> Self {
        Self::with_kind(caption, ParamKind::Int)
    }

    pub fn string(caption: impl Into<String>) -> Self {
        Self::with_kind(caption, ParamKind::Str)
    }

    pub fn float(caption: impl Into<String>) -> Self {
        Self::with_kind(caption, ParamKind::Float)
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn zero_allowed(mut self) -> Self {
        self.zero_allowed = true;
        self
    }
}

/// A trigger function known to the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamDef>,
    pub allowed_types: Vec<ValueType>,
}

impl FunctionDef {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
            allowed_types: ValueType::ALL.to_vec(),
        }
    }

    pub fn param(mut self, param: ParamDef) -> Self {
        self.params.push(param);
        self
    }

    pub fn allowed_types(mut self, types: &[ValueType]) -> Self {
        self.allowed_types = types.to_vec();
        self
    }

    pub fn accepts(&self, value_type: ValueType) -> bool {
        self.allowed_types.contains(&value_type)
    }

    /// Number of parameters that must be supplied
    pub fn mandatory_count(&self) -> usize {
        self.params.iter().filter(|p| p.mandatory).count()
    }
}
