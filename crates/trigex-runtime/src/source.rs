//! Item data sources
//!
//! Functional macros need item lookups and history values. The resolver only
//! talks to the [`ItemDataSource`] trait; where the data comes from (API,
//! database, fixtures) is up to the caller.

use crate::error::{Result, RuntimeError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use trigex_core::ValueType;

/// Aggregations available in functional macros
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateFunction {
    Min,
    Max,
    Avg,
}

impl AggregateFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "min" => Some(AggregateFunction::Min),
            "max" => Some(AggregateFunction::Max),
            "avg" => Some(AggregateFunction::Avg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
            AggregateFunction::Avg => "avg",
        }
    }
}

/// An item as returned by a data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub item_id: u64,
    pub host: String,
    /// Key as written in expressions, `vfs.fs.size[/,free]`
    pub key: String,
    pub value_type: ValueType,
    #[serde(default)]
    pub units: String,
}

impl ItemRecord {
    pub fn new(item_id: u64, host: impl Into<String>, key: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            item_id,
            host: host.into(),
            key: key.into(),
            value_type,
            units: String::new(),
        }
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }
}

/// Read-only access to items and their values.
///
/// Every method returns `None` when the answer is unknown (missing item, no
/// permission, no data); the resolver shows those as unresolved.
pub trait ItemDataSource {
    /// Item with `key` on `host`
    fn find_item(&self, host: &str, key: &str) -> Option<ItemRecord>;

    /// Display form of the most recent value
    fn format_last_value(&self, item: &ItemRecord) -> Option<String>;

    /// Display form of `function` over the last `period` seconds
    fn aggregate(&self, item: &ItemRecord, function: AggregateFunction, period: u64) -> Option<String>;
}

/// One collected value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryValue {
    /// Unix timestamp in seconds
    pub clock: u64,
    pub value: String,
}

#[derive(Debug, Clone)]
struct StoredItem {
    record: ItemRecord,
    history: Vec<HistoryValue>,
}

/// File layout accepted by [`InMemoryItemSource::from_yaml_str`]
#[derive(Debug, Deserialize)]
struct SourceFile {
    now: u64,
    #[serde(default)]
    items: Vec<ItemEntry>,
}

#[derive(Debug, Deserialize)]
struct ItemEntry {
    item_id: u64,
    host: String,
    key: String,
    value_type: ValueType,
    #[serde(default)]
    units: String,
    #[serde(default)]
    history: Vec<HistoryValue>,
}

/// Data source backed by items and history held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemSource {
    /// Reference time for aggregation periods
    now: u64,
    items: Vec<StoredItem>,
}

impl InMemoryItemSource {
    pub fn new(now: u64) -> Self {
        Self {
            now,
            items: Vec::new(),
        }
    }

    /// Load items from YAML:
    ///
    /// ```yaml
    /// now: 1700000600
    /// items:
    ///   - item_id: 1
    ///     host: A
    ///     key: system.cpu.load
    ///     value_type: float
    ///     history:
    ///       - { clock: 1700000000, value: "1.5" }
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: SourceFile = serde_yaml::from_str(yaml)?;
        let mut source = Self::new(file.now);

        for entry in file.items {
            let record = ItemRecord::new(entry.item_id, entry.host, entry.key, entry.value_type)
                .with_units(entry.units);
            source.add_item(record)?;
            for value in entry.history {
                source.push_value(entry.item_id, value.clock, value.value)?;
            }
        }

        tracing::debug!("Loaded {} item(s) into memory source", source.items.len());
        Ok(source)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn set_now(&mut self, now: u64) {
        self.now = now;
    }

    /// Register an item; a host cannot have two items with the same key
    pub fn add_item(&mut self, record: ItemRecord) -> Result<()> {
        if self
            .items
            .iter()
            .any(|s| s.record.item_id == record.item_id || (s.record.host == record.host && s.record.key == record.key))
        {
            return Err(RuntimeError::DuplicateItem {
                host: record.host,
                key: record.key,
            });
        }

        self.items.push(StoredItem {
            record,
            history: Vec::new(),
        });
        Ok(())
    }

    /// Append a value to the history of `item_id`
    pub fn push_value(&mut self, item_id: u64, clock: u64, value: impl Into<String>) -> Result<()> {
        let stored = self
            .items
            .iter_mut()
            .find(|s| s.record.item_id == item_id)
            .ok_or(RuntimeError::ItemNotFound(item_id))?;

        stored.history.push(HistoryValue {
            clock,
            value: value.into(),
        });
        Ok(())
    }

    fn history(&self, item: &ItemRecord) -> Option<&[HistoryValue]> {
        self.items
            .iter()
            .find(|s| s.record.item_id == item.item_id)
            .map(|s| s.history.as_slice())
    }
}

impl ItemDataSource for InMemoryItemSource {
    fn find_item(&self, host: &str, key: &str) -> Option<ItemRecord> {
        self.items
            .iter()
            .find(|s| s.record.host == host && s.record.key == key)
            .map(|s| s.record.clone())
    }

    fn format_last_value(&self, item: &ItemRecord) -> Option<String> {
        let last = self.history(item)?.iter().max_by_key(|v| v.clock)?;

        let value = match item.value_type {
            ValueType::Float => last
                .value
                .parse::<f64>()
                .map(format_number)
                .unwrap_or_else(|_| last.value.clone()),
            _ => last.value.clone(),
        };

        Some(with_units(value, item))
    }

    fn aggregate(&self, item: &ItemRecord, function: AggregateFunction, period: u64) -> Option<String> {
        if !item.value_type.is_numeric() {
            return None;
        }

        let since = self.now.saturating_sub(period);
        let values: Vec<f64> = self
            .history(item)?
            .iter()
            .filter(|v| v.clock > since && v.clock <= self.now)
            .filter_map(|v| v.value.parse::<f64>().ok())
            .collect();

        if values.is_empty() {
            return None;
        }

        let result = match function {
            AggregateFunction::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            AggregateFunction::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            AggregateFunction::Avg => values.iter().sum::<f64>() / values.len() as f64,
        };

        Some(with_units(format_number(result), item))
    }
}

/// Up to four decimals, trailing zeros removed
fn format_number(value: f64) -> String {
    let formatted = format!("{value:.4}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

fn with_units(value: String, item: &ItemRecord) -> String {
    if item.units.is_empty() {
        value
    } else {
        format!("{} {}", value, item.units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> InMemoryItemSource {
        let mut source = InMemoryItemSource::new(1_000);
        source
            .add_item(ItemRecord::new(1, "A", "system.cpu.load", ValueType::Float))
            .unwrap();
        source
            .add_item(ItemRecord::new(2, "A", "agent.version", ValueType::Str))
            .unwrap();
        for (clock, value) in [(400, "9"), (800, "1"), (900, "2.5"), (1_000, "3")] {
            source.push_value(1, clock, value).unwrap();
        }
        source.push_value(2, 10, "6.0.0").unwrap();
        source
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(1.0 / 3.0), "0.3333");
        assert_eq!(format_number(-0.00001), "0");
    }

    #[test]
    fn test_last_value() {
        let source = source();
        let item = source.find_item("A", "system.cpu.load").unwrap();
        assert_eq!(source.format_last_value(&item).as_deref(), Some("3"));

        let item = source.find_item("A", "agent.version").unwrap();
        assert_eq!(source.format_last_value(&item).as_deref(), Some("6.0.0"));
    }

    #[test]
    fn test_aggregate_period() {
        let source = source();
        let item = source.find_item("A", "system.cpu.load").unwrap();

        assert_eq!(source.aggregate(&item, AggregateFunction::Min, 300).as_deref(), Some("1"));
        assert_eq!(source.aggregate(&item, AggregateFunction::Max, 300).as_deref(), Some("3"));
        assert_eq!(source.aggregate(&item, AggregateFunction::Avg, 200).as_deref(), Some("2.75"));
        assert_eq!(source.aggregate(&item, AggregateFunction::Max, 1_000).as_deref(), Some("9"));
        assert_eq!(source.aggregate(&item, AggregateFunction::Avg, 0), None);
    }

    #[test]
    fn test_aggregate_rejects_text_items() {
        let source = source();
        let item = source.find_item("A", "agent.version").unwrap();
        assert_eq!(source.aggregate(&item, AggregateFunction::Max, 1_000), None);
    }

    #[test]
    fn test_record_json() {
        let record = ItemRecord::new(5, "A", "net.if.in[eth0]", ValueType::Unsigned).with_units("bps");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["value_type"], "unsigned");

        let without_units: ItemRecord = serde_json::from_str(
            r#"{"item_id":5,"host":"A","key":"k","value_type":"float"}"#,
        )
        .unwrap();
        assert_eq!(without_units.units, "");
        assert_eq!(AggregateFunction::from_name("avg"), Some(AggregateFunction::Avg));
        assert_eq!(AggregateFunction::from_name("last"), None);
    }

    #[test]
    fn test_duplicate_items() {
        let mut source = source();
        let err = source
            .add_item(ItemRecord::new(3, "A", "system.cpu.load", ValueType::Float))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::DuplicateItem { .. }));
        assert!(matches!(source.push_value(42, 0, "1"), Err(RuntimeError::ItemNotFound(42))));
    }
}
