//! Unit tests for trigex-runtime
//!
//! Covers positional and functional macro resolution and the in-memory
//! item data source.

use std::io::Write;
use trigex_core::{ItemRef, ValueType, UNRESOLVED_MACRO_STRING};
use trigex_runtime::{
    AggregateFunction, InMemoryItemSource, ItemDataSource, ItemRecord, MacroResolver,
    RuntimeError,
};

fn items(hosts: &[&str]) -> Vec<ItemRef> {
    hosts.iter().map(|h| ItemRef::new(*h)).collect()
}

fn source() -> InMemoryItemSource {
    let mut source = InMemoryItemSource::new(1_000);
    source
        .add_item(ItemRecord::new(1, "A", "system.cpu.load", ValueType::Float))
        .unwrap();
    source
        .add_item(ItemRecord::new(2, "B", "vfs.fs.size[/,free]", ValueType::Unsigned).with_units("B"))
        .unwrap();
    source.push_value(1, 900, "1.25").unwrap();
    source.push_value(1, 1_000, "2").unwrap();
    source.push_value(2, 1_000, "1024").unwrap();
    source
}

// ========== Positional Macros ==========

#[test]
fn test_positional_host_macros() {
    let resolver = MacroResolver::new();
    let source = source();
    let list = items(&["A"]);

    assert_eq!(resolver.resolve("{HOST.HOST}", &list, &source), "A");
    assert_eq!(resolver.resolve("{HOST.HOST2}", &list, &source), UNRESOLVED_MACRO_STRING);
}

#[test]
fn test_positional_indexes() {
    let resolver = MacroResolver::new();
    let list = items(&["web-1", "db 2"]);

    assert_eq!(
        resolver.resolve_positional("{HOST.HOST1} -> {HOSTNAME2} ({HOSTNAME})", &list),
        "web-1 -> db 2 (web-1)"
    );
    assert_eq!(
        resolver.resolve_positional("{HOST.HOST2}/{HOST.HOST2}/{HOST.HOST3}", &list),
        "db 2/db 2/*UNKNOWN*"
    );
}

#[test]
fn test_non_macro_text_is_kept() {
    let resolver = MacroResolver::new();
    let source = source();
    let list = items(&["A"]);

    for text in [
        "",
        "plain label",
        "{HOST.NAME} {HOST.HOST0} {HOST.HOST10}",
        "{$USER.MACRO} {",
        "{ {HOST.HOST",
    ] {
        assert_eq!(resolver.resolve(text, &list, &source), text, "{text}");
    }
}

#[test]
fn test_no_items() {
    let resolver = MacroResolver::new();
    assert_eq!(resolver.resolve_positional("{HOSTNAME}", &[]), "*UNKNOWN*");
}

// ========== Functional Macros ==========

#[test]
fn test_last_value() {
    let resolver = MacroResolver::new();
    let source = source();

    assert_eq!(
        resolver.resolve("Load: {A:system.cpu.load.last()}", &[], &source),
        "Load: 2"
    );
    assert_eq!(
        resolver.resolve("Free: {B:vfs.fs.size[/,free].last(0)}", &[], &source),
        "Free: 1024 B"
    );
}

#[test]
fn test_aggregates() {
    let resolver = MacroResolver::new();
    let source = source();

    assert_eq!(resolver.resolve("{A:system.cpu.load.avg(200)}", &[], &source), "1.625");
    assert_eq!(resolver.resolve("{A:system.cpu.load.min(5m)}", &[], &source), "1.25");
    assert_eq!(resolver.resolve("{A:system.cpu.load.max(1h)}", &[], &source), "2");
    // only the value at 1000 is newer than 1000-50
    assert_eq!(resolver.resolve("{A:system.cpu.load.min(50s)}", &[], &source), "2");
}

#[test]
fn test_positional_host_in_functional_macro() {
    let resolver = MacroResolver::new();
    let source = source();

    assert_eq!(
        resolver.resolve("{{HOST.HOST}:system.cpu.load.last()}", &items(&["A"]), &source),
        "2"
    );
    assert_eq!(
        resolver.resolve("{{HOST.HOST2}:system.cpu.load.last()}", &items(&["A"]), &source),
        "*UNKNOWN*"
    );
}

#[test]
fn test_unresolvable_functional_macros() {
    let resolver = MacroResolver::new();
    let source = source();

    // unknown item
    assert_eq!(resolver.resolve("{A:missing.key.last()}", &[], &source), "*UNKNOWN*");
    // aggregates need a period
    assert_eq!(resolver.resolve("{A:system.cpu.load.avg()}", &[], &source), "*UNKNOWN*");
    // nothing in the period
    assert_eq!(resolver.resolve("{A:system.cpu.load.avg(0)}", &[], &source), "*UNKNOWN*");
    // aggregates of text items
    let mut text_source = InMemoryItemSource::new(10);
    text_source
        .add_item(ItemRecord::new(7, "A", "agent.version", ValueType::Str))
        .unwrap();
    text_source.push_value(7, 10, "6.0").unwrap();
    assert_eq!(resolver.resolve("{A:agent.version.max(1h)}", &[], &text_source), "*UNKNOWN*");
    assert_eq!(resolver.resolve("{A:agent.version.last()}", &[], &text_source), "6.0");
}

#[test]
fn test_unsupported_functional_macros_are_kept() {
    let resolver = MacroResolver::new();
    let source = source();

    for text in [
        "{A:system.cpu.load.count(5m)}",
        "{A:system.cpu.load.last(#1)}",
        "{A:system.cpu.load.avg(5m,1h)}",
        "{A:system.cpu.load.avg(\"5m\")}",
        "{A:system.cpu.load.avg(5m)",
    ] {
        assert_eq!(resolver.resolve(text, &[], &source), text, "{text}");
    }
}

#[test]
fn test_mixed_text() {
    let resolver = MacroResolver::new();
    let source = source();

    let resolved = resolver.resolve(
        "{HOST.HOST} load {{HOST.HOST}:system.cpu.load.last()}, {B} free {B:vfs.fs.size[/,free].last()}",
        &items(&["A"]),
        &source,
    );
    assert_eq!(resolved, "A load 2, {B} free 1024 B");
}

#[test]
fn test_custom_unresolved_string() {
    let resolver = MacroResolver::with_unresolved("n/a");
    let source = source();

    assert_eq!(resolver.unresolved(), "n/a");
    assert_eq!(resolver.resolve("{HOST.HOST3}", &items(&["A"]), &source), "n/a");
    assert_eq!(
        resolver.resolve("{{HOST.HOST3}:system.cpu.load.last()}", &items(&["A"]), &source),
        "n/a"
    );
}

struct FixedSource;

impl ItemDataSource for FixedSource {
    fn find_item(&self, host: &str, key: &str) -> Option<ItemRecord> {
        (host == "any").then(|| ItemRecord::new(1, host, key, ValueType::Float))
    }

    fn format_last_value(&self, item: &ItemRecord) -> Option<String> {
        Some(format!("last of {}", item.key))
    }

    fn aggregate(&self, item: &ItemRecord, function: AggregateFunction, period: u64) -> Option<String> {
        Some(format!("{} of {} over {}", function.as_str(), item.key, period))
    }
}

#[test]
fn test_custom_data_source() {
    let resolver = MacroResolver::new();

    assert_eq!(
        resolver.resolve("{any:net.if.in[eth0].avg(1d)}", &[], &FixedSource),
        "avg of net.if.in[eth0] over 86400"
    );
    assert_eq!(resolver.resolve("{any:k.last()}", &[], &FixedSource), "last of k");
    assert_eq!(resolver.resolve("{other:k.last()}", &[], &FixedSource), "*UNKNOWN*");
}

// ========== In-Memory Source ==========

const SOURCE_YAML: &str = r#"
now: 1000
items:
  - item_id: 1
    host: A
    key: system.cpu.load
    value_type: float
    units: "%"
    history:
      - { clock: 900, value: "10" }
      - { clock: 950, value: "20.5" }
  - item_id: 2
    host: A
    key: agent.version
    value_type: str
"#;

#[test]
fn test_source_from_yaml() -> anyhow::Result<()> {
    let source = InMemoryItemSource::from_yaml_str(SOURCE_YAML)?;
    let resolver = MacroResolver::new();

    assert_eq!(source.now(), 1_000);
    assert_eq!(resolver.resolve("{A:system.cpu.load.last()}", &[], &source), "20.5 %");
    assert_eq!(resolver.resolve("{A:system.cpu.load.avg(2m)}", &[], &source), "15.25 %");
    assert_eq!(resolver.resolve("{A:agent.version.last()}", &[], &source), "*UNKNOWN*");
    Ok(())
}

#[test]
fn test_source_from_yaml_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(SOURCE_YAML.as_bytes())?;

    let source = InMemoryItemSource::from_yaml_file(file.path())?;
    let item = source.find_item("A", "system.cpu.load").expect("item is loaded");
    assert_eq!(item.units, "%");
    assert_eq!(source.aggregate(&item, AggregateFunction::Max, 60).as_deref(), Some("20.5 %"));
    Ok(())
}

#[test]
fn test_source_yaml_errors() {
    assert!(matches!(
        InMemoryItemSource::from_yaml_str("now: [1"),
        Err(RuntimeError::YamlError(_))
    ));
    assert!(matches!(
        InMemoryItemSource::from_yaml_file("/nonexistent/items.yaml"),
        Err(RuntimeError::IoError(_))
    ));

    let duplicate = r#"
now: 0
items:
  - { item_id: 1, host: A, key: k, value_type: float }
  - { item_id: 2, host: A, key: k, value_type: float }
"#;
    assert!(matches!(
        InMemoryItemSource::from_yaml_str(duplicate),
        Err(RuntimeError::DuplicateItem { .. })
    ));
}
