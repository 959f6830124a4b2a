//! Graph label macro resolution example
//!
//! This example demonstrates:
//! - Loading item history into the in-memory data source
//! - Resolving positional host macros
//! - Resolving functional item macros with a configured replacement

use trigex_sdk::{EngineBuilder, InMemoryItemSource, ItemRef};
use tracing_subscriber::EnvFilter;

const ITEMS: &str = r#"
now: 1700000600
items:
  - item_id: 10
    host: web-1
    key: system.cpu.load[all,avg1]
    value_type: float
    history:
      - { clock: 1700000300, value: "0.75" }
      - { clock: 1700000600, value: "1.25" }
  - item_id: 11
    host: web-1
    key: net.if.in[eth0]
    value_type: unsigned
    units: bps
    history:
      - { clock: 1700000540, value: "5000" }
      - { clock: 1700000600, value: "7000" }
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Graph Labels Example ===\n");

    let engine = EngineBuilder::new().unresolved_macro("n/a").build()?;
    let source = InMemoryItemSource::from_yaml_str(ITEMS)?;
    let items = vec![ItemRef::new("web-1"), ItemRef::new("web-2")];

    for label in [
        "CPU of {HOST.HOST}: {{HOST.HOST}:system.cpu.load[all,avg1].last()}",
        "Average load (10m): {web-1:system.cpu.load[all,avg1].avg(10m)}",
        "Peak traffic: {{HOSTNAME1}:net.if.in[eth0].max(1h)}",
        "Second host {HOST.HOST2}, third host {HOST.HOST3}",
        "Traffic on {HOST.HOST2}: {{HOST.HOST2}:net.if.in[eth0].last()}",
    ] {
        println!("{label}\n  => {}", engine.resolve_macros(label, &items, &source)?);
    }

    Ok(())
}
