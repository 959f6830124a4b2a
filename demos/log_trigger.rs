//! Log trigger expression example
//!
//! This example demonstrates:
//! - Building a trigger expression from operator-entered parts
//! - Splitting the expression back into parts
//! - Function validation for log items

use trigex_sdk::{EngineBuilder, ExpressionPart, PartType};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Log Trigger Example ===\n");

    let engine = EngineBuilder::new().build()?;

    let host = "Zabbix server";
    let key = "log[/var/log/syslog]";
    let parts = vec![
        ExpressionPart::matching("regexp(error) and not iregexp(debug)"),
        ExpressionPart::not_matching("(str(heartbeat))>0"),
    ];

    println!("Parts:");
    for part in &parts {
        println!("  {:?} {}", part.part_type, part.value);
    }

    let expression = engine.build_expression(host, key, &parts)?;
    println!("\nExpression:\n  {expression}\n");

    println!("Split back:");
    for part in engine.split_expression(&expression)? {
        let polarity = match part.part_type {
            PartType::Match => "match",
            PartType::NoMatch => "no match",
        };
        println!("  [{polarity}] {}", part.value);
    }

    println!("\nRejected parts:");
    for value in ["regexp()", "avg(5m)", "regexp(a) and", "grep(x)"] {
        if let Err(err) = engine.build_expression(host, key, &[ExpressionPart::matching(value)]) {
            println!("  {value}: {err}");
        }
    }

    Ok(())
}
