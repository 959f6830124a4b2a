//! Item key and function parsing example
//!
//! This example demonstrates:
//! - Splitting item keys into identifier and parameters
//! - Recognising function calls inside larger text
//! - Validating function calls against the catalog

use trigex_sdk::{EngineBuilder, ParseOutcome, ValueType};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Item Keys Example ===\n");

    let engine = EngineBuilder::new().build()?;

    for key in [
        "system.cpu.load",
        "vfs.fs.size[/,free]",
        "log[/var/log/syslog,\"error: \\\"disk\\\"\",,,skip]",
        "net.if.discovery[[eth0,eth1],in]",
        "key[\"a\"]654",
    ] {
        match engine.parse_key(key) {
            Ok(parsed) => {
                println!("{key}");
                println!("  id: {}", parsed.key_id);
                for n in 0..parsed.param_count() {
                    println!("  param {}: {:?}", n, parsed.param(n).unwrap_or_default());
                }
            }
            Err(err) => println!("{key}\n  rejected: {err}"),
        }
    }

    println!("\nFunction calls:");
    let text = "{web:system.cpu.load.avg(5m)}>2";
    match engine.parse_function(text, 21)? {
        ParseOutcome::SuccessContinues(function) | ParseOutcome::Success(function) => {
            println!("  found {} with {} parameter(s)", function.matched, function.params_num());
        }
        ParseOutcome::Fail => println!("  no function call"),
    }

    for (call, value_type) in [
        ("avg(5m)", ValueType::Float),
        ("count(#10,error,like)", ValueType::Log),
        ("nodata(0)", ValueType::Unsigned),
        ("logseverity()", ValueType::Float),
    ] {
        match engine.validate_function(call, value_type) {
            Ok(_) => println!("  {call} on {value_type}: ok"),
            Err(err) => println!("  {call} on {value_type}: {err}"),
        }
    }

    Ok(())
}
