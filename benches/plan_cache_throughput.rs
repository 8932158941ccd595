/// Benchmark for validation plan cache performance
///
/// Compares compiling validation plans from scratch against fetching them
/// from the per-schema plan cache, then measures plan execution throughput
/// on a realistic value tree.

use formlite::{FieldDefinition, FormEnvironment, Schema, TypeDefinition, TypeRef};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Instant;

const TYPE_COUNT: usize = 40;

/// A chain of input types: each one has a few scalars, a nested object of the
/// next type and a list of the next type
fn build_schema() -> Schema {
    let mut types = vec![
        TypeDefinition::scalar("String"),
        TypeDefinition::scalar("Int"),
        TypeDefinition::scalar("Boolean"),
        TypeDefinition::scalar("Currency"),
        TypeDefinition::scalar("Date"),
    ];
    for i in 0..TYPE_COUNT {
        let mut fields = vec![
            FieldDefinition::new("name", TypeRef::non_null(TypeRef::scalar("String"))),
            FieldDefinition::new("count", TypeRef::non_null(TypeRef::scalar("Int"))),
            FieldDefinition::new("enabled", TypeRef::non_null(TypeRef::scalar("Boolean"))),
            FieldDefinition::new("amount", TypeRef::scalar("Currency")),
            FieldDefinition::new("since", TypeRef::scalar("Date")),
            FieldDefinition::new("scores", TypeRef::list(TypeRef::scalar("Int"))),
        ];
        if i + 1 < TYPE_COUNT {
            let next = format!("Level{}Input", i + 1);
            fields.push(FieldDefinition::new("child", TypeRef::input_object(next.clone())));
            fields.push(FieldDefinition::new(
                "items",
                TypeRef::list(TypeRef::non_null(TypeRef::input_object(next))),
            ));
        }
        types.push(TypeDefinition::input_object(format!("Level{}Input", i), fields));
    }
    Schema::new(types)
}

fn build_values(depth: usize) -> Value {
    let mut map = Map::new();
    map.insert("name".into(), json!(format!("level {}", depth)));
    map.insert("count".into(), json!(if depth % 3 == 0 { "x" } else { "12" }));
    map.insert("enabled".into(), json!("true"));
    map.insert("amount".into(), json!("1,234.5"));
    map.insert("since".into(), json!("2024-03-05"));
    map.insert("scores".into(), json!(["1", "2", "three"]));
    if depth < 6 {
        map.insert("child".into(), build_values(depth + 1));
        map.insert("items".into(), json!([build_values(depth + 1), {"name": ""}]));
    }
    Value::Object(map)
}

fn main() {
    println!("=== Validation Plan Cache Throughput Benchmark ===\n");

    let env = FormEnvironment::default();
    let input_schema = env.input_schema(Arc::new(build_schema()));
    println!("📋 Setup: {} chained input types\n", TYPE_COUNT);

    // Benchmark: cold compilation (cache cleared every time)
    println!("📊 Benchmark: Cold plan compilation");
    let iterations = 200;
    let cold_start = Instant::now();
    for _ in 0..iterations {
        input_schema.clear_plan_cache();
        input_schema
            .validation_plan("Level0Input")
            .expect("plan compiles");
    }
    let cold_duration = cold_start.elapsed();
    println!("  Iterations: {}", iterations);
    println!("  Time: {:?}", cold_duration);
    println!(
        "  Throughput: {:.0} compilations/sec",
        iterations as f64 / cold_duration.as_secs_f64()
    );
    println!();

    // Benchmark: cached lookups
    println!("📊 Benchmark: Cached plan lookup");
    let lookups = 100_000;
    let warm_start = Instant::now();
    for _ in 0..lookups {
        let _plan = input_schema.validation_plan("Level0Input");
    }
    let warm_duration = warm_start.elapsed();
    println!("  Iterations: {}", lookups);
    println!("  Time: {:?}", warm_duration);
    println!(
        "  Throughput: {:.0} lookups/sec",
        lookups as f64 / warm_duration.as_secs_f64()
    );
    println!();

    // Benchmark: plan execution
    println!("📊 Benchmark: Plan execution on a nested value tree");
    let values = build_values(0);
    let runs = 2_000;
    let exec_start = Instant::now();
    let mut failures = 0;
    for _ in 0..runs {
        if let Ok(Some(errors)) = input_schema.validate("Level0Input", &values) {
            failures += errors.len();
        }
    }
    let exec_duration = exec_start.elapsed();
    println!("  Iterations: {}", runs);
    println!("  Time: {:?}", exec_duration);
    println!(
        "  Throughput: {:.0} validations/sec",
        runs as f64 / exec_duration.as_secs_f64()
    );
    println!("  Top level errors per run: {}", failures / runs);
    println!();

    let stats = input_schema.plan_cache_stats();
    println!("📈 Cache statistics");
    println!("  Hits: {}", stats.hits);
    println!("  Misses: {}", stats.misses);
    println!("  Compilations: {}", stats.compilations);
    println!("  Cached plans: {}", stats.current_entries);
    println!("  Hit rate: {:.1}%", stats.hit_rate() * 100.0);

    let speedup = (cold_duration.as_secs_f64() / iterations as f64)
        / (warm_duration.as_secs_f64() / lookups as f64);
    println!("\n✅ Cached lookup is {:.0}x faster than compiling", speedup);
}
