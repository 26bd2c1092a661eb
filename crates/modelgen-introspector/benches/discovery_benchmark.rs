//! Benchmarks for model graph discovery
//!
//! These benchmarks measure discovery over a synthetic, densely cyclic
//! model graph of increasing size.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use modelgen_introspector::{Discovery, ModuleDocument, ModuleLoader, find_controllers};
use serde_json::json;
use std::hint::black_box;

/// Builds a module where model `i` references models `i + 1` and `i / 2`,
/// and a controller returning model 0.
fn create_module(model_count: usize) -> ModuleDocument {
    let mut types: Vec<serde_json::Value> = (0..model_count)
        .map(|i| {
            json!({
                "name": format!("Model{i}"),
                "namespace": "Bench",
                "properties": [
                    { "name": "Next", "type": format!("Bench.Model{}", (i + 1) % model_count) },
                    { "name": "Parent", "type": format!("List<Bench.Model{}>", i / 2) },
                    { "name": "Value", "type": "int" }
                ]
            })
        })
        .collect();
    types.push(json!({
        "name": "BenchController",
        "namespace": "Bench",
        "base": "ApiController",
        "methods": [ { "name": "GetRoot", "returns": "Bench.Model0" } ]
    }));

    serde_json::from_value(json!({ "module": "Bench", "types": types })).unwrap()
}

/// Benchmarks discovery
fn bench_discovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("discovery");

    for model_count in [10, 100, 1000].iter() {
        let mut loader = ModuleLoader::new();
        loader
            .add_document("Bench", create_module(*model_count))
            .unwrap();
        let registry = loader.load().registry;
        let controllers = find_controllers(&registry, &["ApiController".to_string()]);

        group.throughput(Throughput::Elements(*model_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(model_count),
            &registry,
            |b, registry| {
                b.iter(|| {
                    let models = Discovery::new(black_box(registry))
                        .discover(controllers.iter().flat_map(|c| &c.operations));
                    assert_eq!(models.len(), *model_count);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_discovery);
criterion_main!(benches);
