//! Benchmarks for destination sync.
//!
//! Measures the first sync of a fresh tree and the no-op resync that a
//! regeneration with unchanged input performs.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use modelgen_files::{FileSystem, FilesBuilder};
use std::hint::black_box;
use tempfile::TempDir;

fn create_tree(file_count: usize) -> FileSystem {
    (0..file_count)
        .fold(FilesBuilder::new(), |builder, i| {
            builder.add_file(
                format!("Model{i}.ts"),
                format!("export class Model{i} {{\n\tpublic Id: number;\n}}\n"),
            )
        })
        .build()
        .unwrap()
}

fn bench_resync(c: &mut Criterion) {
    let mut group = c.benchmark_group("resync_unchanged");

    for file_count in [10, 100, 1000].iter() {
        let files = create_tree(*file_count);
        let temp = TempDir::new().unwrap();
        files.sync_to(temp.path()).unwrap();

        group.throughput(Throughput::Elements(*file_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(file_count), &files, |b, files| {
            b.iter(|| {
                let report = files.sync_to(black_box(temp.path())).unwrap();
                assert!(!report.has_changes());
            });
        });
    }

    group.finish();
}

fn bench_first_sync(c: &mut Criterion) {
    let files = create_tree(100);

    c.bench_function("first_sync_100", |b| {
        b.iter_with_setup(
            || TempDir::new().unwrap(),
            |temp| files.sync_to(black_box(temp.path())).unwrap(),
        );
    });
}

criterion_group!(benches, bench_resync, bench_first_sync);
criterion_main!(benches);
