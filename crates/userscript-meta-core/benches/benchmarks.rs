//! Benchmarks for userscript-meta-core
//!
//! Run with: cargo bench -p userscript-meta-core --features generate
//!
//! Filter benchmarks:
//!   cargo bench -- "read"
//!   cargo bench -- "write"

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use userscript_meta_core::parse::{extract_block, parse_block};
use userscript_meta_core::{
    Options, read_and_validate, stringify, validate, validate_and_stringify,
};

use fixtures::{metadata, scripts};

/// Benchmark each stage of the read path
fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    let options = Options::default();

    for (name, script) in scripts() {
        group.throughput(Throughput::Bytes(script.len() as u64));

        group.bench_with_input(BenchmarkId::new("extract", name), script, |b, input| {
            b.iter(|| extract_block(std::hint::black_box(input)))
        });

        let block = extract_block(script).expect("generated script has a block");
        group.bench_with_input(BenchmarkId::new("parse", name), &block, |b, input| {
            b.iter(|| parse_block(std::hint::black_box(input)))
        });

        group.bench_with_input(
            BenchmarkId::new("read_and_validate", name),
            script,
            |b, input| b.iter(|| read_and_validate(std::hint::black_box(input), &options)),
        );
    }
    group.finish();
}

/// Benchmark validation and stringification
fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    let options = Options::default();

    for (name, metadata) in metadata() {
        group.bench_with_input(BenchmarkId::new("validate", name), metadata, |b, input| {
            b.iter(|| validate(std::hint::black_box(input.clone()), &options))
        });

        group.bench_with_input(BenchmarkId::new("stringify", name), metadata, |b, input| {
            b.iter(|| stringify(std::hint::black_box(input), &options))
        });

        group.bench_with_input(
            BenchmarkId::new("validate_and_stringify", name),
            metadata,
            |b, input| b.iter(|| validate_and_stringify(std::hint::black_box(input), &options)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_read, bench_write);
criterion_main!(benches);
