//! Criterion benchmarks for [`brotli_decoder::decode`].
//!
//! Run with:
//!   cargo bench --bench decode

use brotli_decoder::decode;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

mod corpus {
    include!("corpus.rs");
}

fn bench_uncompressed_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("uncompressed_copy");

    for &size in &[4_096usize, 65_536, 1_048_576] {
        let stream = corpus::uncompressed_stream(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("decode", size), &stream, |b, stream| {
            b.iter(|| decode(stream, None))
        });
    }

    group.finish();
}

fn bench_run_extension_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_extension_copy");

    for &repeats in &[1_000u32, 100_000] {
        let stream = corpus::repeated_run_extension_stream(repeats);
        let output_bytes = 6 * repeats as u64;
        group.throughput(Throughput::Bytes(output_bytes));
        group.bench_with_input(
            BenchmarkId::new("decode", repeats),
            &stream,
            |b, stream| b.iter(|| decode(stream, None)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_uncompressed_copy, bench_run_extension_copy);
criterion_main!(benches);
