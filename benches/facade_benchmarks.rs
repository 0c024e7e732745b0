//! Criterion benchmarks for rust_log_facade

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_log_facade::backends::MemoryBackend;
use rust_log_facade::prelude::*;
use rust_log_facade::{render, set_backend, take_backend, trim_source_path};

const CORE: Category = Category::new("Core");

// ============================================================================
// Source Path Benchmarks
// ============================================================================

fn bench_trim_source_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("trim_source_path");
    group.throughput(Throughput::Elements(1));

    group.bench_function("with_marker", |b| {
        b.iter(|| trim_source_path(black_box("/home/user/project/src/common/logging/log.rs")));
    });

    group.bench_function("without_marker", |b| {
        b.iter(|| trim_source_path(black_box("common/logging/log.rs")));
    });

    group.finish();
}

// ============================================================================
// Rendering Benchmarks
// ============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Elements(1));

    group.bench_function("literal", |b| {
        b.iter(|| render(black_box("Simple log message"), &ArgumentList::empty()));
    });

    group.bench_function("positional", |b| {
        b.iter(|| {
            let workers = black_box(4);
            let name = black_box("scheduler");
            render(
                "started {} with {} workers",
                &ArgumentList::new(&[
                    NamedArgument::positional(&name),
                    NamedArgument::positional(&workers),
                ]),
            )
        });
    });

    group.bench_function("specs", |b| {
        b.iter(|| {
            let address = black_box(0x0800_0000u32);
            let ratio = black_box(0.7315f64);
            render(
                "pc={:#010x} ratio={:>8.3} mode={mode:<6}|",
                &ArgumentList::new(&[
                    NamedArgument::positional(&address),
                    NamedArgument::positional(&ratio),
                    NamedArgument::named("mode", &"arm"),
                ]),
            )
        });
    });

    group.finish();
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    take_backend();
    group.bench_function("no_backend", |b| {
        b.iter(|| info!(CORE, "Counter value: {}", black_box(10)));
    });

    set_backend(MemoryBackend::with_capacity(1024));
    group.bench_function("memory_backend", |b| {
        b.iter(|| info!(CORE, "Counter value: {}", black_box(10)));
    });

    group.bench_function("trace", |b| {
        b.iter(|| trace!(CORE, "Counter value: {}", black_box(10)));
    });
    take_backend();

    group.finish();
}

criterion_group!(benches, bench_trim_source_path, bench_render, bench_dispatch);
criterion_main!(benches);
