// this_file: benches/batch_reorder.rs

//! Batch analysis performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rayon::prelude::*;
use std::sync::Arc;
use ubidi::{AnalysisCache, BatchAnalyzer, BatchItem, BidiConfig, BidiUnit, Paragraph, WriteOptions};

const MIXED_TEXTS: &[&str] = &[
    "Hello World",
    "\u{645}\u{631}\u{62d}\u{628}\u{627} \u{628}\u{627}\u{644}\u{639}\u{627}\u{644}\u{645}",
    "\u{5e9}\u{5dc}\u{5d5}\u{5dd} \u{5e2}\u{5d5}\u{5dc}\u{5dd}",
    "Version 2.0 \u{5e9}\u{5dc} (\u{5d7}\u{5d3}\u{5e9})",
    "Price: 45.60 \u{631}.\u{633}",
];

fn items(batch_size: usize) -> Vec<BatchItem> {
    (0..batch_size)
        .map(|i| BatchItem::new(MIXED_TEXTS[i % MIXED_TEXTS.len()], BidiConfig::new()))
        .collect()
}

fn bench_batch_sizes(c: &mut Criterion) {
    let analyzer = BatchAnalyzer::default();

    for batch_size in [10, 100, 1000] {
        let mut group = c.benchmark_group("batch_reorder");
        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &batch_size,
            |b, &batch_size| {
                b.iter_batched(
                    || items(batch_size),
                    |items| black_box(analyzer.analyze_batch(items)),
                    criterion::BatchSize::SmallInput,
                );
            },
        );
        group.finish();
    }
}

fn bench_parallel_vs_sequential(c: &mut Criterion) {
    let texts: Vec<String> = (0..100)
        .map(|i| format!("Line {i}: {}", MIXED_TEXTS[i % MIXED_TEXTS.len()]))
        .collect();

    let mut group = c.benchmark_group("parallel_comparison");
    group.throughput(Throughput::Elements(texts.len() as u64));

    group.bench_function("sequential", |b| {
        b.iter(|| {
            for text in &texts {
                if let Ok(paragraph) = Paragraph::new(black_box(text), BidiConfig::new()) {
                    black_box(paragraph.write_reordered(WriteOptions::empty()));
                }
            }
        });
    });

    group.bench_function("parallel", |b| {
        b.iter(|| {
            texts.par_iter().for_each(|text| {
                if let Ok(paragraph) = Paragraph::new(black_box(text), BidiConfig::new()) {
                    black_box(paragraph.write_reordered(WriteOptions::empty()));
                }
            });
        });
    });

    group.finish();
}

fn bench_cache_effectiveness(c: &mut Criterion) {
    let cache = Arc::new(AnalysisCache::new(64));
    let cold = BatchAnalyzer::default();
    let warm = BatchAnalyzer::default().with_cache(cache.clone());

    c.bench_function("cache_cold_batch", |b| {
        b.iter_batched(
            || items(100),
            |items| black_box(cold.analyze_batch(items)),
            criterion::BatchSize::SmallInput,
        );
    });

    warm.analyze_batch(items(MIXED_TEXTS.len()));

    c.bench_function("cache_warm_batch", |b| {
        b.iter_batched(
            || items(100),
            |items| black_box(warm.analyze_batch(items)),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_batch_sizes,
    bench_parallel_vs_sequential,
    bench_cache_effectiveness
);
criterion_main!(benches);
