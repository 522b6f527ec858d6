// this_file: benches/resolve.rs

//! Single paragraph analysis benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ubidi::{BidiConfig, BidiUnit, Paragraph, ReorderingMode, WriteOptions};

fn bench_simple_latin(c: &mut Criterion) {
    let text = "The quick brown fox jumps over the lazy dog";

    c.bench_function("simple_latin_resolve", |b| {
        b.iter(|| {
            let paragraph = Paragraph::new(black_box(text), BidiConfig::new()).unwrap();
            black_box(paragraph.count_runs());
        });
    });
}

fn bench_mixed_direction(c: &mut Criterion) {
    let text = "The title is \u{5de}\u{5d6}\u{5dc} \u{5d8}\u{5d5}\u{5d1} (2024) in \u{645}\u{631}\u{62d}\u{628}\u{627} 1.5%";

    c.bench_function("mixed_direction_resolve", |b| {
        b.iter(|| {
            let paragraph = Paragraph::new(black_box(text), BidiConfig::new()).unwrap();
            black_box(paragraph.visual_map().len());
        });
    });

    let paragraph = Paragraph::new(text, BidiConfig::new()).unwrap();
    c.bench_function("mixed_direction_write", |b| {
        b.iter(|| {
            black_box(paragraph.write_reordered(black_box(
                WriteOptions::DO_MIRRORING | WriteOptions::INSERT_LRM_FOR_NUMERIC,
            )))
        });
    });
}

fn bench_text_lengths(c: &mut Criterion) {
    let unit = "abc \u{5d0}\u{5d1}\u{5d2} 123 (\u{5d3}\u{5d4}) ";
    let mut group = c.benchmark_group("text_lengths");

    for repeat in [1, 10, 100, 1000] {
        let text = unit.repeat(repeat);
        group.throughput(Throughput::Elements(text.encode_utf16().count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeat), &text, |b, text| {
            b.iter(|| {
                let paragraph = Paragraph::new(black_box(text), BidiConfig::new()).unwrap();
                black_box(paragraph.write_reordered(WriteOptions::empty()))
            });
        });
    }
    group.finish();
}

fn bench_reordering_modes(c: &mut Criterion) {
    let text = "\u{5d0}\u{5d1}\u{5d2} 123 abc 45 \u{5d3}\u{5d4}";
    let mut group = c.benchmark_group("reordering_modes");

    for mode in ReorderingMode::ALL {
        let config = BidiConfig::new().with_reordering_mode(mode);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{mode:?}")), &config, |b, config| {
            b.iter(|| {
                let paragraph = Paragraph::new(black_box(text), config.clone()).unwrap();
                black_box(paragraph.write_reordered(WriteOptions::empty()))
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_simple_latin,
    bench_mixed_direction,
    bench_text_lengths,
    bench_reordering_modes
);
criterion_main!(benches);
