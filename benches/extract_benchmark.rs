use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use lazysplit::column::StringColumn;
use lazysplit::datagen::synthetic_log_column;
use lazysplit::extract::{ExtractConfig, extract, extract_split_baseline};

fn log_config(field_index: usize) -> ExtractConfig {
    ExtractConfig {
        delimiter: b'_',
        field_index,
        max_len: 10,
    }
}

fn bench_lazy_vs_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_field2");
    for rows in [100_000, 1_000_000, 5_000_000] {
        let col = synthetic_log_column(rows, 42).unwrap();
        let cfg = log_config(2);
        group.bench_with_input(BenchmarkId::new("lazy", rows), &col, |b, col| {
            b.iter(|| extract(black_box(col), &cfg))
        });
        group.bench_with_input(BenchmarkId::new("split_baseline", rows), &col, |b, col| {
            b.iter(|| extract_split_baseline(black_box(col), &cfg))
        });
    }
    group.finish();
}

fn bench_field_position(c: &mut Criterion) {
    // Early exit means earlier fields cost less; measure the spread.
    let mut group = c.benchmark_group("field_position");
    let col = synthetic_log_column(1_000_000, 42).unwrap();
    for field_index in [0, 1, 2, 3] {
        let cfg = log_config(field_index);
        group.bench_with_input(
            BenchmarkId::new("lazy", field_index),
            &col,
            |b, col| b.iter(|| extract(black_box(col), &cfg)),
        );
    }
    group.finish();
}

fn bench_wide_rows(c: &mut Criterion) {
    // Long rows with many segments: the case where eager splitting hurts most.
    let row = "seg0,seg1,seg2,seg3,seg4,seg5,seg6,seg7,seg8,seg9,seg10,seg11";
    let col = StringColumn::from_rows(std::iter::repeat_n(row, 500_000)).unwrap();
    let cfg = ExtractConfig {
        delimiter: b',',
        field_index: 1,
        max_len: 10,
    };
    let mut group = c.benchmark_group("wide_rows");
    group.bench_function("lazy", |b| b.iter(|| extract(black_box(&col), &cfg)));
    group.bench_function("split_baseline", |b| {
        b.iter(|| extract_split_baseline(black_box(&col), &cfg))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_lazy_vs_split,
    bench_field_position,
    bench_wide_rows,
);
criterion_main!(benches);
