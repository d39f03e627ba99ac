#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for histogram binning and chart scene composition.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trueno_charts::binning::{bin_values, BinSpec};
use trueno_charts::prelude::*;

fn sample(size: usize) -> Vec<f64> {
    // Deterministic bell-curve-like values
    (0..size)
        .map(|i| {
            let x = i as f64 / size as f64;
            (x * std::f64::consts::TAU).sin() * 50.0 + 50.0 + (i % 17) as f64
        })
        .collect()
}

fn binning_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("binning");

    for size in [100, 1_000, 10_000, 100_000] {
        let data = sample(size);

        group.bench_with_input(BenchmarkId::new("count", size), &size, |b, _| {
            b.iter(|| bin_values(black_box(&data), &BinSpec::Count(20)).unwrap());
        });

        let bounds: Vec<f64> = (0..=25).map(|i| f64::from(i) * 5.0).collect();
        let spec = BinSpec::Boundaries(bounds);
        group.bench_with_input(BenchmarkId::new("boundaries", size), &size, |b, _| {
            b.iter(|| bin_values(black_box(&data), &spec).unwrap());
        });
    }

    group.finish();
}

fn draw_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw");

    for size in [100, 1_000, 10_000] {
        let data = sample(size);

        group.bench_with_input(BenchmarkId::new("histogram", size), &size, |b, _| {
            let mut chart = HistogramChart::new();
            chart.init(SvgSurface::new(), data.clone());
            chart.set_n_bins(30);
            b.iter(|| {
                chart.draw_histo().unwrap();
            });
        });

        group.bench_with_input(BenchmarkId::new("heatmap_svg", size), &size, |b, _| {
            let mut chart = HeatmapChart::new();
            chart.init(SvgSurface::new(), data.clone());
            chart.set_scale("quantile");
            b.iter(|| {
                chart.draw_heatmap().unwrap();
                black_box(chart.surface().map(SvgSurface::render))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, binning_benchmark, draw_benchmark);
criterion_main!(benches);
