//! Benchmarks for Savitzky-Golay differentiation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use less_scoring::savgol::SavgolFilter;

/// Deterministic angle-like signal: a damped oscillation around 20 degrees
fn synthetic_signal(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64 / 30.0;
            20.0 + 40.0 * (-0.5 * t).exp() * (6.0 * t).sin()
        })
        .collect()
}

fn bench_derivative_orders(c: &mut Criterion) {
    let filter = SavgolFilter::new(31, 2).unwrap();
    let signal = synthetic_signal(300);
    let dt = 1.0 / 30.0;

    let mut group = c.benchmark_group("savgol_derivative");
    for deriv in [0usize, 1, 2] {
        group.bench_with_input(BenchmarkId::new("order", deriv), &deriv, |b, &deriv| {
            b.iter(|| filter.derivative(black_box(&signal), deriv, dt).unwrap());
        });
    }
    group.finish();
}

fn bench_series_lengths(c: &mut Criterion) {
    let filter = SavgolFilter::new(31, 2).unwrap();
    let dt = 1.0 / 30.0;

    let mut group = c.benchmark_group("savgol_series_length");
    for len in [60usize, 300, 1800] {
        let signal = synthetic_signal(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &signal, |b, signal| {
            b.iter(|| filter.derivative(black_box(signal), 1, dt).unwrap());
        });
    }
    group.finish();
}

fn bench_window_lengths(c: &mut Criterion) {
    let signal = synthetic_signal(300);
    let dt = 1.0 / 30.0;

    let mut group = c.benchmark_group("savgol_window_length");
    for window in [11usize, 31, 61] {
        let filter = SavgolFilter::new(window, 2).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(window), &filter, |b, filter| {
            b.iter(|| filter.derivative(black_box(&signal), 1, dt).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_derivative_orders,
    bench_series_lengths,
    bench_window_lengths
);
criterion_main!(benches);
