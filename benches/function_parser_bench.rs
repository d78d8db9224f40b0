//! Benchmarks for function parsing, display and curve sampling
//!
//! Run with: cargo bench --bench function_parser_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fresnel::function_display::format_function;
use fresnel::function_parser::parse_function;
use fresnel::signal::SignalParameters;
use fresnel::waveform::WaveformSampler;
use std::f64::consts::PI;

/// Benchmark parsing of typical learner inputs
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_function");

    let inputs = [
        ("minimal", "sin(t)"),
        ("fraction", "4.3*sin(314*t + pi/30)"),
        ("radians", "  -2 * SIN( -5 * T - 0.75 ) "),
        ("invalid", "3*cos(314*t)"),
    ];

    for (name, input) in inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            b.iter(|| parse_function(black_box(input)))
        });
    }

    group.finish();
}

/// Benchmark π-fraction recognition on a hit and a miss
fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_function");

    group.bench_function("pi_fraction", |b| {
        b.iter(|| format_function(black_box(3.0), black_box(314.0), black_box(5.0 * PI / 12.0)))
    });

    group.bench_function("decimal_fallback", |b| {
        b.iter(|| format_function(black_box(3.0), black_box(314.0), black_box(0.3)))
    });

    group.finish();
}

/// Benchmark one curve's worth of samples (601 points)
fn bench_sampling(c: &mut Criterion) {
    let signal = SignalParameters::new(3.0, 314.0, PI / 6.0);
    let sampler = WaveformSampler::for_signal(&signal);

    c.bench_function("sample_curve", |b| b.iter(|| sampler.sample(black_box(&signal))));
}

criterion_group!(benches, bench_parse, bench_format, bench_sampling);
criterion_main!(benches);
