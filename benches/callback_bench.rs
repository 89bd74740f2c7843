//! Benchmarks for the callback hot path
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use graphboard::layout::build_layout;
use graphboard::{CallbackRegistry, DataConfig, SampleData, SliderRange};
use serde_json::json;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for days in [365, 3650] {
        let config = DataConfig {
            periods: days,
            ..Default::default()
        };

        group.throughput(Throughput::Elements(days as u64));
        group.bench_function(format!("sample_data_{}", days), |b| {
            b.iter(|| SampleData::generate(black_box(&config)))
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let data = SampleData::generate(&DataConfig::default());

    group.bench_function("select_quarter", |b| {
        b.iter(|| {
            data.timeseries
                .select(black_box(SliderRange::new(90, 180)))
                .unwrap()
                .len()
        })
    });

    group.finish();
}

fn bench_callbacks(c: &mut Criterion) {
    let mut group = c.benchmark_group("callbacks");
    let data = SampleData::generate(&DataConfig::default());
    let layout = build_layout(&data);
    let registry = CallbackRegistry::dashboard();

    group.bench_function("slider_change", |b| {
        b.iter(|| {
            registry
                .on_change(&data, &layout, "date-slider1", "value", black_box(json!([30, 300])))
        })
    });

    group.bench_function("initial_outputs", |b| {
        b.iter(|| registry.initial_outputs(&data, &layout))
    });

    group.bench_function("serialize_initial_outputs", |b| {
        let outputs = registry.initial_outputs(&data, &layout);
        b.iter(|| {
            for output in &outputs {
                black_box(serde_json::to_string(&output.figure).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_filter, bench_callbacks);
criterion_main!(benches);
