use std::hint::black_box;

use criterion::{criterion_group, Criterion};
use serde_json::{json, Value};

use articulate::prelude::*;

// ---------------------------------------------------------------------------------------------

fn create_events(num_events: usize) -> Vec<Value> {
    (0..num_events)
        .map(|index| {
            json!({
                "time": index as f64 * 0.37,
                "duration": 0.29,
                "velocity": 0.8,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------------------------

pub fn quantize_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quantize");
    let values = (0..1000).map(|i| i as f64 * 0.173).collect::<Vec<_>>();
    group.bench_function("Values", |b| {
        b.iter(|| {
            for value in &values {
                black_box(quantize(*value, Grid::sixteenth_triplet(), QuantizeMode::Nearest));
            }
        })
    });
    group.finish();
}

pub fn quantize_json_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quantize");
    let events = create_events(1000);
    let options = QuantizeOptions::default();
    group.bench_function("Events", |b| {
        b.iter(|| black_box(quantize_events(&events, &options)))
    });
    group.finish();
}

pub fn encode_abc(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quantize");
    let durations = (1..1000).map(|i| i as f64 * 0.125).collect::<Vec<_>>();
    group.bench_function("Abc", |b| {
        b.iter(|| {
            for duration in &durations {
                black_box(encode_abc_duration(*duration, Grid::thirty_second()));
            }
        })
    });
    group.finish();
}

// ---------------------------------------------------------------------------------------------

criterion_group! {
    name = quantize;
    config = Criterion::default();
    targets = quantize_values, quantize_json_events, encode_abc
}
