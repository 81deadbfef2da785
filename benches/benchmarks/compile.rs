use std::hint::black_box;

use criterion::{criterion_group, Criterion};
use serde_json::{json, Value};

use articulate::prelude::*;

// ---------------------------------------------------------------------------------------------

fn create_track(num_notes: usize) -> Track {
    let glissando = ArticulationDescriptor::new("glissando").with_parameter("target", 72);
    let notes = (0..num_notes)
        .map(|index| {
            let pitch = 48 + (index % 24) as u8;
            let note = Note::new(pitch, index as f64 * 0.5, 0.5);
            match index % 5 {
                0 => note.with_articulations("staccato"),
                1 => note.with_articulations(vec![">", "-"]),
                2 => note.with_articulations(glissando.clone()),
                3 => note.with_articulations(vec!["marcato", "slur"]),
                _ => note,
            }
        })
        .collect();
    Track::new(notes)
}

fn create_track_value(num_notes: usize) -> Value {
    let notes = (0..num_notes)
        .map(|index| {
            let articulations = if index % 2 == 0 {
                json!(["stacc", "acc"])
            } else {
                json!("ten")
            };
            json!({
                "pitch": 60 + (index % 12),
                "time": index,
                "duration": 1,
                "articulations": articulations
            })
        })
        .collect::<Vec<_>>();
    json!({ "notes": notes })
}

// ---------------------------------------------------------------------------------------------

pub fn compile_track(c: &mut Criterion) {
    let mut group = c.benchmark_group("Compile");
    let compiler = PerformanceCompiler::default();
    let context = PerformanceContext::default();
    let track = create_track(1000);
    group.bench_function("Track", |b| {
        b.iter(|| black_box(compiler.compile(&track, &context)))
    });
    group.finish();
}

pub fn compile_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("Compile");
    let context = PerformanceContext::default();
    let track = create_track_value(1000);
    group.bench_function("Json", |b| {
        b.iter(|| black_box(compile_events(&track, &context)))
    });
    group.finish();
}

// ---------------------------------------------------------------------------------------------

criterion_group! {
    name = compile;
    config = Criterion::default();
    targets = compile_track, compile_value
}
