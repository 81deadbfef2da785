use serde_json::json;
use simplelog::*;

use articulate::prelude::*;

fn main() -> anyhow::Result<()> {
    // init logging
    TermLogger::init(
        log::STATIC_MAX_LEVEL,
        ConfigBuilder::default().build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap_or_else(|err| {
        log::error!("init_logger error: {:?}", err);
    });

    // a loosely timed melody, as produced by a notation frontend
    let track = json!({
        "name": "melody",
        "notes": [
            {"pitch": 60, "time": 0.02, "duration": 0.97, "articulations": ["stacc", ">"],
                "dynamics": "mf"},
            {"pitch": 64, "time": 1.01, "duration": 1.02,
                "articulations": [{"type": "glissando", "target": 67}]},
            {"pitch": 67, "time": 2.0, "duration": 0.49, "articulation": "marcato",
                "dynamics": "p"},
            {"pitch": null, "time": 2.5, "duration": 0.5, "articulations": ["gliss"]},
            {"pitch": [60, 64, 67], "time": 3.0, "duration": 1.0,
                "articulations": ["tenuto", "slur", "wobble"]}
        ]
    });

    // snap timing to a sixteenth grid
    let grid = Grid::sixteenth();
    let track = quantize_track_value(&track, grid, QuantizeMode::Nearest);

    // compile articulations into modulations
    let config = PerformanceConfig::default();
    let compiler = PerformanceCompiler::new(config.clone());
    let time_signature = TimeSignature::try_from("4/4").map_err(anyhow::Error::msg)?;
    let context = PerformanceContext::new(96.0, time_signature);
    let performance = compiler.compile_events(&track, &context)?;

    println!("{}", serde_json::to_string_pretty(&performance)?);

    // render a simple performance summary
    let notes: Vec<Note> = serde_json::from_value(track["notes"].clone())?;
    for (index, note) in notes.iter().enumerate() {
        let mut duration = note.duration;
        let mut velocity = note
            .dynamic()
            .map_or(Dynamic::DEFAULT_VELOCITY, |dynamic| dynamic.velocity());
        let mut pitches = note.pitch.as_ref().map(|p| p.pitches()).unwrap_or_default();
        for event in performance.events_for(index) {
            match event {
                ModulationEvent::DurationScale { factor, .. } => duration *= factor,
                ModulationEvent::VelocityBoost { amount_boost, .. } => {
                    velocity = apply_velocity_boost(
                        velocity,
                        *amount_boost,
                        config.coefficients.max_combined_velocity,
                    )
                }
                ModulationEvent::Pitch { .. } => {
                    if let Some(glide) = event.pitch_glide() {
                        pitches = glide.steps(config.min_glide_subdivisions);
                    }
                }
            }
        }
        println!(
            "#{} at {:.2}s: {} len {} (abc '{}') velocity {:.2}",
            index,
            context.quarters_to_seconds(note.time),
            if pitches.is_empty() {
                "rest".to_string()
            } else {
                pitches
                    .iter()
                    .map(|pitch| pitch_name(*pitch))
                    .collect::<Vec<_>>()
                    .join(" ")
            },
            duration,
            encode_abc_duration(duration, grid),
            velocity
        );
    }

    for diagnostic in &performance.diagnostics {
        println!("warning: {}", diagnostic);
    }
    Ok(())
}
