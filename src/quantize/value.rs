//! Quantization of loosely typed JSON event lists, tracks and compositions.
//!
//! Only the named numeric fields get touched. Everything else, including objects and values of
//! unexpected shape, is passed through as is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::quantize::{quantize, quantize_duration, QuantizeMode};

// -------------------------------------------------------------------------------------------------

/// Options for [`quantize_events`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuantizeOptions {
    /// Grid resolution in quarter notes.
    pub grid: f64,
    /// Names of the numeric event fields which get quantized.
    pub fields: Vec<String>,
    pub mode: QuantizeMode,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            grid: 0.25,
            fields: vec!["time".to_string(), "duration".to_string()],
            mode: QuantizeMode::default(),
        }
    }
}

impl QuantizeOptions {
    pub fn new<G: Into<f64>>(grid: G, mode: QuantizeMode) -> Self {
        Self {
            grid: grid.into(),
            mode,
            ..Self::default()
        }
    }

    pub fn with_fields<S: AsRef<str>>(self, fields: &[S]) -> Self {
        Self {
            fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
            ..self
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Convert a quantized float back to a JSON number, keeping integers as integers when the
/// source number was one.
fn to_json_number(value: f64, was_integer: bool) -> Value {
    if was_integer && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::Number(Number::from(value as i64))
    } else {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

fn map_number(value: &Value, op: impl Fn(f64) -> f64) -> Value {
    match value {
        Value::Number(number) => match number.as_f64() {
            Some(float) => to_json_number(op(float), number.is_i64() || number.is_u64()),
            None => value.clone(),
        },
        _ => value.clone(),
    }
}

/// Quantize a single JSON number. Non-numeric values are returned unchanged.
pub fn quantize_json_number<G: Into<f64>>(value: &Value, grid: G, mode: QuantizeMode) -> Value {
    let grid = grid.into();
    map_number(value, |v| quantize(v, grid, mode))
}

fn quantize_duration_number(value: &Value, grid: f64, mode: QuantizeMode) -> Value {
    map_number(value, |v| quantize_duration(v, grid, mode))
}

// -------------------------------------------------------------------------------------------------

/// Quantize the configured numeric fields of all event objects.
///
/// Returns a new list of the same length and order. Non-object events and all other fields are
/// copied unchanged.
pub fn quantize_events(events: &[Value], options: &QuantizeOptions) -> Vec<Value> {
    events
        .iter()
        .map(|event| match event {
            Value::Object(object) => {
                let quantized = object
                    .iter()
                    .map(|(key, value)| {
                        if options.fields.iter().any(|field| field == key) {
                            (
                                key.clone(),
                                quantize_json_number(value, options.grid, options.mode),
                            )
                        } else {
                            (key.clone(), value.clone())
                        }
                    })
                    .collect::<Map<_, _>>();
                Value::Object(quantized)
            }
            _ => event.clone(),
        })
        .collect()
}

fn quantize_note_value(note: &Value, grid: f64, mode: QuantizeMode) -> Value {
    match note {
        Value::Object(object) => {
            let mut quantized = object.clone();
            if let Some(time) = object.get("time") {
                quantized.insert("time".to_string(), quantize_json_number(time, grid, mode));
            }
            if let Some(duration) = object.get("duration") {
                quantized.insert(
                    "duration".to_string(),
                    quantize_duration_number(duration, grid, mode),
                );
            }
            Value::Object(quantized)
        }
        _ => note.clone(),
    }
}

/// Quantize note times and durations of a JSON track object `{ notes: [...] }`.
///
/// Durations never snap below one grid step. Tracks without a notes array are returned unchanged.
pub fn quantize_track_value<G: Into<f64>>(track: &Value, grid: G, mode: QuantizeMode) -> Value {
    let grid = grid.into();
    match track.get("notes") {
        Some(Value::Array(notes)) => {
            let mut quantized = track.clone();
            quantized["notes"] = Value::Array(
                notes
                    .iter()
                    .map(|note| quantize_note_value(note, grid, mode))
                    .collect(),
            );
            quantized
        }
        _ => track.clone(),
    }
}

/// Quantize all tracks of a JSON composition object `{ tracks: [...] }`.
pub fn quantize_composition_value<G: Into<f64>>(
    composition: &Value,
    grid: G,
    mode: QuantizeMode,
) -> Value {
    let grid = grid.into();
    match composition.get("tracks") {
        Some(Value::Array(tracks)) => {
            let mut quantized = composition.clone();
            quantized["tracks"] = Value::Array(
                tracks
                    .iter()
                    .map(|track| quantize_track_value(track, grid, mode))
                    .collect(),
            );
            quantized
        }
        _ => composition.clone(),
    }
}

// --------------------------------------------------------------------------------------------------
