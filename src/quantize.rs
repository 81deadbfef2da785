//! Grid quantization of note times and durations.
//!
//! All functions are pure: they never modify their inputs and return new values.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::note::{Composition, Note, Track};

// -------------------------------------------------------------------------------------------------

pub mod abc;
pub mod grid;
pub mod value;

pub use abc::encode_abc_duration;
pub use grid::Grid;
pub use value::{
    quantize_composition_value, quantize_events, quantize_json_number, quantize_track_value,
    QuantizeOptions,
};

// -------------------------------------------------------------------------------------------------

/// Max distance, in grid steps, at which values count as lying on the grid already.
const GRID_EPSILON: f64 = 1e-9;

// -------------------------------------------------------------------------------------------------

/// Rounding direction of a quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantizeMode {
    #[default]
    Nearest,
    Floor,
    Ceil,
}

impl TryFrom<&str> for QuantizeMode {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "round" => Ok(QuantizeMode::Nearest),
            "floor" | "down" => Ok(QuantizeMode::Floor),
            "ceil" | "up" => Ok(QuantizeMode::Ceil),
            _ => Err(format!("invalid quantize mode '{}'", s)),
        }
    }
}

impl Display for QuantizeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuantizeMode::Nearest => f.write_str("nearest"),
            QuantizeMode::Floor => f.write_str("floor"),
            QuantizeMode::Ceil => f.write_str("ceil"),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Snap `value` to a multiple of `grid`.
///
/// Non-finite values, and values quantized with a non-positive or non-finite grid, are returned
/// unchanged.
pub fn quantize<G: Into<f64>>(value: f64, grid: G, mode: QuantizeMode) -> f64 {
    let grid = grid.into();
    if !value.is_finite() || !grid.is_finite() || grid <= 0.0 {
        return value;
    }
    let steps = value / grid;
    if !steps.is_finite() {
        return value;
    }
    let nearest = steps.round();
    let steps = if (steps - nearest).abs() < GRID_EPSILON {
        nearest
    } else {
        match mode {
            QuantizeMode::Nearest => nearest,
            QuantizeMode::Floor => steps.floor(),
            QuantizeMode::Ceil => steps.ceil(),
        }
    };
    // avoid -0.0 results
    (steps * grid) + 0.0
}

/// Snap a duration to a multiple of `grid`, keeping it at least one grid step long.
pub fn quantize_duration<G: Into<f64>>(duration: f64, grid: G, mode: QuantizeMode) -> f64 {
    let grid = grid.into();
    let quantized = quantize(duration, grid, mode);
    if quantized.is_finite() && grid.is_finite() && grid > 0.0 && quantized <= 0.0 {
        grid
    } else {
        quantized
    }
}

/// Return a copy of the note with quantized time and duration.
pub fn quantize_note<G: Into<f64>>(note: &Note, grid: G, mode: QuantizeMode) -> Note {
    let grid = grid.into();
    Note {
        time: quantize(note.time, grid, mode),
        duration: quantize_duration(note.duration, grid, mode),
        ..note.clone()
    }
}

/// Return a copy of the track with quantized note times and durations.
pub fn quantize_track<G: Into<f64>>(track: &Track, grid: G, mode: QuantizeMode) -> Track {
    let grid = grid.into();
    Track {
        notes: track
            .notes
            .iter()
            .map(|note| quantize_note(note, grid, mode))
            .collect(),
        extra: track.extra.clone(),
    }
}

/// Return a copy of the composition with all tracks quantized.
pub fn quantize_composition<G: Into<f64>>(
    composition: &Composition,
    grid: G,
    mode: QuantizeMode,
) -> Composition {
    let grid = grid.into();
    Composition {
        tracks: composition
            .tracks
            .iter()
            .map(|track| quantize_track(track, grid, mode))
            .collect(),
        extra: composition.extra.clone(),
    }
}

// --------------------------------------------------------------------------------------------------
