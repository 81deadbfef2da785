//! ABC notation note length encoding.

use crate::quantize::{grid::to_rational, quantize_duration, QuantizeMode};

// -------------------------------------------------------------------------------------------------

/// Encode a duration in quarter notes as ABC note length suffix, for a header unit note length of
/// one quarter note (`L:1/4`).
///
/// The duration gets snapped to `grid` first. One quarter then encodes as empty string, whole
/// multiples as plain numbers (`"2"`) and fractions as reduced ratios (`"1/2"`, `"3/4"`).
/// Non-positive or non-finite durations encode as empty string too.
pub fn encode_abc_duration<G: Into<f64>>(duration_quarters: f64, grid: G) -> String {
    if !duration_quarters.is_finite() || duration_quarters <= 0.0 {
        return String::new();
    }
    let duration = quantize_duration(duration_quarters, grid, QuantizeMode::Nearest);
    let Some(quarters) = to_rational(duration) else {
        return String::new();
    };
    if *quarters.numer() <= 0 {
        String::new()
    } else if quarters.is_integer() {
        if *quarters.numer() == 1 {
            String::new()
        } else {
            quarters.numer().to_string()
        }
    } else {
        format!("{}/{}", quarters.numer(), quarters.denom())
    }
}

// --------------------------------------------------------------------------------------------------
