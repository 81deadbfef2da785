//! Compiled, renderer agnostic modulation events and helpers for the renderers applying them.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{articulation::GlideKind, note::pitch_name, PerformanceConfig};

// -------------------------------------------------------------------------------------------------

/// Effect dimension of a [`ModulationEvent`]. Orders events within a single note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModulationType {
    DurationScale,
    VelocityBoost,
    Pitch,
}

// -------------------------------------------------------------------------------------------------

/// A continuous pitch transition over a note's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PitchGlide {
    pub subtype: GlideKind,
    pub from: u8,
    pub to: u8,
}

impl PitchGlide {
    /// Discretize the glide into at least [`PerformanceConfig::MIN_GLIDE_SUBDIVISIONS`] evenly
    /// spaced pitches, including both end points.
    ///
    /// This is a renderer side helper for targets which can't express continuous glides.
    pub fn steps(&self, subdivisions: usize) -> Vec<u8> {
        let count = subdivisions.max(PerformanceConfig::MIN_GLIDE_SUBDIVISIONS);
        let from = self.from as f64;
        let span = self.to as f64 - from;
        (0..count)
            .map(|step| (from + span * step as f64 / (count - 1) as f64).round() as u8)
            .collect()
    }

    /// Glide distance in semitones. Negative values glide down.
    pub fn interval(&self) -> i32 {
        self.to as i32 - self.from as i32
    }
}

impl Display for PitchGlide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            self.subtype,
            pitch_name(self.from),
            pitch_name(self.to)
        )
    }
}

// -------------------------------------------------------------------------------------------------

/// A single performance effect applied to the note at `index`.
///
/// Serializes as `{"type": "durationScale" | "velocityBoost" | "pitch", "index": n, ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ModulationEvent {
    /// Scales the note's notated duration. `factor` is always > 0.
    DurationScale { index: usize, factor: f64 },
    /// Additive, unclamped velocity boost. `amount_boost` is always >= 0.
    VelocityBoost {
        index: usize,
        #[serde(rename = "amountBoost")]
        amount_boost: f64,
    },
    /// Pitch trajectory from the note's pitch to a target pitch.
    Pitch {
        index: usize,
        subtype: GlideKind,
        from: u8,
        to: u8,
    },
}

impl ModulationEvent {
    pub fn new_pitch(index: usize, glide: PitchGlide) -> Self {
        ModulationEvent::Pitch {
            index,
            subtype: glide.subtype,
            from: glide.from,
            to: glide.to,
        }
    }

    /// Index of the note in the compiled track.
    pub fn index(&self) -> usize {
        match self {
            ModulationEvent::DurationScale { index, .. }
            | ModulationEvent::VelocityBoost { index, .. }
            | ModulationEvent::Pitch { index, .. } => *index,
        }
    }

    pub fn modulation_type(&self) -> ModulationType {
        match self {
            ModulationEvent::DurationScale { .. } => ModulationType::DurationScale,
            ModulationEvent::VelocityBoost { .. } => ModulationType::VelocityBoost,
            ModulationEvent::Pitch { .. } => ModulationType::Pitch,
        }
    }

    /// The pitch glide of pitch events.
    pub fn pitch_glide(&self) -> Option<PitchGlide> {
        match *self {
            ModulationEvent::Pitch {
                subtype, from, to, ..
            } => Some(PitchGlide { subtype, from, to }),
            _ => None,
        }
    }
}

impl Display for ModulationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModulationEvent::DurationScale { index, factor } => {
                write!(f, "#{} duration x{:.3}", index, factor)
            }
            ModulationEvent::VelocityBoost {
                index,
                amount_boost,
            } => write!(f, "#{} velocity +{:.3}", index, amount_boost),
            ModulationEvent::Pitch { index, .. } => match self.pitch_glide() {
                Some(glide) => write!(f, "#{} {}", index, glide),
                None => write!(f, "#{}", index),
            },
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Apply a combined velocity boost to a concrete base velocity in range `[0..1]`.
///
/// The boost is relative to the base velocity. The result is clamped to `[0..ceiling]`, which
/// usually is the coefficient table's `max_combined_velocity`.
pub fn apply_velocity_boost(base_velocity: f64, amount_boost: f64, ceiling: f64) -> f64 {
    (base_velocity * (1.0 + amount_boost)).clamp(0.0, ceiling.max(0.0))
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn event_serialization() -> Result<(), String> {
        let events = vec![
            ModulationEvent::DurationScale {
                index: 0,
                factor: 0.5,
            },
            ModulationEvent::VelocityBoost {
                index: 0,
                amount_boost: 1.0,
            },
            ModulationEvent::new_pitch(
                1,
                PitchGlide {
                    subtype: GlideKind::Glissando,
                    from: 64,
                    to: 67,
                },
            ),
        ];
        let value = serde_json::to_value(&events).map_err(|e| e.to_string())?;
        assert_eq!(
            value,
            json!([
                {"type": "durationScale", "index": 0, "factor": 0.5},
                {"type": "velocityBoost", "index": 0, "amountBoost": 1.0},
                {"type": "pitch", "index": 1, "subtype": "glissando", "from": 64, "to": 67}
            ])
        );
        let parsed: Vec<ModulationEvent> =
            serde_json::from_value(value).map_err(|e| e.to_string())?;
        assert_eq!(parsed, events);
        Ok(())
    }

    #[test]
    fn event_accessors() {
        let event = ModulationEvent::VelocityBoost {
            index: 7,
            amount_boost: 0.3,
        };
        assert_eq!(event.index(), 7);
        assert_eq!(event.modulation_type(), ModulationType::VelocityBoost);
        assert_eq!(event.pitch_glide(), None);
        assert_eq!(event.to_string(), "#7 velocity +0.300");
        assert!(ModulationType::DurationScale < ModulationType::VelocityBoost);
        assert!(ModulationType::VelocityBoost < ModulationType::Pitch);
    }

    #[test]
    fn glide_steps() {
        let up = PitchGlide {
            subtype: GlideKind::Glissando,
            from: 60,
            to: 72,
        };
        assert_eq!(up.steps(0), vec![60, 66, 72]);
        assert_eq!(up.steps(5), vec![60, 63, 66, 69, 72]);
        assert_eq!(up.interval(), 12);
        assert_eq!(up.to_string(), "glissando C4 -> C5");

        let down = PitchGlide {
            subtype: GlideKind::Portamento,
            from: 67,
            to: 64,
        };
        assert_eq!(down.steps(4), vec![67, 66, 65, 64]);
        assert_eq!(down.interval(), -3);

        let degenerate = PitchGlide {
            subtype: GlideKind::Glissando,
            from: 64,
            to: 64,
        };
        assert_eq!(degenerate.steps(3), vec![64, 64, 64]);
    }

    #[test]
    fn velocity_boost_application() {
        assert_eq!(apply_velocity_boost(0.4, 1.0, 1.0), 0.8);
        assert_eq!(apply_velocity_boost(0.8, 1.0, 1.0), 1.0);
        assert_eq!(apply_velocity_boost(0.5, 0.0, 1.0), 0.5);
        assert_eq!(apply_velocity_boost(0.5, 1.0, 0.75), 0.75);
    }
}
