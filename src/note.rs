//! Notes, tracks and compositions as consumed by the compiler and quantizer.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{articulation::ArticulationInput, dynamics::Dynamic};

// -------------------------------------------------------------------------------------------------

/// Highest valid MIDI pitch value.
pub const MAX_PITCH: u8 = 0x7f;

/// Returns a display name for the given MIDI pitch, e.g. `C4` for 60.
pub fn pitch_name(pitch: u8) -> String {
    const NOTE_NAMES: [&str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];
    let octave = (pitch / 12) as i32 - 1;
    let note = (pitch % 12) as usize;
    format!("{}{}", NOTE_NAMES[note], octave)
}

// -------------------------------------------------------------------------------------------------

/// Sounding pitch of a [`Note`]: a single MIDI pitch or a chord.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pitch {
    Single(u8),
    Chord(Vec<u8>),
}

impl Pitch {
    /// The pitch a glide starts from: the single pitch or the first listed chord pitch.
    pub fn primary(&self) -> Option<u8> {
        match self {
            Pitch::Single(pitch) => Some(*pitch),
            Pitch::Chord(pitches) => pitches.first().copied(),
        }
    }

    /// All pitches, in their notated order.
    pub fn pitches(&self) -> Vec<u8> {
        match self {
            Pitch::Single(pitch) => vec![*pitch],
            Pitch::Chord(pitches) => pitches.clone(),
        }
    }
}

impl From<u8> for Pitch {
    fn from(pitch: u8) -> Self {
        Pitch::Single(pitch)
    }
}

impl From<Vec<u8>> for Pitch {
    fn from(pitches: Vec<u8>) -> Self {
        Pitch::Chord(pitches)
    }
}

impl Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pitch::Single(pitch) => write!(f, "{}", pitch_name(*pitch)),
            Pitch::Chord(pitches) => write!(
                f,
                "[{}]",
                pitches
                    .iter()
                    .map(|p| pitch_name(*p))
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// A single notated note or rest.
///
/// Time and duration are expressed in quarter notes. Fields which are not known to the compiler
/// are kept in `extra`, so a note passes through the quantizer without losing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI pitch or chord. `None` marks a rest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<Pitch>,
    pub duration: f64,
    #[serde(default)]
    pub time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articulation: Option<ArticulationInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articulations: Option<ArticulationInput>,
    /// Dynamics marking such as `mf` or `ff`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamics: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Note {
    /// Create a new pitched note without articulations.
    pub fn new<P: Into<Pitch>>(pitch: P, time: f64, duration: f64) -> Self {
        Self {
            pitch: Some(pitch.into()),
            duration,
            time,
            articulation: None,
            articulations: None,
            dynamics: None,
            extra: Map::new(),
        }
    }

    /// Create a new rest.
    pub fn rest(time: f64, duration: f64) -> Self {
        Self {
            pitch: None,
            duration,
            time,
            articulation: None,
            articulations: None,
            dynamics: None,
            extra: Map::new(),
        }
    }

    /// Return a copy of this note with the given articulations.
    #[must_use]
    pub fn with_articulations<A: Into<ArticulationInput>>(self, articulations: A) -> Self {
        Self {
            articulations: Some(articulations.into()),
            ..self
        }
    }

    /// Return a copy of this note with the given dynamics marking.
    #[must_use]
    pub fn with_dynamics<S: Into<String>>(self, dynamics: S) -> Self {
        Self {
            dynamics: Some(dynamics.into()),
            ..self
        }
    }

    /// Rests are notes without a pitch, or with an empty chord.
    pub fn is_rest(&self) -> bool {
        self.primary_pitch().is_none()
    }

    /// The pitch pitch-affecting modulations start from, if any.
    pub fn primary_pitch(&self) -> Option<u8> {
        self.pitch.as_ref().and_then(Pitch::primary)
    }

    /// Raw articulation inputs: the `articulation` field first, then `articulations`.
    pub fn articulation_inputs(&self) -> impl Iterator<Item = &ArticulationInput> {
        self.articulation.iter().chain(self.articulations.iter())
    }

    /// Parsed dynamics marking. Unknown markings are ignored.
    pub fn dynamic(&self) -> Option<Dynamic> {
        self.dynamics
            .as_deref()
            .and_then(|marking| Dynamic::try_from(marking).ok())
    }

    /// Verify the note's calling contract: pitches in MIDI range, a positive finite duration
    /// and a finite, non negative start time.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(pitch) = &self.pitch {
            if let Some(invalid) = pitch.pitches().into_iter().find(|p| *p > MAX_PITCH) {
                return Err(format!("pitch {} is out of MIDI range [0..127]", invalid));
            }
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(format!("duration must be > 0, got {}", self.duration));
        }
        if !self.time.is_finite() || self.time < 0.0 {
            return Err(format!("time must be >= 0, got {}", self.time));
        }
        Ok(())
    }
}

impl Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.pitch {
            Some(pitch) => write!(f, "{} @{} ({})", pitch, self.time, self.duration),
            None => write!(f, "--- @{} ({})", self.time, self.duration),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// An ordered list of notes. Modulation indices refer to positions in `notes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub notes: Vec<Note>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Track {
    pub fn new(notes: Vec<Note>) -> Self {
        Self {
            notes,
            extra: Map::new(),
        }
    }
}

impl From<Vec<Note>> for Track {
    fn from(notes: Vec<Note>) -> Self {
        Self::new(notes)
    }
}

// -------------------------------------------------------------------------------------------------

/// A set of tracks which get compiled and quantized independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub tracks: Vec<Track>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Composition {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            extra: Map::new(),
        }
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn pitch_names() {
        assert_eq!(pitch_name(60), "C4");
        assert_eq!(pitch_name(0), "C-1");
        assert_eq!(pitch_name(61), "C#4");
        assert_eq!(pitch_name(127), "G9");
        assert_eq!(Pitch::Chord(vec![60, 64, 67]).to_string(), "[C4 E4 G4]");
    }

    #[test]
    fn note_deserialization() -> Result<(), String> {
        let note: Note = serde_json::from_value(json!({
            "pitch": 60, "duration": 1, "time": 0, "articulations": ["staccato"], "voice": 2
        }))
        .map_err(|e| e.to_string())?;
        assert_eq!(note.pitch, Some(Pitch::Single(60)));
        assert_eq!(note.duration, 1.0);
        assert!(note.articulations.is_some());
        assert_eq!(note.extra.get("voice"), Some(&json!(2)));

        let chord: Note = serde_json::from_value(json!({"pitch": [60, 64], "duration": 0.5}))
            .map_err(|e| e.to_string())?;
        assert_eq!(chord.primary_pitch(), Some(60));
        assert_eq!(chord.time, 0.0);

        let rest: Note = serde_json::from_value(json!({"pitch": null, "duration": 2}))
            .map_err(|e| e.to_string())?;
        assert!(rest.is_rest());
        assert!(Note::new(Vec::<u8>::new(), 0.0, 1.0).is_rest());
        Ok(())
    }

    #[test]
    fn note_round_trip_keeps_extra_fields() -> Result<(), String> {
        let value = json!({"pitch": 62, "duration": 1.0, "time": 2.0, "lyric": "la"});
        let note: Note = serde_json::from_value(value.clone()).map_err(|e| e.to_string())?;
        assert_eq!(serde_json::to_value(&note).map_err(|e| e.to_string())?, value);
        Ok(())
    }

    #[test]
    fn note_validation() {
        assert!(Note::new(60, 0.0, 1.0).validate().is_ok());
        assert!(Note::rest(1.0, 0.5).validate().is_ok());
        assert!(Note::new(128, 0.0, 1.0).validate().is_err());
        assert!(Note::new(vec![60, 200], 0.0, 1.0).validate().is_err());
        assert!(Note::new(60, 0.0, 0.0).validate().is_err());
        assert!(Note::new(60, -1.0, 1.0).validate().is_err());
        assert!(Note::new(60, f64::NAN, 1.0).validate().is_err());
    }

    #[test]
    fn note_articulation_inputs_order() {
        let note = Note {
            articulation: Some("accent".into()),
            ..Note::new(60, 0.0, 1.0).with_articulations("staccato")
        };
        let inputs = note.articulation_inputs().cloned().collect::<Vec<_>>();
        assert_eq!(
            inputs,
            vec![
                ArticulationInput::from("accent"),
                ArticulationInput::from("staccato")
            ]
        );
    }
}
