//! Dynamics markings and the base velocities they stand for.

use std::fmt::Display;

// -------------------------------------------------------------------------------------------------

/// A standard dynamics marking, from `ppp` to `fff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dynamic {
    Pianississimo,
    Pianissimo,
    Piano,
    MezzoPiano,
    MezzoForte,
    Forte,
    Fortissimo,
    Fortississimo,
}

impl Dynamic {
    /// Velocity of notes without a dynamics marking.
    pub const DEFAULT_VELOCITY: f64 = 80.0 / 127.0;

    /// Normalized base velocity in range `[0..1]`, following the common MIDI velocity steps.
    pub fn velocity(&self) -> f64 {
        let midi_velocity = match self {
            Dynamic::Pianississimo => 16,
            Dynamic::Pianissimo => 33,
            Dynamic::Piano => 49,
            Dynamic::MezzoPiano => 64,
            Dynamic::MezzoForte => 80,
            Dynamic::Forte => 96,
            Dynamic::Fortissimo => 112,
            Dynamic::Fortississimo => 127,
        };
        midi_velocity as f64 / 127.0
    }

    /// Short marking name, as written in a score.
    pub fn marking(&self) -> &'static str {
        match self {
            Dynamic::Pianississimo => "ppp",
            Dynamic::Pianissimo => "pp",
            Dynamic::Piano => "p",
            Dynamic::MezzoPiano => "mp",
            Dynamic::MezzoForte => "mf",
            Dynamic::Forte => "f",
            Dynamic::Fortissimo => "ff",
            Dynamic::Fortississimo => "fff",
        }
    }
}

impl TryFrom<&str> for Dynamic {
    type Error = String;

    /// Try converting the given marking or its spelled out italian name to a dynamic.
    fn try_from(s: &str) -> Result<Self, String> {
        let marking = s.trim();
        match marking.to_ascii_lowercase().as_str() {
            "ppp" | "pianississimo" => Ok(Dynamic::Pianississimo),
            "pp" | "pianissimo" => Ok(Dynamic::Pianissimo),
            "p" | "piano" => Ok(Dynamic::Piano),
            "mp" | "mezzo-piano" | "mezzopiano" => Ok(Dynamic::MezzoPiano),
            "mf" | "mezzo-forte" | "mezzoforte" => Ok(Dynamic::MezzoForte),
            "f" | "forte" => Ok(Dynamic::Forte),
            "ff" | "fortissimo" => Ok(Dynamic::Fortissimo),
            "fff" | "fortississimo" => Ok(Dynamic::Fortississimo),
            _ => Err(format!("invalid dynamics marking '{}'", s)),
        }
    }
}

impl Display for Dynamic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.marking())
    }
}

// --------------------------------------------------------------------------------------------------
