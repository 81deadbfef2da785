//! Tempo and meter context of a compiled track.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

// -------------------------------------------------------------------------------------------------

/// Musical meter, e.g. 4/4 or 6/8.
///
/// Deserializes from `"3/4"`, `[3, 4]` or `{"numerator": 3, "denominator": 4}` and serializes
/// as string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimeSignatureRepr", into = "String")]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
}

impl TimeSignature {
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, String> {
        if numerator == 0 {
            return Err("time signature numerator must be > 0".to_string());
        }
        if denominator == 0 || !denominator.is_power_of_two() {
            return Err(format!(
                "time signature denominator must be a power of two, got {}",
                denominator
            ));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Length of a single bar in quarter notes.
    pub fn quarters_per_bar(&self) -> f64 {
        self.numerator as f64 * 4.0 / self.denominator as f64
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            numerator: 4,
            denominator: 4,
        }
    }
}

impl TryFrom<&str> for TimeSignature {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, String> {
        let (numerator, denominator) = s
            .split_once('/')
            .ok_or_else(|| format!("invalid time signature '{}'", s))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|err| format!("invalid time signature '{}': {}", s, err))
        };
        Self::new(parse(numerator)?, parse(denominator)?)
    }
}

impl Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl From<TimeSignature> for String {
    fn from(signature: TimeSignature) -> Self {
        signature.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimeSignatureRepr {
    Text(String),
    Pair([u32; 2]),
    Fields { numerator: u32, denominator: u32 },
}

impl TryFrom<TimeSignatureRepr> for TimeSignature {
    type Error = String;

    fn try_from(repr: TimeSignatureRepr) -> Result<Self, String> {
        match repr {
            TimeSignatureRepr::Text(text) => Self::try_from(text.as_str()),
            TimeSignatureRepr::Pair([numerator, denominator])
            | TimeSignatureRepr::Fields {
                numerator,
                denominator,
            } => Self::new(numerator, denominator),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Tempo and meter a track gets compiled in.
///
/// Compiled modulations are expressed relative to notes and do not depend on the context yet.
/// It's carried along so renderers can convert quarter note times to absolute time.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformanceContext {
    /// Beats (quarter notes) per minute.
    pub tempo: f64,
    pub time_signature: TimeSignature,
}

impl PerformanceContext {
    pub const DEFAULT_TEMPO: f64 = 120.0;

    pub fn new(tempo: f64, time_signature: TimeSignature) -> Self {
        Self {
            tempo,
            time_signature,
        }
    }

    /// Duration of a single quarter note in seconds.
    pub fn seconds_per_quarter(&self) -> f64 {
        60.0 / self.tempo
    }

    /// Convert a quarter note time or duration to seconds.
    pub fn quarters_to_seconds(&self, quarters: f64) -> f64 {
        quarters * self.seconds_per_quarter()
    }

    /// Length of a bar in seconds.
    pub fn seconds_per_bar(&self) -> f64 {
        self.quarters_to_seconds(self.time_signature.quarters_per_bar())
    }
}

impl Default for PerformanceContext {
    fn default() -> Self {
        Self {
            tempo: Self::DEFAULT_TEMPO,
            time_signature: TimeSignature::default(),
        }
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn time_signature_parsing() -> Result<(), String> {
        assert!(TimeSignature::try_from("4").is_err());
        assert!(TimeSignature::try_from("0/4").is_err());
        assert!(TimeSignature::try_from("3/5").is_err());
        assert!(TimeSignature::try_from("x/4").is_err());

        assert_eq!(TimeSignature::try_from("6/8")?, TimeSignature::new(6, 8)?);
        assert_eq!(TimeSignature::try_from(" 3 / 4 ")?.to_string(), "3/4");
        assert_eq!(TimeSignature::new(6, 8)?.quarters_per_bar(), 3.0);
        Ok(())
    }

    #[test]
    fn context_deserialization() -> Result<(), String> {
        let parse = |value: serde_json::Value| {
            serde_json::from_value::<PerformanceContext>(value).map_err(|e| e.to_string())
        };
        let context = parse(json!({"tempo": 90, "timeSignature": "3/4"}))?;
        assert_eq!(context.tempo, 90.0);
        assert_eq!(context.time_signature, TimeSignature::new(3, 4)?);

        let context = parse(json!({"timeSignature": [6, 8]}))?;
        assert_eq!(context.tempo, PerformanceContext::DEFAULT_TEMPO);
        assert_eq!(context.time_signature, TimeSignature::new(6, 8)?);

        let context = parse(json!({"timeSignature": {"numerator": 5, "denominator": 4}}))?;
        assert_eq!(context.time_signature, TimeSignature::new(5, 4)?);

        assert!(parse(json!({"timeSignature": "7/7"})).is_err());
        assert_eq!(parse(json!({}))?, PerformanceContext::default());
        Ok(())
    }

    #[test]
    fn context_time_conversion() {
        let context = PerformanceContext::default();
        assert_eq!(context.seconds_per_quarter(), 0.5);
        assert_eq!(context.quarters_to_seconds(3.0), 1.5);
        assert_eq!(context.seconds_per_bar(), 2.0);
    }
}
