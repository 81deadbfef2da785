//! Named quantization grid resolutions.

use derive_more::{Deref, Display, From, Into};
use num_rational::Rational64;
use num_traits::{FromPrimitive, ToPrimitive};

// -------------------------------------------------------------------------------------------------

/// Largest denominator tried when converting grid ratios into exact fractions.
const MAX_DENOMINATOR: i64 = 192;

/// Convert a float into the simplest fraction with a denominator up to [`MAX_DENOMINATOR`]
/// which matches it, falling back to a continued fraction approximation.
pub(crate) fn to_rational(value: f64) -> Option<Rational64> {
    if !value.is_finite() {
        return None;
    }
    for denominator in 1..=MAX_DENOMINATOR {
        let numerator = (value * denominator as f64).round();
        if ((numerator / denominator as f64) - value).abs() < 1e-9 {
            return Some(Rational64::new(numerator.to_i64()?, denominator));
        }
    }
    Rational64::from_f64(value)
}

// -------------------------------------------------------------------------------------------------

/// A quantization grid resolution in quarter notes, e.g. `0.25` for sixteenth notes.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Display, From, Into, Deref)]
pub struct Grid(f64);

macro_rules! generate_grid_funcs {
    ($name:ident, $quarters:expr) => {
        paste::paste! {
            pub fn $name() -> Self {
                Self($quarters)
            }
            pub fn [<$name _triplet>]() -> Self {
                Self($quarters * 2.0 / 3.0)
            }
        }
    };
}

impl Grid {
    /// Create a new grid from a resolution in quarter notes. Returns `None` for non-positive or
    /// non-finite resolutions.
    pub fn new(quarters: f64) -> Option<Self> {
        if quarters.is_finite() && quarters > 0.0 {
            Some(Self(quarters))
        } else {
            None
        }
    }

    /// Create a grid from a note value denominator: 4 = quarter notes, 16 = sixteenth notes.
    pub fn from_note_value(denominator: u32) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        Self::new(4.0 / denominator as f64)
    }

    /// Resolution in quarter notes.
    pub fn quarters(&self) -> f64 {
        self.0
    }

    /// Resolution as exact fraction of a quarter note.
    pub fn as_ratio(&self) -> Option<Rational64> {
        to_rational(self.0)
    }

    generate_grid_funcs!(whole, 4.0);
    generate_grid_funcs!(half, 2.0);
    generate_grid_funcs!(quarter, 1.0);
    generate_grid_funcs!(eighth, 0.5);
    generate_grid_funcs!(sixteenth, 0.25);
    generate_grid_funcs!(thirty_second, 0.125);
}

impl TryFrom<&str> for Grid {
    type Error = String;

    /// Try converting the given note value string to a grid.
    ///
    /// Supported are fractions of a whole note (`1/16`), plain denominators with optional
    /// ordinal suffix (`16`, `16th`) and note value names (`sixteenth`). A trailing `t` or
    /// `triplet` selects the triplet variant: `1/8t`, `eighth triplet`.
    fn try_from(s: &str) -> Result<Self, String> {
        let normalized = s.trim().to_ascii_lowercase();
        let (value, is_triplet) = if let Some(value) = normalized.strip_suffix("triplet") {
            (value.trim_end_matches([' ', '_', '-']), true)
        } else if let Some(value) = normalized.strip_suffix('t') {
            (value, true)
        } else {
            (normalized.as_str(), false)
        };
        let grid = match value {
            "whole" => Some(Grid::whole()),
            "half" => Some(Grid::half()),
            "quarter" => Some(Grid::quarter()),
            "eighth" => Some(Grid::eighth()),
            "sixteenth" => Some(Grid::sixteenth()),
            "thirty-second" | "thirty_second" | "thirtysecond" => Some(Grid::thirty_second()),
            _ => {
                let denominator = value.strip_prefix("1/").unwrap_or(value);
                let denominator = ["st", "nd", "rd", "th"]
                    .iter()
                    .find_map(|suffix| denominator.strip_suffix(suffix))
                    .unwrap_or(denominator);
                denominator
                    .parse::<u32>()
                    .ok()
                    .and_then(Grid::from_note_value)
            }
        };
        match grid {
            Some(grid) if is_triplet => Ok(Grid(grid.0 * 2.0 / 3.0)),
            Some(grid) => Ok(grid),
            None => Err(format!("invalid grid '{}'", s)),
        }
    }
}

// --------------------------------------------------------------------------------------------------
