//! Immutable compiler configuration: coefficient table and articulation shorthand dictionary.

use std::collections::{BTreeMap, HashMap};

use anyhow::{anyhow, bail, Context};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::articulation::ArticulationKind;

// -------------------------------------------------------------------------------------------------

// map of all default articulation names with aliases and text notation decoration symbols
lazy_static! {
    static ref SHORTHAND_TABLE: HashMap<&'static str, ArticulationKind> = {
        HashMap::from([
            ("staccato", ArticulationKind::Staccato),
            ("stacc", ArticulationKind::Staccato),
            (".", ArticulationKind::Staccato),
            ("accent", ArticulationKind::Accent),
            ("acc", ArticulationKind::Accent),
            (">", ArticulationKind::Accent),
            ("l", ArticulationKind::Accent),
            ("tenuto", ArticulationKind::Tenuto),
            ("ten", ArticulationKind::Tenuto),
            ("-", ArticulationKind::Tenuto),
            ("marcato", ArticulationKind::Marcato),
            ("marc", ArticulationKind::Marcato),
            ("^", ArticulationKind::Marcato),
            ("legato", ArticulationKind::Legato),
            ("slur", ArticulationKind::Legato),
            ("glissando", ArticulationKind::Glissando),
            ("gliss", ArticulationKind::Glissando),
            ("slide", ArticulationKind::Glissando),
            ("portamento", ArticulationKind::Portamento),
            ("port", ArticulationKind::Portamento),
        ])
    };
}

// -------------------------------------------------------------------------------------------------

/// Dictionary of recognized articulation names. Lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, ArticulationKind>")]
#[serde(into = "BTreeMap<String, ArticulationKind>")]
pub struct ShorthandTable(BTreeMap<String, ArticulationKind>);

impl ShorthandTable {
    /// Resolve a shorthand name to its articulation kind.
    pub fn lookup(&self, name: &str) -> Option<ArticulationKind> {
        self.0.get(&Self::normalized_name(name)).copied()
    }

    /// All names which resolve to the given kind, sorted.
    pub fn aliases(&self, kind: ArticulationKind) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn normalized_name(name: &str) -> String {
        name.trim().to_lowercase()
    }
}

impl Default for ShorthandTable {
    fn default() -> Self {
        Self::from_iter(SHORTHAND_TABLE.iter().map(|(name, kind)| (*name, *kind)))
    }
}

impl<S: AsRef<str>> FromIterator<(S, ArticulationKind)> for ShorthandTable {
    fn from_iter<T: IntoIterator<Item = (S, ArticulationKind)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, kind)| (Self::normalized_name(name.as_ref()), kind))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, ArticulationKind>> for ShorthandTable {
    fn from(map: BTreeMap<String, ArticulationKind>) -> Self {
        Self::from_iter(map)
    }
}

impl From<ShorthandTable> for BTreeMap<String, ArticulationKind> {
    fn from(table: ShorthandTable) -> Self {
        table.0
    }
}

// -------------------------------------------------------------------------------------------------

/// Coefficients of the articulation rule model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoefficientTable {
    pub staccato_duration_factor: f64,
    pub tenuto_duration_factor: f64,
    pub tenuto_velocity_factor: f64,
    pub accent_velocity_factor: f64,
    /// Velocity ceiling appliers clamp boosted velocities to.
    pub max_combined_velocity: f64,
    /// Lower bound of combined duration factors.
    pub min_duration_factor: f64,
}

impl CoefficientTable {
    pub const STACCATO_DURATION_FACTOR: f64 = 0.5;
    pub const TENUTO_DURATION_FACTOR: f64 = 1.5;
    pub const TENUTO_VELOCITY_FACTOR: f64 = 1.3;
    pub const ACCENT_VELOCITY_FACTOR: f64 = 2.0;
    pub const MAX_COMBINED_VELOCITY: f64 = 1.0;
    pub const MIN_DURATION_FACTOR: f64 = 0.001;

    /// Convert a multiplicative velocity factor into an additive boost amount.
    pub fn velocity_boost(factor: f64) -> f64 {
        factor - 1.0
    }

    /// Verify that all coefficients are finite and positive.
    pub fn validate(&self) -> anyhow::Result<()> {
        let coefficients = [
            ("staccatoDurationFactor", self.staccato_duration_factor),
            ("tenutoDurationFactor", self.tenuto_duration_factor),
            ("tenutoVelocityFactor", self.tenuto_velocity_factor),
            ("accentVelocityFactor", self.accent_velocity_factor),
            ("maxCombinedVelocity", self.max_combined_velocity),
            ("minDurationFactor", self.min_duration_factor),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value <= 0.0 {
                bail!("coefficient '{}' must be a finite value > 0, got {}", name, value);
            }
        }
        Ok(())
    }
}

impl Default for CoefficientTable {
    fn default() -> Self {
        Self {
            staccato_duration_factor: Self::STACCATO_DURATION_FACTOR,
            tenuto_duration_factor: Self::TENUTO_DURATION_FACTOR,
            tenuto_velocity_factor: Self::TENUTO_VELOCITY_FACTOR,
            accent_velocity_factor: Self::ACCENT_VELOCITY_FACTOR,
            max_combined_velocity: Self::MAX_COMBINED_VELOCITY,
            min_duration_factor: Self::MIN_DURATION_FACTOR,
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Full configuration of a [`PerformanceCompiler`](crate::PerformanceCompiler).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformanceConfig {
    pub coefficients: CoefficientTable,
    pub shorthands: ShorthandTable,
    /// Minimum number of steps renderers should use when discretizing a pitch glide.
    /// Guidance only: the compiler never discretizes glides.
    pub min_glide_subdivisions: usize,
}

impl PerformanceConfig {
    pub const MIN_GLIDE_SUBDIVISIONS: usize = 3;

    /// Create a new config with the given coefficients and default shorthands.
    pub fn new(coefficients: CoefficientTable) -> Self {
        Self {
            coefficients,
            ..Self::default()
        }
    }

    /// Return a new config which uses the given shorthand table.
    #[must_use]
    pub fn with_shorthands(self, shorthands: ShorthandTable) -> Self {
        Self { shorthands, ..self }
    }

    /// Return a new config which uses the given glide subdivision hint.
    #[must_use]
    pub fn with_min_glide_subdivisions(self, min_glide_subdivisions: usize) -> Self {
        Self {
            min_glide_subdivisions,
            ..self
        }
    }

    /// Parse and validate a config from a JSON string. Missing fields use their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self =
            serde_json::from_str(json).context("Failed to parse performance config")?;
        config.validate()?;
        Ok(config)
    }

    /// Verify the config's coefficients and settings.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.coefficients
            .validate()
            .context("Invalid coefficient table")?;
        if self.shorthands.is_empty() {
            return Err(anyhow!("shorthand table must not be empty"));
        }
        if self.min_glide_subdivisions < Self::MIN_GLIDE_SUBDIVISIONS {
            bail!(
                "minGlideSubdivisions must be >= {}, got {}",
                Self::MIN_GLIDE_SUBDIVISIONS,
                self.min_glide_subdivisions
            );
        }
        Ok(())
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            coefficients: CoefficientTable::default(),
            shorthands: ShorthandTable::default(),
            min_glide_subdivisions: Self::MIN_GLIDE_SUBDIVISIONS,
        }
    }
}

// --------------------------------------------------------------------------------------------------
