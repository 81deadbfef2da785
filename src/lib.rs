//! Compiles symbolic note articulations into renderer agnostic performance modulations.
//!
//! Notes carry loosely typed articulation markings such as `"staccato"`, `["stacc", ">"]` or
//! `{"type": "glissando", "target": 67}`. The [`PerformanceCompiler`] normalizes them, applies a
//! fixed coefficient model and merges the results into at most one duration, velocity and pitch
//! [`ModulationEvent`] per note. The [`quantize`] module independently snaps note timing to
//! musical grids and encodes durations for text notation.

pub mod articulation;
pub use articulation::{ArticulationInput, ArticulationKind, ArticulationSpec};

pub mod config;
pub use config::{CoefficientTable, PerformanceConfig, ShorthandTable};

pub mod diagnostic;
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};

pub mod dynamics;
pub use dynamics::Dynamic;

pub mod note;
pub use note::{Composition, Note, Pitch, Track};

pub mod time;
pub use time::{PerformanceContext, TimeSignature};

pub mod modulation;
pub use modulation::{ModulationEvent, ModulationType, PitchGlide};

pub mod compiler;
pub use compiler::{compile_events, CompiledPerformance, PerformanceCompiler};

pub mod quantize;
pub use quantize::{Grid, QuantizeMode};

pub mod prelude;

// -------------------------------------------------------------------------------------------------
