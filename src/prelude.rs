//! The articulate prelude.
//!
//! The purpose of this module is to alleviate imports of common articulate types and functions:
//!
//! ```
//! # #![allow(unused_imports)]
//! use articulate::prelude::*;
//! ```

pub use super::{
    // articulation inputs and normalized specs
    articulation::{
        ArticulationDescriptor, ArticulationEntry, ComplexArticulation, GlideKind,
        SimpleArticulation,
    },
    // compiler results
    compiler::PhrasingMark,
    // renderer helpers
    modulation::apply_velocity_boost,
    note::pitch_name,
    // timing quantization
    quantize::{
        encode_abc_duration, quantize, quantize_composition, quantize_composition_value,
        quantize_duration, quantize_events, quantize_json_number, quantize_note, quantize_track,
        quantize_track_value, QuantizeOptions,
    },
    // all public basic types
    compile_events,
    ArticulationInput,
    ArticulationKind,
    ArticulationSpec,
    CoefficientTable,
    CompiledPerformance,
    Composition,
    Diagnostic,
    DiagnosticKind,
    Diagnostics,
    Dynamic,
    Grid,
    ModulationEvent,
    ModulationType,
    Note,
    PerformanceCompiler,
    PerformanceConfig,
    PerformanceContext,
    Pitch,
    PitchGlide,
    QuantizeMode,
    ShorthandTable,
    TimeSignature,
    Track,
};
