//! Compiles articulated note sequences into performance modulation events.

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    articulation,
    config::PerformanceConfig,
    diagnostic::Diagnostics,
    modulation::ModulationEvent,
    note::{Composition, Note, Track},
    time::PerformanceContext,
};

// -------------------------------------------------------------------------------------------------

pub mod resolve;
pub mod rules;

pub use resolve::PhrasingMark;

// -------------------------------------------------------------------------------------------------

/// Compiled modulations of a single track.
///
/// Serializes as `{"modulations": [...]}`, with additional `phrasing` and `diagnostics` lists
/// when they are not empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompiledPerformance {
    /// Modulation events, ascending by note index.
    pub modulations: Vec<ModulationEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phrasing: Vec<PhrasingMark>,
    #[serde(skip_serializing_if = "Diagnostics::is_empty")]
    pub diagnostics: Diagnostics,
}

impl CompiledPerformance {
    /// All modulation events of the note at `index`.
    pub fn events_for(&self, index: usize) -> impl Iterator<Item = &ModulationEvent> {
        self.modulations.iter().filter(move |e| e.index() == index)
    }
}

// -------------------------------------------------------------------------------------------------

/// Runs the normalizer, rule engine and conflict resolver over whole tracks.
///
/// Compiling is pure: inputs are never modified and all results are newly created. The compiler
/// holds no state besides its immutable config, so a single instance can be shared between
/// threads compiling different tracks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceCompiler {
    config: PerformanceConfig,
}

impl PerformanceCompiler {
    /// Create a new compiler with the given config. Use [`PerformanceConfig::validate`] or
    /// [`PerformanceConfig::from_json`] to verify custom configs first.
    pub fn new(config: PerformanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PerformanceConfig {
        &self.config
    }

    /// Compile the given track. `context` is currently not used to compute modulations.
    ///
    /// Fails when a note violates the calling contract, see [`Note::validate`].
    pub fn compile(
        &self,
        track: &Track,
        context: &PerformanceContext,
    ) -> anyhow::Result<CompiledPerformance> {
        self.compile_notes(&track.notes, context)
    }

    /// Compile a list of notes. Modulation indices refer to positions in `notes`.
    pub fn compile_notes(
        &self,
        notes: &[Note],
        _context: &PerformanceContext,
    ) -> anyhow::Result<CompiledPerformance> {
        for (index, note) in notes.iter().enumerate() {
            note.validate()
                .map_err(|err| anyhow!("Note #{} is invalid: {}", index, err))?;
        }
        let engine = rules::RuleEngine::new(&self.config.coefficients);
        let mut diagnostics = Diagnostics::new();
        let mut modulations = Vec::new();
        let mut phrasing = Vec::new();
        for (index, note) in notes.iter().enumerate() {
            let specs = note
                .articulation_inputs()
                .flat_map(|input| {
                    articulation::normalize(
                        input,
                        &self.config.shorthands,
                        index,
                        &mut diagnostics,
                    )
                })
                .collect::<Vec<_>>();
            if specs.is_empty() {
                continue;
            }
            let contributions = engine.contributions(index, note, &specs, &mut diagnostics);
            let resolved = resolve::resolve(
                index,
                &contributions,
                &self.config.coefficients,
                &mut diagnostics,
            );
            modulations.extend(resolved.events);
            phrasing.extend(resolved.phrasing);
        }
        log::debug!(
            "Compiled {} notes into {} modulations ({} diagnostics)",
            notes.len(),
            modulations.len(),
            diagnostics.len()
        );
        Ok(CompiledPerformance {
            modulations,
            phrasing,
            diagnostics,
        })
    }

    /// Compile a loosely typed track value of the form `{"notes": [...]}`.
    ///
    /// Fails when the value violates the calling contract: when `notes` is missing or no list,
    /// or when a note entry is no object or has malformed fields.
    pub fn compile_events(
        &self,
        track: &Value,
        context: &PerformanceContext,
    ) -> anyhow::Result<CompiledPerformance> {
        let notes = parse_notes(track)?;
        self.compile_notes(&notes, context)
    }

    /// Compile all tracks of a composition, returning one result per track in track order.
    pub fn compile_composition(
        &self,
        composition: &Composition,
        context: &PerformanceContext,
    ) -> anyhow::Result<Vec<CompiledPerformance>> {
        composition
            .tracks
            .iter()
            .enumerate()
            .map(|(index, track)| {
                self.compile(track, context)
                    .with_context(|| format!("Failed to compile track #{}", index))
            })
            .collect()
    }
}

// -------------------------------------------------------------------------------------------------

/// Compile a loosely typed track value with the default config.
/// See [`PerformanceCompiler::compile_events`].
pub fn compile_events(
    track: &Value,
    context: &PerformanceContext,
) -> anyhow::Result<CompiledPerformance> {
    PerformanceCompiler::default().compile_events(track, context)
}

fn parse_notes(track: &Value) -> anyhow::Result<Vec<Note>> {
    let Some(track) = track.as_object() else {
        bail!("Expected a track object with a 'notes' list, got '{}'", track);
    };
    let notes = track
        .get("notes")
        .ok_or_else(|| anyhow!("Track has no 'notes' list"))?
        .as_array()
        .ok_or_else(|| anyhow!("Track 'notes' must be a list"))?;
    notes
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            if !entry.is_object() {
                bail!("Note #{} must be an object, got '{}'", index, entry);
            }
            Note::deserialize(entry).with_context(|| format!("Note #{} is malformed", index))
        })
        .collect()
}

// --------------------------------------------------------------------------------------------------
