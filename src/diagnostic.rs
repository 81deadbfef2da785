//! Non-fatal, per-note compile diagnostics.

use derive_more::Display;
use serde::Serialize;

// -------------------------------------------------------------------------------------------------

/// Category of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// Articulation name or descriptor type is not in the shorthand table.
    #[display("unknown articulation")]
    UnknownArticulation,
    /// Descriptor lacks a required parameter, e.g. a glissando without `target`.
    #[display("missing parameter")]
    MissingParameter,
    /// Descriptor parameter has the wrong type, is out of range or got rounded.
    #[display("invalid parameter")]
    InvalidParameter,
    /// Pitch-affecting articulation on a rest.
    #[display("pitch modulation on rest")]
    RestPitchModulation,
    /// A second pitch-affecting articulation on the same note.
    #[display("pitch conflict")]
    PitchConflict,
}

// -------------------------------------------------------------------------------------------------

/// A recovered anomaly for the note at `index`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
#[display("note #{index}: {kind}: {message}")]
pub struct Diagnostic {
    pub index: usize,
    pub kind: DiagnosticKind,
    pub message: String,
}

// -------------------------------------------------------------------------------------------------

/// Ordered collection of [`Diagnostic`]s, recorded while compiling a track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new diagnostic. Diagnostics also get logged as warnings.
    pub fn push<S: Into<String>>(&mut self, index: usize, kind: DiagnosticKind, message: S) {
        let diagnostic = Diagnostic {
            index,
            kind,
            message: message.into(),
        };
        log::warn!("{}", diagnostic);
        self.0.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// All diagnostics which got recorded for the note at `index`.
    pub fn for_note(&self, index: usize) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(move |d| d.index == index)
    }

    /// Test if a diagnostic of the given kind got recorded for the note at `index`.
    pub fn contains(&self, index: usize, kind: DiagnosticKind) -> bool {
        self.for_note(index).any(|d| d.kind == kind)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// --------------------------------------------------------------------------------------------------
