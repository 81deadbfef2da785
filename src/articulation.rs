//! Canonical articulation specs and the normalizer which creates them from raw note data.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    config::ShorthandTable,
    diagnostic::{DiagnosticKind, Diagnostics},
    note::MAX_PITCH,
};

// -------------------------------------------------------------------------------------------------

pub mod input;
pub use input::{ArticulationDescriptor, ArticulationEntry, ArticulationInput, EntryRef};

// -------------------------------------------------------------------------------------------------

/// The closed set of articulation names the compiler knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticulationKind {
    Staccato,
    Accent,
    Tenuto,
    Marcato,
    Legato,
    Glissando,
    Portamento,
}

impl ArticulationKind {
    pub const ALL: [ArticulationKind; 7] = [
        ArticulationKind::Staccato,
        ArticulationKind::Accent,
        ArticulationKind::Tenuto,
        ArticulationKind::Marcato,
        ArticulationKind::Legato,
        ArticulationKind::Glissando,
        ArticulationKind::Portamento,
    ];

    /// Canonical lower case name.
    pub fn name(&self) -> &'static str {
        match self {
            ArticulationKind::Staccato => "staccato",
            ArticulationKind::Accent => "accent",
            ArticulationKind::Tenuto => "tenuto",
            ArticulationKind::Marcato => "marcato",
            ArticulationKind::Legato => "legato",
            ArticulationKind::Glissando => "glissando",
            ArticulationKind::Portamento => "portamento",
        }
    }

    /// The simple articulation of this kind, or `None` for kinds which need parameters.
    pub fn as_simple(&self) -> Option<SimpleArticulation> {
        match self {
            ArticulationKind::Staccato => Some(SimpleArticulation::Staccato),
            ArticulationKind::Accent => Some(SimpleArticulation::Accent),
            ArticulationKind::Tenuto => Some(SimpleArticulation::Tenuto),
            ArticulationKind::Marcato => Some(SimpleArticulation::Marcato),
            ArticulationKind::Legato => Some(SimpleArticulation::Legato),
            ArticulationKind::Glissando | ArticulationKind::Portamento => None,
        }
    }

    /// The glide kind of this kind, or `None` for simple articulations.
    pub fn as_glide(&self) -> Option<GlideKind> {
        match self {
            ArticulationKind::Glissando => Some(GlideKind::Glissando),
            ArticulationKind::Portamento => Some(GlideKind::Portamento),
            _ => None,
        }
    }
}

impl Display for ArticulationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// -------------------------------------------------------------------------------------------------

/// Articulations which need no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimpleArticulation {
    Staccato,
    Accent,
    Tenuto,
    /// Composite of accent and tenuto.
    Marcato,
    /// Phrasing only: has no quantitative effect.
    Legato,
}

impl SimpleArticulation {
    pub fn kind(&self) -> ArticulationKind {
        match self {
            SimpleArticulation::Staccato => ArticulationKind::Staccato,
            SimpleArticulation::Accent => ArticulationKind::Accent,
            SimpleArticulation::Tenuto => ArticulationKind::Tenuto,
            SimpleArticulation::Marcato => ArticulationKind::Marcato,
            SimpleArticulation::Legato => ArticulationKind::Legato,
        }
    }
}

impl Display for SimpleArticulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind().name())
    }
}

/// Continuous pitch transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlideKind {
    Glissando,
    Portamento,
}

impl GlideKind {
    pub fn kind(&self) -> ArticulationKind {
        match self {
            GlideKind::Glissando => ArticulationKind::Glissando,
            GlideKind::Portamento => ArticulationKind::Portamento,
        }
    }
}

impl Display for GlideKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind().name())
    }
}

/// Articulations with required parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ComplexArticulation {
    /// Glide from the note's pitch to the `target` MIDI pitch.
    Glide { kind: GlideKind, target: u8 },
}

// -------------------------------------------------------------------------------------------------

/// A normalized articulation: either a simple name or a typed, parameterized descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticulationSpec {
    Simple(SimpleArticulation),
    Complex(ComplexArticulation),
}

impl ArticulationSpec {
    pub fn kind(&self) -> ArticulationKind {
        match self {
            ArticulationSpec::Simple(simple) => simple.kind(),
            ArticulationSpec::Complex(ComplexArticulation::Glide { kind, .. }) => kind.kind(),
        }
    }
}

impl From<SimpleArticulation> for ArticulationSpec {
    fn from(simple: SimpleArticulation) -> Self {
        ArticulationSpec::Simple(simple)
    }
}

impl From<ComplexArticulation> for ArticulationSpec {
    fn from(complex: ComplexArticulation) -> Self {
        ArticulationSpec::Complex(complex)
    }
}

impl Display for ArticulationSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArticulationSpec::Simple(simple) => write!(f, "{}", simple),
            ArticulationSpec::Complex(ComplexArticulation::Glide { kind, target }) => {
                write!(f, "{} -> {}", kind, target)
            }
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Normalize the raw articulation input of the note at `index` into canonical specs.
///
/// Entries which can not be resolved are dropped and recorded in `diagnostics`; all other
/// entries are kept in their input order.
pub fn normalize(
    input: &ArticulationInput,
    shorthands: &ShorthandTable,
    index: usize,
    diagnostics: &mut Diagnostics,
) -> Vec<ArticulationSpec> {
    input
        .entries()
        .into_iter()
        .filter_map(|entry| resolve_entry(entry, shorthands, index, diagnostics))
        .collect()
}

fn resolve_entry(
    entry: EntryRef,
    shorthands: &ShorthandTable,
    index: usize,
    diagnostics: &mut Diagnostics,
) -> Option<ArticulationSpec> {
    match entry {
        EntryRef::Name(name) => resolve_name(name, shorthands, index, diagnostics),
        EntryRef::Descriptor(descriptor) => {
            resolve_descriptor(descriptor, shorthands, index, diagnostics)
        }
        EntryRef::Other(value) => {
            diagnostics.push(
                index,
                DiagnosticKind::UnknownArticulation,
                format!("unrecognized articulation entry '{}'", value),
            );
            None
        }
    }
}

fn resolve_name(
    name: &str,
    shorthands: &ShorthandTable,
    index: usize,
    diagnostics: &mut Diagnostics,
) -> Option<ArticulationSpec> {
    match shorthands.lookup(name) {
        Some(kind) => {
            if let Some(simple) = kind.as_simple() {
                Some(ArticulationSpec::Simple(simple))
            } else {
                diagnostics.push(
                    index,
                    DiagnosticKind::MissingParameter,
                    format!("'{}' ({}) requires a 'target' parameter", name, kind),
                );
                None
            }
        }
        None => {
            diagnostics.push(
                index,
                DiagnosticKind::UnknownArticulation,
                format!("unknown articulation '{}'", name),
            );
            None
        }
    }
}

fn resolve_descriptor(
    descriptor: &ArticulationDescriptor,
    shorthands: &ShorthandTable,
    index: usize,
    diagnostics: &mut Diagnostics,
) -> Option<ArticulationSpec> {
    let Some(kind) = shorthands.lookup(&descriptor.kind) else {
        diagnostics.push(
            index,
            DiagnosticKind::UnknownArticulation,
            format!("unknown articulation type '{}'", descriptor.kind),
        );
        return None;
    };
    if let Some(simple) = kind.as_simple() {
        return Some(ArticulationSpec::Simple(simple));
    }
    let glide = kind.as_glide()?;
    let Some(target) = descriptor.parameter("target") else {
        diagnostics.push(
            index,
            DiagnosticKind::MissingParameter,
            format!("{} requires a 'target' parameter", glide),
        );
        return None;
    };
    match target.as_f64().filter(|t| t.is_finite()) {
        Some(value) if (0.0..=MAX_PITCH as f64).contains(&value.round()) => {
            let rounded = value.round();
            if rounded != value {
                diagnostics.push(
                    index,
                    DiagnosticKind::InvalidParameter,
                    format!("{} target {} rounded to {}", glide, value, rounded),
                );
            }
            Some(ArticulationSpec::Complex(ComplexArticulation::Glide {
                kind: glide,
                target: rounded as u8,
            }))
        }
        _ => {
            diagnostics.push(
                index,
                DiagnosticKind::InvalidParameter,
                format!(
                    "{} target '{}' is not a MIDI pitch in range [0..127]",
                    glide, target
                ),
            );
            None
        }
    }
}

// --------------------------------------------------------------------------------------------------
