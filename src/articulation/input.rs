//! Raw, loosely typed articulation data as it appears on a note.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// -------------------------------------------------------------------------------------------------

/// A parameterized articulation descriptor such as `{"type": "glissando", "target": 67}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticulationDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub parameters: Map<String, Value>,
}

impl ArticulationDescriptor {
    pub fn new<S: Into<String>>(kind: S) -> Self {
        Self {
            kind: kind.into(),
            parameters: Map::new(),
        }
    }

    /// Return a copy of this descriptor with the given parameter set.
    #[must_use]
    pub fn with_parameter<S: Into<String>, V: Into<Value>>(self, name: S, value: V) -> Self {
        let mut parameters = self.parameters;
        parameters.insert(name.into(), value.into());
        Self { parameters, ..self }
    }

    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }
}

// -------------------------------------------------------------------------------------------------

/// A single entry of an articulation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticulationEntry {
    /// Shorthand name, e.g. `"staccato"` or `"."`.
    Name(String),
    /// Parameterized descriptor.
    Descriptor(ArticulationDescriptor),
    /// Anything else. Never resolves, but keeps deserialization total.
    Other(Value),
}

impl From<&str> for ArticulationEntry {
    fn from(name: &str) -> Self {
        ArticulationEntry::Name(name.to_string())
    }
}

impl From<ArticulationDescriptor> for ArticulationEntry {
    fn from(descriptor: ArticulationDescriptor) -> Self {
        ArticulationEntry::Descriptor(descriptor)
    }
}

// -------------------------------------------------------------------------------------------------

/// All accepted shapes of a note's articulation field: a bare name, a single descriptor or an
/// ordered list mixing both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticulationInput {
    Name(String),
    List(Vec<ArticulationEntry>),
    Descriptor(ArticulationDescriptor),
    Other(Value),
}

impl ArticulationInput {
    /// Flatten the input into a list of borrowed entries, in input order.
    pub fn entries(&self) -> Vec<EntryRef<'_>> {
        match self {
            ArticulationInput::Name(name) => vec![EntryRef::Name(name)],
            ArticulationInput::Descriptor(descriptor) => vec![EntryRef::Descriptor(descriptor)],
            ArticulationInput::Other(value) => vec![EntryRef::Other(value)],
            ArticulationInput::List(entries) => entries.iter().map(EntryRef::from).collect(),
        }
    }
}

/// Borrowed view of a single articulation entry, as passed to the normalizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryRef<'a> {
    Name(&'a str),
    Descriptor(&'a ArticulationDescriptor),
    Other(&'a Value),
}

impl<'a> From<&'a ArticulationEntry> for EntryRef<'a> {
    fn from(entry: &'a ArticulationEntry) -> Self {
        match entry {
            ArticulationEntry::Name(name) => EntryRef::Name(name),
            ArticulationEntry::Descriptor(descriptor) => EntryRef::Descriptor(descriptor),
            ArticulationEntry::Other(value) => EntryRef::Other(value),
        }
    }
}

impl From<&str> for ArticulationInput {
    fn from(name: &str) -> Self {
        ArticulationInput::Name(name.to_string())
    }
}

impl From<ArticulationDescriptor> for ArticulationInput {
    fn from(descriptor: ArticulationDescriptor) -> Self {
        ArticulationInput::Descriptor(descriptor)
    }
}

impl From<Vec<&str>> for ArticulationInput {
    fn from(names: Vec<&str>) -> Self {
        ArticulationInput::List(names.into_iter().map(ArticulationEntry::from).collect())
    }
}

impl From<Vec<ArticulationEntry>> for ArticulationInput {
    fn from(entries: Vec<ArticulationEntry>) -> Self {
        ArticulationInput::List(entries)
    }
}
