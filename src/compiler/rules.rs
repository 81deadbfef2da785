//! Maps normalized articulation specs to partial modulation contributions.

use crate::{
    articulation::{ArticulationSpec, ComplexArticulation, SimpleArticulation},
    config::CoefficientTable,
    diagnostic::{DiagnosticKind, Diagnostics},
    modulation::PitchGlide,
    note::Note,
};

// -------------------------------------------------------------------------------------------------

/// A single, not yet merged effect of one articulation spec on one note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contribution {
    DurationScale(f64),
    VelocityBoost(f64),
    Pitch(PitchGlide),
    /// Phrasing metadata without quantitative effect, passed through to renderers.
    Phrasing(SimpleArticulation),
}

// -------------------------------------------------------------------------------------------------

/// Applies the coefficient model to articulation specs.
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'a> {
    coefficients: &'a CoefficientTable,
}

impl<'a> RuleEngine<'a> {
    pub fn new(coefficients: &'a CoefficientTable) -> Self {
        Self { coefficients }
    }

    /// Collect contributions of all `specs` of the note at `index`, in spec order.
    pub fn contributions(
        &self,
        index: usize,
        note: &Note,
        specs: &[ArticulationSpec],
        diagnostics: &mut Diagnostics,
    ) -> Vec<Contribution> {
        let mut contributions = Vec::with_capacity(specs.len() * 2);
        for spec in specs {
            match spec {
                ArticulationSpec::Simple(simple) => {
                    self.simple_contributions(*simple, &mut contributions);
                }
                ArticulationSpec::Complex(complex) => {
                    if let Some(contribution) =
                        self.complex_contribution(index, note, complex, diagnostics)
                    {
                        contributions.push(contribution);
                    }
                }
            }
        }
        contributions
    }

    fn simple_contributions(
        &self,
        articulation: SimpleArticulation,
        contributions: &mut Vec<Contribution>,
    ) {
        let coefficients = self.coefficients;
        match articulation {
            SimpleArticulation::Staccato => {
                contributions.push(Contribution::DurationScale(
                    coefficients.staccato_duration_factor,
                ));
            }
            SimpleArticulation::Tenuto => {
                contributions.push(Contribution::DurationScale(
                    coefficients.tenuto_duration_factor,
                ));
                contributions.push(Contribution::VelocityBoost(
                    CoefficientTable::velocity_boost(coefficients.tenuto_velocity_factor),
                ));
            }
            SimpleArticulation::Accent => {
                contributions.push(Contribution::VelocityBoost(
                    CoefficientTable::velocity_boost(coefficients.accent_velocity_factor),
                ));
            }
            SimpleArticulation::Marcato => {
                self.simple_contributions(SimpleArticulation::Accent, contributions);
                self.simple_contributions(SimpleArticulation::Tenuto, contributions);
            }
            SimpleArticulation::Legato => {
                contributions.push(Contribution::Phrasing(articulation));
            }
        }
    }

    fn complex_contribution(
        &self,
        index: usize,
        note: &Note,
        articulation: &ComplexArticulation,
        diagnostics: &mut Diagnostics,
    ) -> Option<Contribution> {
        match *articulation {
            ComplexArticulation::Glide { kind, target } => match note.primary_pitch() {
                Some(from) => Some(Contribution::Pitch(PitchGlide {
                    subtype: kind,
                    from,
                    to: target,
                })),
                None => {
                    diagnostics.push(
                        index,
                        DiagnosticKind::RestPitchModulation,
                        format!("ignoring {} on a rest", kind),
                    );
                    None
                }
            },
        }
    }
}

// --------------------------------------------------------------------------------------------------
