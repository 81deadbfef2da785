//! Merges the partial contributions of a single note into final modulation events.

use serde::Serialize;

use crate::{
    articulation::SimpleArticulation,
    compiler::rules::Contribution,
    config::CoefficientTable,
    diagnostic::{DiagnosticKind, Diagnostics},
    modulation::{ModulationEvent, PitchGlide},
};

// -------------------------------------------------------------------------------------------------

/// Phrasing articulation on the note at `index`, passed through for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PhrasingMark {
    pub index: usize,
    pub articulation: SimpleArticulation,
}

/// Resolved modulations of a single note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedNote {
    /// At most one event per type, ordered duration, velocity, pitch.
    pub events: Vec<ModulationEvent>,
    pub phrasing: Vec<PhrasingMark>,
}

// -------------------------------------------------------------------------------------------------

/// Merge all `contributions` of the note at `index`.
///
/// Duration factors multiply and velocity boosts add up, both in contribution order. The first
/// pitch glide wins, later ones get dropped with a diagnostic.
pub fn resolve(
    index: usize,
    contributions: &[Contribution],
    coefficients: &CoefficientTable,
    diagnostics: &mut Diagnostics,
) -> ResolvedNote {
    let mut duration_factor: Option<f64> = None;
    let mut velocity_boost: Option<f64> = None;
    let mut pitch_glide: Option<PitchGlide> = None;
    let mut phrasing = Vec::new();

    for contribution in contributions {
        match *contribution {
            Contribution::DurationScale(factor) => {
                duration_factor = Some(duration_factor.unwrap_or(1.0) * factor);
            }
            Contribution::VelocityBoost(boost) => {
                velocity_boost = Some(velocity_boost.unwrap_or(0.0) + boost);
            }
            Contribution::Pitch(glide) => {
                if let Some(applied) = pitch_glide {
                    diagnostics.push(
                        index,
                        DiagnosticKind::PitchConflict,
                        format!("dropping {}: note already has a {}", glide, applied),
                    );
                } else {
                    pitch_glide = Some(glide);
                }
            }
            Contribution::Phrasing(articulation) => {
                let mark = PhrasingMark {
                    index,
                    articulation,
                };
                if !phrasing.contains(&mark) {
                    phrasing.push(mark);
                }
            }
        }
    }

    let mut events = Vec::with_capacity(3);
    if let Some(factor) = duration_factor {
        // unvalidated configs may carry a non positive or NaN floor
        let floor = coefficients.min_duration_factor;
        let floor = if floor.is_finite() && floor > 0.0 {
            floor
        } else {
            CoefficientTable::MIN_DURATION_FACTOR
        };
        // also catches NaN factors
        let factor = if factor > floor { factor } else { floor };
        events.push(ModulationEvent::DurationScale { index, factor });
    }
    if let Some(boost) = velocity_boost {
        let amount_boost = if boost > 0.0 { boost } else { 0.0 };
        events.push(ModulationEvent::VelocityBoost {
            index,
            amount_boost,
        });
    }
    if let Some(glide) = pitch_glide {
        events.push(ModulationEvent::new_pitch(index, glide));
    }
    ResolvedNote { events, phrasing }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::articulation::GlideKind;
    use pretty_assertions::assert_eq;

    fn resolve_contributions(contributions: &[Contribution]) -> (ResolvedNote, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let resolved = resolve(
            4,
            contributions,
            &CoefficientTable::default(),
            &mut diagnostics,
        );
        (resolved, diagnostics)
    }

    fn glide(to: u8) -> Contribution {
        Contribution::Pitch(PitchGlide {
            subtype: GlideKind::Glissando,
            from: 60,
            to,
        })
    }

    #[test]
    fn nothing_to_resolve() {
        let (resolved, diagnostics) = resolve_contributions(&[]);
        assert_eq!(resolved, ResolvedNote::default());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn duration_factors_multiply() {
        let (resolved, _) = resolve_contributions(&[
            Contribution::DurationScale(0.5),
            Contribution::DurationScale(1.5),
        ]);
        assert_eq!(
            resolved.events,
            vec![ModulationEvent::DurationScale {
                index: 4,
                factor: 0.75
            }]
        );
    }

    #[test]
    fn duration_factor_floor() {
        let (resolved, _) = resolve_contributions(&[
            Contribution::DurationScale(0.5),
            Contribution::DurationScale(0.0),
        ]);
        assert_eq!(
            resolved.events,
            vec![ModulationEvent::DurationScale {
                index: 4,
                factor: CoefficientTable::MIN_DURATION_FACTOR
            }]
        );
        let (resolved, _) = resolve_contributions(&[Contribution::DurationScale(-2.0)]);
        assert_eq!(
            resolved.events,
            vec![ModulationEvent::DurationScale {
                index: 4,
                factor: CoefficientTable::MIN_DURATION_FACTOR
            }]
        );
    }

    #[test]
    fn invalid_duration_floor() {
        for min_duration_factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let coefficients = CoefficientTable {
                staccato_duration_factor: 0.0,
                min_duration_factor,
                ..CoefficientTable::default()
            };
            let mut diagnostics = Diagnostics::new();
            let resolved = resolve(
                0,
                &[Contribution::DurationScale(
                    coefficients.staccato_duration_factor,
                )],
                &coefficients,
                &mut diagnostics,
            );
            assert_eq!(
                resolved.events,
                vec![ModulationEvent::DurationScale {
                    index: 0,
                    factor: CoefficientTable::MIN_DURATION_FACTOR
                }]
            );
        }
    }

    #[test]
    fn velocity_boosts_add_up() {
        let (resolved, _) = resolve_contributions(&[
            Contribution::VelocityBoost(1.0),
            Contribution::VelocityBoost(0.5),
        ]);
        assert_eq!(
            resolved.events,
            vec![ModulationEvent::VelocityBoost {
                index: 4,
                amount_boost: 1.5
            }]
        );
        let (resolved, _) = resolve_contributions(&[
            Contribution::VelocityBoost(0.25),
            Contribution::VelocityBoost(-1.0),
        ]);
        assert_eq!(
            resolved.events,
            vec![ModulationEvent::VelocityBoost {
                index: 4,
                amount_boost: 0.0
            }]
        );
    }

    #[test]
    fn first_pitch_glide_wins() {
        let (resolved, diagnostics) = resolve_contributions(&[glide(67), glide(72)]);
        assert_eq!(
            resolved.events,
            vec![ModulationEvent::Pitch {
                index: 4,
                subtype: GlideKind::Glissando,
                from: 60,
                to: 67
            }]
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.contains(4, DiagnosticKind::PitchConflict));
    }

    #[test]
    fn fixed_event_order() {
        let (resolved, _) = resolve_contributions(&[
            glide(62),
            Contribution::Phrasing(SimpleArticulation::Legato),
            Contribution::VelocityBoost(1.0),
            Contribution::DurationScale(0.5),
            Contribution::Phrasing(SimpleArticulation::Legato),
        ]);
        let types = resolved
            .events
            .iter()
            .map(|e| e.modulation_type())
            .collect::<Vec<_>>();
        assert!(types.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(types.len(), 3);
        assert_eq!(
            resolved.phrasing,
            vec![PhrasingMark {
                index: 4,
                articulation: SimpleArticulation::Legato
            }]
        );
    }
}
