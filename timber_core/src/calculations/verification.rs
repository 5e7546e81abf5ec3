//! # Design Verification
//!
//! Checks one user-chosen section against the frame of a slab building. The
//! design loads come from the [`LoadCalculator`] run with the timber
//! density, and the section goes through the same
//! [`utilization::evaluate`] the cross-section search uses, so a section
//! verifies exactly when the search would classify it as acceptable.
//!
//! The beam span is the slab length divided between the column pairs:
//! `L = length / (column_number / 2 − 1)`.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::calculations::verification::{calculate, VerifyInput};
//!
//! assert!(calculate(&VerifyInput::default()).unwrap());
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::utilization::{self, MemberLengths, TrialSection, Utilization};
use crate::errors::{CalcError, CalcResult};
use crate::inputs::resolve_length;
use crate::loads::{Building, BuildingInput, DesignLoads, LoadCalculator};
use crate::materials::{TimberInput, TimberProperties};

/// The `cross_section` bundle of a verify request (m).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionInput {
    /// Section width (default 0.1)
    pub beam_w: Option<f64>,
    /// Section depth (default 0.15)
    pub beam_h: Option<f64>,
}

impl SectionInput {
    pub fn resolve(&self) -> CalcResult<TrialSection> {
        Ok(TrialSection::new(
            resolve_length("beam_w", self.beam_w, 0.1)?,
            resolve_length("beam_h", self.beam_h, 0.15)?,
        ))
    }
}

/// Verify request bundles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyInput {
    pub material: TimberInput,
    pub cross_section: SectionInput,
    pub footprint: BuildingInput,
}

/// Beam span and column length for a building frame.
///
/// Needs at least three column pairs' worth of columns: with two or fewer
/// columns the span is unbounded.
pub fn frame_lengths(building: &Building) -> CalcResult<MemberLengths> {
    let pairs_minus_one = building.column_number / 2.0 - 1.0;
    if pairs_minus_one <= 0.0 {
        return Err(CalcError::invalid_input(
            "column_number",
            building.column_number.to_string(),
            "At least three columns are needed to span the slab",
        ));
    }
    Ok(MemberLengths::new(
        building.length / pairs_minus_one,
        building.height,
    ))
}

/// Everything the verification derived
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub section: TrialSection,
    pub lengths: MemberLengths,
    pub loads: DesignLoads,
    pub utilization: Utilization,
}

impl Verification {
    pub fn is_acceptable(&self) -> bool {
        self.utilization.is_acceptable()
    }
}

/// Derive the loads for `building` and evaluate `section` once.
#[instrument(skip_all, name = "verify")]
pub fn verify(
    material: &TimberProperties,
    section: TrialSection,
    building: &Building,
) -> CalcResult<Verification> {
    let lengths = frame_lengths(building)?;
    let loads = LoadCalculator::new(material.density, *building).design_loads()?;
    let utilization = utilization::evaluate(material, &loads, &section, &lengths);
    debug!(
        span = lengths.beam_span,
        utilization = utilization.overall,
        governing = %utilization.governing_mode(),
        "Verified section"
    );
    Ok(Verification {
        section,
        lengths,
        loads,
        utilization,
    })
}

/// Resolve the request bundles; `true` when the section is acceptable.
pub fn calculate(input: &VerifyInput) -> CalcResult<bool> {
    let material = input.material.resolve();
    let section = input.cross_section.resolve()?;
    let building = input.footprint.resolve()?;
    Ok(verify(&material, section, &building)?.is_acceptable())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::cross_section;
    use crate::search::Candidate;

    fn input(beam_w: f64, beam_h: f64) -> VerifyInput {
        VerifyInput {
            cross_section: SectionInput {
                beam_w: Some(beam_w),
                beam_h: Some(beam_h),
            },
            ..VerifyInput::default()
        }
    }

    #[test]
    fn test_default_section_verifies() {
        assert!(calculate(&VerifyInput::default()).unwrap());
    }

    #[test]
    fn test_small_section_fails() {
        assert!(!calculate(&input(0.04, 0.06)).unwrap());
    }

    #[test]
    fn test_span_from_column_count() {
        let lengths = frame_lengths(&Building::default()).unwrap();
        // 4 / (6/2 - 1)
        assert_eq!(lengths.beam_span, 2.0);
        assert_eq!(lengths.column_length, 2.0);

        let eight = Building {
            column_number: 8.0,
            length: 6.0,
            ..Building::default()
        };
        assert_eq!(frame_lengths(&eight).unwrap().beam_span, 3.0);
    }

    #[test]
    fn test_too_few_columns_rejected() {
        for n in [1.0, 2.0] {
            let building = Building {
                column_number: n,
                ..Building::default()
            };
            assert!(frame_lengths(&building).is_err());
        }
        let mut request = VerifyInput::default();
        request.footprint.column_number = Some(2.0);
        assert_eq!(calculate(&request).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_loads_use_timber_density() {
        let v = verify(
            &TimberProperties::default(),
            TrialSection::new(0.1, 0.15),
            &Building::default(),
        )
        .unwrap();
        assert_eq!(v.loads.beam, [3.72, 6.66, 8.93]);
        assert_eq!(v.loads.psi_accompanying, 0.2);
    }

    #[test]
    fn test_agrees_with_grid_search() {
        let material = TimberProperties::default();
        let building = Building::default();
        let reference = verify(&material, TrialSection::new(0.1, 0.15), &building).unwrap();

        let outcome = cross_section::search(&material, &reference.loads, &reference.lengths);
        assert!(!outcome.candidates.is_empty());
        for candidate in &outcome.candidates {
            let request = input(candidate.section.width, candidate.section.thickness);
            assert_eq!(calculate(&request).unwrap(), candidate.is_acceptable());
        }
    }
}
