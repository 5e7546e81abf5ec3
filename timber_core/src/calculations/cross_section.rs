//! # Cross-Section Search
//!
//! Sizes one rectangular section shared by the beam and the column by
//! scanning a fixed width × thickness grid.
//!
//! ## Procedure
//!
//! 1. Widths 65-99 mm (outer loop) and thicknesses 55-149 mm (inner loop),
//!    both in 2 mm steps
//! 2. Each pair is evaluated with [`utilization::evaluate`]
//! 3. The first acceptable pair seeds the collection; every following pair
//!    is kept as-is until ten are collected, which ends the scan
//! 4. The collection is sorted by weight, lightest first
//!
//! Sorting can move the seed away from the front, so the outcome reports it
//! separately.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::calculations::cross_section::{calculate, CrossSectionInput};
//!
//! let rows = calculate(&CrossSectionInput::default()).unwrap();
//! assert_eq!(rows.len(), 10);
//! assert_eq!(rows[0].weight.print_value, "4.50 kg");
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::utilization::{self, FailureMode, MemberLengths, TrialSection, Utilization};
use crate::errors::CalcResult;
use crate::inputs::resolve_length;
use crate::loads::{DesignLoads, LoadInput};
use crate::materials::{TimberInput, TimberProperties};
use crate::report::Metric;
use crate::search::{grid_search, Candidate, CappedCollection, Grid};
use crate::units::{Kilograms, Meters};

/// Trial widths (m)
pub const WIDTH_GRID: Grid = Grid::new(0.065, 0.1, 0.002);

/// Trial thicknesses (m)
pub const THICKNESS_GRID: Grid = Grid::new(0.055, 0.15, 0.002);

/// Maximum number of candidates returned
pub const MAX_CANDIDATES: usize = 10;

/// The `footprint` bundle of a cross-section request.
///
/// ## JSON Example
///
/// ```json
/// { "beam_length": 2.0, "height": 2.0 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintInput {
    /// Beam span in m (default 2)
    pub beam_length: Option<f64>,
    /// Column length in m (default 2)
    pub height: Option<f64>,
}

impl FootprintInput {
    pub fn resolve(&self) -> CalcResult<MemberLengths> {
        Ok(MemberLengths::new(
            resolve_length("beam_length", self.beam_length, 2.0)?,
            resolve_length("height", self.height, 2.0)?,
        ))
    }
}

/// Cross-section request bundles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossSectionInput {
    pub material: TimberInput,
    pub load: LoadInput,
    pub footprint: FootprintInput,
}

/// An evaluated grid point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionCandidate {
    pub section: TrialSection,
    /// Beam span the weight refers to (m)
    pub span: f64,
    /// Beam weight (kg)
    pub weight: f64,
    pub utilization: Utilization,
}

impl Candidate for SectionCandidate {
    fn is_acceptable(&self) -> bool {
        self.utilization.is_acceptable()
    }
}

/// Search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionOutcome {
    /// Collected candidates, lightest first
    pub candidates: Vec<SectionCandidate>,
    /// First collected candidate; acceptable whenever any pair is
    pub seed: Option<SectionCandidate>,
}

impl CrossSectionOutcome {
    /// Output rows in candidate order
    pub fn report(&self) -> Vec<SectionReport> {
        self.candidates.iter().map(SectionReport::from).collect()
    }
}

/// Evaluate one trial section
pub fn evaluate_section(
    material: &TimberProperties,
    loads: &DesignLoads,
    lengths: &MemberLengths,
    section: TrialSection,
) -> SectionCandidate {
    SectionCandidate {
        section,
        span: lengths.beam_span,
        weight: section.weight(material.density, lengths.beam_span),
        utilization: utilization::evaluate(material, loads, &section, lengths),
    }
}

/// Run the grid search.
#[instrument(skip_all, name = "cross_section_search")]
pub fn search(
    material: &TimberProperties,
    loads: &DesignLoads,
    lengths: &MemberLengths,
) -> CrossSectionOutcome {
    let points = WIDTH_GRID
        .iter()
        .flat_map(|w| THICKNESS_GRID.iter().map(move |t| TrialSection::new(w, t)));

    let mut candidates = grid_search(
        points,
        |section| evaluate_section(material, loads, lengths, section),
        CappedCollection::new(MAX_CANDIDATES),
    );
    let seed = candidates.first().copied();

    candidates.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    match &seed {
        Some(s) => info!(
            width_mm = s.section.width * 1000.0,
            thickness_mm = s.section.thickness * 1000.0,
            utilization = s.utilization.overall,
            governing = %s.utilization.governing_mode(),
            count = candidates.len(),
            "Cross-section search complete"
        ),
        None => info!("No acceptable cross-section on the grid"),
    }
    debug!(
        accepted = candidates.iter().filter(|c| c.is_acceptable()).count(),
        "Collected candidates"
    );

    CrossSectionOutcome { candidates, seed }
}

/// Resolve the request bundles and run the search.
pub fn calculate(input: &CrossSectionInput) -> CalcResult<Vec<SectionReport>> {
    let material = input.material.resolve();
    let loads = input.load.resolve();
    let lengths = input.footprint.resolve()?;
    Ok(search(&material, &loads, &lengths).report())
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionReport {
    pub weight: Metric<f64>,
    pub width: Metric<f64>,
    pub thickness: Metric<f64>,
    pub length: Metric<f64>,
    pub bending_utilisation: Metric<f64>,
    pub bending_status: Metric<bool>,
    pub shear_utilisation: Metric<f64>,
    pub shear_status: Metric<bool>,
    pub sls_utilisation: Metric<f64>,
    pub sls_status: Metric<bool>,
    pub compression_utilisation: Metric<f64>,
    pub compression_status: Metric<bool>,
    pub buckling_utilisation_in_plane: Metric<f64>,
    pub buckling_status_in_plane: Metric<bool>,
    pub buckling_utilisation_out_of_plane: Metric<f64>,
    pub buckling_status_out_of_plane: Metric<bool>,
    pub final_utilisation: Metric<f64>,
    pub final_utilisation_status: Metric<bool>,
}

impl From<&SectionCandidate> for SectionReport {
    fn from(c: &SectionCandidate) -> Self {
        let u = &c.utilization;
        let ratio = |mode: FailureMode| Metric::percent(u.ratio(mode));
        let status = |mode: FailureMode| Metric::status(u.accepts(mode));

        SectionReport {
            weight: Metric::kilograms(Kilograms(c.weight)),
            width: Metric::whole_millimeters(Meters(c.section.width).into()),
            thickness: Metric::whole_millimeters(Meters(c.section.thickness).into()),
            length: Metric::meters(Meters(c.span)),
            bending_utilisation: ratio(FailureMode::Bending),
            bending_status: status(FailureMode::Bending),
            shear_utilisation: ratio(FailureMode::Shear),
            shear_status: status(FailureMode::Shear),
            sls_utilisation: ratio(FailureMode::Serviceability),
            sls_status: status(FailureMode::Serviceability),
            compression_utilisation: ratio(FailureMode::Compression),
            compression_status: status(FailureMode::Compression),
            buckling_utilisation_in_plane: ratio(FailureMode::BucklingInPlane),
            buckling_status_in_plane: status(FailureMode::BucklingInPlane),
            buckling_utilisation_out_of_plane: ratio(FailureMode::BucklingOutOfPlane),
            buckling_status_out_of_plane: status(FailureMode::BucklingOutOfPlane),
            final_utilisation: Metric::percent(u.overall),
            final_utilisation_status: Metric::status(u.is_acceptable()),
        }
    }
}
