//! # Dowel Joint Sizing
//!
//! Sizes the timber peg pinning a tie beam into a column tenon through two
//! shear planes. Capacity follows the yield-mode method in imperial units
//! (in, lb, psi); input and output are metric.
//!
//! ## Procedure
//!
//! For every trial diameter `D` from 0.50 in up to a quarter of the column
//! width, in 0.02 in steps:
//!
//! 1. Capacity = weakest of dowel bearing, main member bearing, side
//!    member bearing and double-shear of the peg
//! 2. Equivalent steel bolt diameter `d_eq` for that capacity (largest of
//!    four yield modes)
//! 3. End, spacing, edge and vertical edge distances as multiples of `d_eq`
//! 4. Accept when capacity reaches 1000 lb and the distances fit inside
//!    the column width and the tie beam height
//!
//! The acceptable diameter with the highest capacity wins.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::calculations::dowel::{calculate, DowelInput, DowelJointInput};
//!
//! let input = DowelInput {
//!     cross_section: DowelJointInput {
//!         column_h: Some(100.0),
//!         column_w: Some(112.5),
//!         tie_beam_h: Some(152.4),
//!     },
//!     ..DowelInput::default()
//! };
//! let report = calculate(&input).unwrap().unwrap();
//! assert_eq!(report.d.print_value, "25.91 mm");
//! assert_eq!(report.capacity_kn.print_value, "11.04 kN");
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::CalcResult;
use crate::inputs::resolve_length;
use crate::materials::{DowelDetailing, DowelDetailingInput};
use crate::report::Metric;
use crate::search::{grid_search, BestBy, Candidate};
use crate::units::{Inches, Kilonewtons, Millimeters, Pounds};

/// The `cross_section` bundle of a dowel request (mm).
///
/// Defaults: column width 85, column height 127, tie beam height 190.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DowelJointInput {
    pub column_w: Option<f64>,
    pub column_h: Option<f64>,
    pub tie_beam_h: Option<f64>,
}

impl DowelJointInput {
    pub fn resolve(&self) -> CalcResult<DowelJoint> {
        let mm = |field: &str, value: Option<f64>, default: f64| {
            resolve_length(field, value, default).map(|v| Inches::from(Millimeters(v)))
        };
        Ok(DowelJoint {
            column_width: mm("column_w", self.column_w, 85.0)?,
            column_height: mm("column_h", self.column_h, 127.0)?,
            tie_beam_height: mm("tie_beam_h", self.tie_beam_h, 190.0)?,
        })
    }
}

/// Dowel request bundles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DowelInput {
    /// Only the `dtl_*` keys are read
    pub material: DowelDetailingInput,
    pub cross_section: DowelJointInput,
}

/// Resolved joint geometry (in)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DowelJoint {
    /// Column width `b`; bounds the end and edge distances
    pub column_width: Inches,
    /// Column height `w`; the tenon takes a third of it
    pub column_height: Inches,
    /// Tie beam height `w_t`; bounds spacing and vertical edge distances
    pub tie_beam_height: Inches,
}

impl DowelJoint {
    /// Main and side member thickness `t_m = t_s = w / 3`
    pub fn member_thickness(&self) -> f64 {
        self.column_height.0 / 3.0
    }

    /// Trial diameters (in): 0.50, 0.52, ... up to `b / 4`
    pub fn trial_diameters(&self) -> impl Iterator<Item = f64> {
        let last = ((self.column_width.0 / 4.0) * 100.0).floor() as i64;
        (50..=last).step_by(2).map(|k| k as f64 / 100.0)
    }
}

/// Peg and connection constants (psi, lb)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DowelConstants {
    /// Peg shear strength τ_c
    pub shear_strength: f64,
    /// Dowel bearing strength F_ed
    pub dowel_bearing: f64,
    /// Main member bearing strength F_em
    pub main_bearing: f64,
    /// Side member bearing strength F_es
    pub side_bearing: f64,
    /// Required joint capacity (lb)
    pub required_load: f64,
    /// Equivalence factor K_e
    pub ke: f64,
    /// Bearing strength ratio R_e
    pub re: f64,
    pub k3: f64,
    /// Number of shear planes
    pub shear_planes: f64,
}

impl Default for DowelConstants {
    fn default() -> Self {
        DowelConstants {
            shear_strength: 1518.0,
            dowel_bearing: 2688.0,
            main_bearing: 5488.0,
            side_bearing: 2660.0,
            required_load: 1000.0,
            ke: 0.625,
            re: 2.063,
            k3: 1.3,
            shear_planes: 2.0,
        }
    }
}

/// Minimum placement distances (in)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementLimits {
    pub end: f64,
    pub spacing: f64,
    pub edge: f64,
    pub vertical_edge: f64,
}

impl PlacementLimits {
    pub fn new(detailing: &DowelDetailing, d_eq: f64) -> Self {
        PlacementLimits {
            end: detailing.end * d_eq,
            spacing: detailing.spacing * d_eq,
            edge: detailing.edge * d_eq,
            vertical_edge: detailing.vertical_edge * d_eq,
        }
    }
}

/// An evaluated trial diameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DowelCandidate {
    /// Peg diameter (in)
    pub diameter: f64,
    /// Joint capacity (lb)
    pub capacity: f64,
    /// Equivalent steel bolt diameter (in)
    pub equivalent_diameter: f64,
    pub limits: PlacementLimits,
    pub acceptable: bool,
}

impl Candidate for DowelCandidate {
    fn is_acceptable(&self) -> bool {
        self.acceptable
    }
}

/// Weakest-link capacity of a peg of diameter `d` (lb)
pub fn capacity(c: &DowelConstants, d: f64, t_m: f64, t_s: f64) -> f64 {
    let n = c.shear_planes;
    let dowel_bearing = (n * d * t_m * c.dowel_bearing) / 2.0;
    let main_bearing = (n * d * t_m * c.main_bearing) / 2.0;
    let side_bearing = n * d * t_s * c.side_bearing;
    let peg_shear = (n * PI * d.powi(2) * c.shear_strength) / 4.0;

    dowel_bearing
        .min(main_bearing)
        .min(side_bearing)
        .min(peg_shear)
}

/// Equivalent bolt diameter for a capacity `z` (in)
pub fn equivalent_diameter(c: &DowelConstants, z: f64, t_m: f64, t_s: f64) -> f64 {
    let mode_im = (4.0 * c.ke * z) / (t_m * c.main_bearing);
    let mode_is = (2.0 * c.ke * z) / (t_s * c.side_bearing);
    let mode_iiis = (1.6 * c.ke * z * (2.0 + c.re)) / (c.k3 * t_s * c.main_bearing);
    let mode_iv = ((1.6 * c.ke * z * (3.0 * (1.0 + c.re)).sqrt())
        / (2.0 * c.main_bearing * c.side_bearing).sqrt())
    .sqrt()
        / 2.0;

    mode_im.max(mode_is).max(mode_iiis).max(mode_iv)
}

/// Evaluate one trial diameter
pub fn evaluate_dowel(
    joint: &DowelJoint,
    detailing: &DowelDetailing,
    constants: &DowelConstants,
    diameter: f64,
) -> DowelCandidate {
    let t_m = joint.member_thickness();
    let t_s = t_m;
    let capacity = capacity(constants, diameter, t_m, t_s);
    let d_eq = equivalent_diameter(constants, capacity, t_m, t_s);
    let limits = PlacementLimits::new(detailing, d_eq);

    let acceptable = capacity >= constants.required_load
        && limits.edge + limits.end < joint.column_width.0
        && (2.0 * limits.vertical_edge) + limits.spacing < joint.tie_beam_height.0;

    DowelCandidate {
        diameter,
        capacity,
        equivalent_diameter: d_eq,
        limits,
        acceptable,
    }
}

/// Highest-capacity acceptable diameter, if any.
#[instrument(skip_all, name = "dowel_search")]
pub fn search(detailing: &DowelDetailing, joint: &DowelJoint) -> Option<DowelCandidate> {
    let constants = DowelConstants::default();
    let best = grid_search(
        joint.trial_diameters(),
        |d| evaluate_dowel(joint, detailing, &constants, d),
        BestBy::new(0.0, |c: &DowelCandidate| c.capacity),
    );
    match &best {
        Some(c) => debug!(diameter_in = c.diameter, capacity_lb = c.capacity, "Selected dowel"),
        None => debug!("No acceptable dowel diameter"),
    }
    best
}

/// Resolve the request bundles and run the search.
pub fn calculate(input: &DowelInput) -> CalcResult<Option<DowelReport>> {
    let detailing = input.material.resolve();
    let joint = input.cross_section.resolve()?;
    Ok(search(&detailing, &joint).map(|c| DowelReport::from(&c)))
}

/// Output of a dowel request. Lengths in mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowelReport {
    pub d: Metric<f64>,
    pub lim_e: Metric<f64>,
    pub lim_s: Metric<f64>,
    pub lim_v: Metric<f64>,
    pub lim_g: Metric<f64>,
    #[serde(rename = "capacity_kN")]
    pub capacity_kn: Metric<f64>,
    pub status: Metric<bool>,
}

impl From<&DowelCandidate> for DowelReport {
    fn from(c: &DowelCandidate) -> Self {
        let mm = |inches: f64| Metric::millimeters(Millimeters::from(Inches(inches)));
        DowelReport {
            d: mm(c.diameter),
            lim_e: mm(c.limits.end),
            lim_s: mm(c.limits.spacing),
            lim_v: mm(c.limits.edge),
            lim_g: mm(c.limits.vertical_edge),
            capacity_kn: Metric::kilonewtons(Kilonewtons::from(Pounds(c.capacity))),
            status: Metric::status(c.acceptable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joint(column_h: f64, column_w: f64, tie_beam_h: f64) -> DowelJoint {
        DowelJointInput {
            column_w: Some(column_w),
            column_h: Some(column_h),
            tie_beam_h: Some(tie_beam_h),
        }
        .resolve()
        .unwrap()
    }

    fn report(j: &DowelJoint) -> Option<DowelReport> {
        search(&DowelDetailing::default(), j).map(|c| DowelReport::from(&c))
    }

    #[test]
    fn test_reference_joint() {
        let r = report(&joint(100.0, 112.5, 152.4)).unwrap();
        assert_eq!(r.d.value, 25.91);
        assert_eq!(r.lim_e.value, 54.69);
        assert_eq!(r.lim_s.value, 68.36);
        assert_eq!(r.lim_v.value, 41.02);
        assert_eq!(r.lim_g.value, 41.02);
        assert_eq!(r.capacity_kn.value, 11.04);
        assert_eq!(r.status.print_value, "Acceptable");
    }

    #[test]
    fn test_taller_tie_beam_allows_larger_peg() {
        let r = report(&joint(100.0, 112.5, 190.0)).unwrap();
        assert_eq!(r.d.value, 27.94);
        assert_eq!(r.lim_e.value, 63.6);
        assert_eq!(r.lim_s.value, 79.51);
        assert_eq!(r.lim_v.value, 47.7);
        assert_eq!(r.capacity_kn.value, 12.83);
    }

    #[test]
    fn test_default_joint() {
        let r = calculate(&DowelInput::default()).unwrap().unwrap();
        assert_eq!(r.d.print_value, "20.83 mm");
        assert_eq!(r.lim_e.value, 27.83);
        assert_eq!(r.lim_s.value, 34.79);
        assert_eq!(r.lim_v.value, 20.87);
        assert_eq!(r.capacity_kn.value, 7.13);
    }

    #[test]
    fn test_small_column_has_no_dowel() {
        assert!(report(&joint(30.0, 40.0, 152.4)).is_none());
        let json = serde_json::to_value(report(&joint(30.0, 40.0, 152.4))).unwrap();
        assert!(json.is_null());
    }

    #[test]
    fn test_selected_is_global_maximum() {
        let j = joint(100.0, 112.5, 152.4);
        let detailing = DowelDetailing::default();
        let constants = DowelConstants::default();
        let best = search(&detailing, &j).unwrap();
        for d in j.trial_diameters() {
            let c = evaluate_dowel(&j, &detailing, &constants, d);
            if c.acceptable {
                assert!(c.capacity <= best.capacity);
            }
        }
    }

    #[test]
    fn test_search_is_repeatable() {
        let detailing = DowelDetailing::default();
        for j in [joint(100.0, 112.5, 152.4), joint(30.0, 40.0, 152.4)] {
            let first = search(&detailing, &j);
            let second = search(&detailing, &j);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_trial_diameters() {
        let j = joint(100.0, 112.5, 152.4);
        let ds: Vec<f64> = j.trial_diameters().collect();
        // b = 4.43 in, b/4 = 1.107 => k = 50..=110 step 2
        assert_eq!(ds.len(), 31);
        assert_eq!(ds[0], 0.5);
        assert_eq!(*ds.last().unwrap(), 1.1);
    }

    #[test]
    fn test_json_keys() {
        let r = report(&joint(100.0, 112.5, 152.4)).unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["capacity_kN"]["print_value"], "11.04 kN");
        assert_eq!(json["status"]["value"], true);
    }
}
