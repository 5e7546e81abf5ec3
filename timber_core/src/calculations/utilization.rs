//! # Utilization Model
//!
//! Turns material constants, design loads and a trial rectangular section
//! into utilization ratios (percent) for six failure modes:
//!
//! | Mode | Member | Load |
//! |------|--------|------|
//! | Bending | beam | P_L, M_L, I_L |
//! | Shear | beam | P_L, M_L, I_L |
//! | Deflection (SLS) | beam | SLS_L, gk, g_lead, g_acmp |
//! | Compression | column | P_clm, M_clm, I_clm |
//! | Buckling in plane | column | P_clm |
//! | Buckling out of plane | column | P_clm |
//!
//! The same section sizes the beam and the column. A ratio below 100 passes;
//! exactly 100 fails.
//!
//! ## Units
//!
//! Sections and spans in m, second moments of area in mm⁴, line loads in
//! kN/m, axial loads in kN, strengths in MPa. The 10³, 10⁶ and 10¹² factors
//! below are the conversions between those.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::calculations::utilization::{evaluate, MemberLengths, TrialSection};
//! use timber_core::loads::DesignLoads;
//! use timber_core::materials::TimberProperties;
//!
//! let u = evaluate(
//!     &TimberProperties::default(),
//!     &DesignLoads::default(),
//!     &TrialSection::new(0.1, 0.15),
//!     &MemberLengths::new(2.0, 2.0),
//! );
//! assert!(u.is_acceptable());
//! assert!((u.overall - 51.3889).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{
    buckling_reduction, deflection_limit, instability_factor, radius_of_gyration,
    rectangular_area, rectangular_moment_of_inertia, rectangular_shear_stress,
    relative_slenderness, slenderness_ratio, uniform_load_max_deflection,
    uniform_load_max_moment, uniform_load_reaction,
};
use crate::loads::DesignLoads;
use crate::materials::{LoadDuration, TimberProperties};

/// Utilization at or above this percentage fails
pub const UTILIZATION_LIMIT: f64 = 100.0;

/// Instantaneous deflection limit L/300
pub const INSTANTANEOUS_DEFLECTION_RATIO: f64 = 300.0;

/// Final deflection limit L/150
pub const FINAL_DEFLECTION_RATIO: f64 = 150.0;

/// Whether a utilization ratio passes
#[inline]
pub fn passes(ratio: f64) -> bool {
    ratio < UTILIZATION_LIMIT
}

/// Rectangular trial section (m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialSection {
    /// Width W
    pub width: f64,
    /// Thickness T, the beam depth
    pub thickness: f64,
}

impl TrialSection {
    pub fn new(width: f64, thickness: f64) -> Self {
        TrialSection { width, thickness }
    }

    /// Cross-sectional area (m²)
    pub fn area(&self) -> f64 {
        rectangular_area(self.width, self.thickness)
    }

    /// Strong-axis second moment of area I_y (mm⁴)
    pub fn i_y(&self) -> f64 {
        rectangular_moment_of_inertia(self.width * 1000.0, self.thickness * 1000.0)
    }

    /// Weak-axis second moment of area I_z (mm⁴)
    pub fn i_z(&self) -> f64 {
        rectangular_moment_of_inertia(self.thickness * 1000.0, self.width * 1000.0)
    }

    /// Mass of a member of the given length (kg)
    pub fn weight(&self, density: f64, length: f64) -> f64 {
        density * (length * self.width * self.thickness)
    }
}

/// Beam span and column buckling length (m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberLengths {
    pub beam_span: f64,
    pub column_length: f64,
}

impl MemberLengths {
    pub fn new(beam_span: f64, column_length: f64) -> Self {
        MemberLengths {
            beam_span,
            column_length,
        }
    }
}

/// Failure modes checked by [`evaluate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureMode {
    Bending,
    Shear,
    Serviceability,
    Compression,
    BucklingInPlane,
    BucklingOutOfPlane,
}

impl FailureMode {
    pub const ALL: [FailureMode; 6] = [
        FailureMode::Bending,
        FailureMode::Shear,
        FailureMode::Serviceability,
        FailureMode::Compression,
        FailureMode::BucklingInPlane,
        FailureMode::BucklingOutOfPlane,
    ];
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureMode::Bending => "bending",
            FailureMode::Shear => "shear",
            FailureMode::Serviceability => "deflection",
            FailureMode::Compression => "compression",
            FailureMode::BucklingInPlane => "buckling in plane",
            FailureMode::BucklingOutOfPlane => "buckling out of plane",
        };
        write!(f, "{}", name)
    }
}

/// Utilization ratios in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Utilization {
    pub bending: f64,
    pub shear: f64,
    pub serviceability: f64,
    pub compression: f64,
    pub buckling_in_plane: f64,
    pub buckling_out_of_plane: f64,
    /// Maximum of the six ratios
    pub overall: f64,
}

impl Utilization {
    /// Build from the six ratios; `overall` is their maximum.
    ///
    /// A NaN ratio (buckling outside the instability-factor method's range)
    /// makes `overall` NaN, so the section is rejected.
    pub fn from_ratios(
        bending: f64,
        shear: f64,
        serviceability: f64,
        compression: f64,
        buckling_in_plane: f64,
        buckling_out_of_plane: f64,
    ) -> Self {
        let ratios = [
            bending,
            shear,
            serviceability,
            compression,
            buckling_in_plane,
            buckling_out_of_plane,
        ];
        let overall = if ratios.iter().any(|r| r.is_nan()) {
            f64::NAN
        } else {
            ratios.into_iter().fold(f64::NEG_INFINITY, f64::max)
        };

        Utilization {
            bending,
            shear,
            serviceability,
            compression,
            buckling_in_plane,
            buckling_out_of_plane,
            overall,
        }
    }

    pub fn ratio(&self, mode: FailureMode) -> f64 {
        match mode {
            FailureMode::Bending => self.bending,
            FailureMode::Shear => self.shear,
            FailureMode::Serviceability => self.serviceability,
            FailureMode::Compression => self.compression,
            FailureMode::BucklingInPlane => self.buckling_in_plane,
            FailureMode::BucklingOutOfPlane => self.buckling_out_of_plane,
        }
    }

    /// Whether a single mode passes
    pub fn accepts(&self, mode: FailureMode) -> bool {
        passes(self.ratio(mode))
    }

    /// Overall pass: every ratio below the limit
    pub fn is_acceptable(&self) -> bool {
        passes(self.overall)
    }

    /// Mode with the highest ratio (first one on ties); a NaN ratio governs.
    pub fn governing_mode(&self) -> FailureMode {
        if let Some(mode) = FailureMode::ALL.into_iter().find(|m| self.ratio(*m).is_nan()) {
            return mode;
        }
        FailureMode::ALL
            .into_iter()
            .fold(FailureMode::Bending, |best, mode| {
                if self.ratio(mode) > self.ratio(best) {
                    mode
                } else {
                    best
                }
            })
    }
}

fn max_over_durations(f: impl Fn(LoadDuration) -> f64) -> f64 {
    LoadDuration::ALL
        .into_iter()
        .map(f)
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Evaluate all six failure modes for one trial section.
///
/// Pure and infallible.
pub fn evaluate(
    material: &TimberProperties,
    loads: &DesignLoads,
    section: &TrialSection,
    lengths: &MemberLengths,
) -> Utilization {
    let strengths = material.design_strengths();
    let l = lengths.beam_span;
    let w = section.width;
    let h = section.thickness;
    let i_y = section.i_y();
    let i_z = section.i_z();

    // Beam bending and shear
    let bending = max_over_durations(|d| {
        let m_d = uniform_load_max_moment(loads.beam(d), l);
        (m_d / i_y) * (h * 1000.0 / 2.0) * 1e6 / strengths.bending(d)
    }) * 100.0;

    let shear = max_over_durations(|d| {
        let tau = rectangular_shear_stress(uniform_load_reaction(loads.beam(d), l), w * h) / 1000.0;
        tau / strengths.shear(d)
    }) * 100.0;

    // Beam deflection with creep
    let deflection = |load: f64| 1e6 * uniform_load_max_deflection(load, l, material.e_mean, i_y);
    let k_def = material.creep_factor;
    let delta_inst = deflection(loads.serviceability);
    let delta_creep_g = deflection(loads.permanent) * k_def;
    let delta_creep_lead = deflection(loads.leading) * k_def * loads.psi_leading;
    let delta_creep_acmp = deflection(loads.accompanying) * k_def * loads.psi_accompanying;
    let delta_fin = delta_inst + delta_creep_g + delta_creep_lead + delta_creep_acmp;

    let inst = delta_inst / deflection_limit(l, INSTANTANEOUS_DEFLECTION_RATIO) * 100.0;
    let fin = delta_fin / deflection_limit(l, FINAL_DEFLECTION_RATIO) * 100.0;
    let serviceability = inst.max(fin);

    // Column compression
    let stress = |n: f64| n / (section.area() * 1e3);
    let compression = max_over_durations(|d| {
        stress(loads.column(d)) / strengths.compression(d)
    }) * 100.0;

    // Column buckling about both axes under the permanent column load
    let sigma_permanent = stress(loads.column(LoadDuration::Permanent));
    let fc_d_medium = strengths.compression(LoadDuration::Medium);
    let area_scaled = section.area() * 1e12;
    let buckling = |i: f64| {
        let lambda = slenderness_ratio(lengths.column_length, radius_of_gyration(i, area_scaled));
        let lambda_rel = relative_slenderness(lambda, material.compression_strength, material.e_05);
        let k = instability_factor(lambda_rel, material.instability_coefficient);
        let k_c = buckling_reduction(k, lambda_rel);
        (sigma_permanent / (k_c * fc_d_medium)) * 100.0
    };
    let buckling_in_plane = buckling(i_y);
    let buckling_out_of_plane = buckling(i_z);

    Utilization::from_ratios(
        bending,
        shear,
        serviceability,
        compression,
        buckling_in_plane,
        buckling_out_of_plane,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    fn defaults(section: TrialSection) -> Utilization {
        evaluate(
            &TimberProperties::default(),
            &DesignLoads::default(),
            &section,
            &MemberLengths::new(2.0, 2.0),
        )
    }

    #[test]
    fn test_default_section_ratios() {
        let u = defaults(TrialSection::new(0.1, 0.15));
        assert_close(u.bending, 21.8022);
        assert_close(u.shear, 16.5333);
        assert_close(u.serviceability, 51.3889);
        assert_close(u.compression, 2.72593);
        assert_close(u.buckling_in_plane, 1.48322);
        assert_close(u.buckling_out_of_plane, 2.56288);
        assert_close(u.overall, 51.3889);
        assert_eq!(u.governing_mode(), FailureMode::Serviceability);
    }

    #[test]
    fn test_lightest_passing_section() {
        let u = defaults(TrialSection::new(0.065, 0.139));
        assert_close(u.bending, 39.0607);
        assert_close(u.shear, 27.4488);
        assert_close(u.serviceability, 99.35398);
        assert_close(u.compression, 4.52561);
        assert_close(u.buckling_in_plane, 2.65656);
        assert_close(u.buckling_out_of_plane, 9.25635);
        assert!(u.is_acceptable());

        let thinner = defaults(TrialSection::new(0.065, 0.137));
        assert_close(thinner.overall, 103.769);
        assert!(!thinner.is_acceptable());
        assert!(!thinner.accepts(FailureMode::Serviceability));
        assert!(thinner.accepts(FailureMode::Bending));
    }

    #[test]
    fn test_overall_is_max_of_six() {
        let u = defaults(TrialSection::new(0.067, 0.055));
        let max = FailureMode::ALL
            .iter()
            .map(|m| u.ratio(*m))
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(u.overall, max);
        assert!(!u.is_acceptable());
    }

    #[test]
    fn test_limit_is_strict() {
        let at_limit = Utilization::from_ratios(100.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(!at_limit.is_acceptable());
        assert!(!at_limit.accepts(FailureMode::Bending));

        let below = Utilization::from_ratios(99.999, 10.0, 20.0, 0.0, 0.0, 0.0);
        assert!(below.is_acceptable());
    }

    #[test]
    fn test_buckling_out_of_range_rejects_section() {
        let material = TimberProperties {
            instability_coefficient: 5.0,
            ..TimberProperties::default()
        };
        let u = evaluate(
            &material,
            &DesignLoads::default(),
            &TrialSection::new(0.1, 0.15),
            &MemberLengths::new(2.0, 0.2),
        );
        assert!(u.buckling_in_plane.is_nan());
        assert!(u.buckling_out_of_plane.is_nan());
        assert!(u.overall.is_nan());
        assert!(!u.is_acceptable());
        assert_eq!(u.governing_mode(), FailureMode::BucklingInPlane);

        let all_pass = FailureMode::ALL.iter().all(|m| u.accepts(*m));
        assert_eq!(u.is_acceptable(), all_pass);
    }

    #[test]
    fn test_nan_ratio_propagates_to_overall() {
        let u = Utilization::from_ratios(10.0, 20.0, 30.0, 40.0, f64::NAN, 50.0);
        assert!(u.overall.is_nan());
        assert!(!u.is_acceptable());
        assert_eq!(u.governing_mode(), FailureMode::BucklingInPlane);
    }

    #[test]
    fn test_weight() {
        let section = TrialSection::new(0.065, 0.139);
        assert_close(section.weight(610.0, 2.0), 11.0227);
    }

    #[test]
    fn test_ratios_non_negative() {
        let u = defaults(TrialSection::new(0.099, 0.149));
        for mode in FailureMode::ALL {
            assert!(u.ratio(mode) >= 0.0, "{mode} = {}", u.ratio(mode));
        }
    }
}
