//! # Materials
//!
//! Solid timber strength class and dowel detailing rules.
//!
//! - [`TimberInput`] is the flat `material` bundle as received; every field
//!   is optional.
//! - [`TimberProperties`] is the resolved, immutable set of constants the
//!   utilization model works with.
//! - [`DesignStrengths`] holds the nine duration-dependent design values.
//! - [`detailing`] holds the dowel placement multipliers.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::materials::{LoadDuration, TimberInput};
//!
//! let props = TimberInput::default().resolve();
//! assert_eq!(props.partial_factor, 1.3);
//! assert_eq!(props.density, 610.0);
//!
//! let strengths = props.design_strengths();
//! // f_m,d = kmod * f_m,k / gamma_M = 0.5 * 91 / 1.3 = 35.0
//! assert!((strengths.bending(LoadDuration::Permanent) - 35.0).abs() < 1e-9);
//! ```

pub mod detailing;

pub use detailing::{DowelDetailing, DowelDetailingInput};

use serde::{Deserialize, Serialize};

use crate::inputs::or_default;

/// Load-duration class used to pick a modification factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadDuration {
    /// Permanent actions (self-weight)
    Permanent,
    /// Medium-term actions (imposed load)
    Medium,
    /// Instantaneous actions (wind, snow peaks)
    Instantaneous,
}

impl LoadDuration {
    /// All duration classes in the order the checks walk them
    pub const ALL: [LoadDuration; 3] = [
        LoadDuration::Permanent,
        LoadDuration::Medium,
        LoadDuration::Instantaneous,
    ];

    fn index(self) -> usize {
        match self {
            LoadDuration::Permanent => 0,
            LoadDuration::Medium => 1,
            LoadDuration::Instantaneous => 2,
        }
    }
}

/// The `material` input bundle.
///
/// Keys match the request payload. Absent or zero values take the
/// defaults listed on [`TimberProperties`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "partial_factor": 1.3,
///   "density": 610,
///   "bending_strength": 91,
///   "e_modulus": 11.2
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimberInput {
    pub partial_factor: Option<f64>,
    pub density: Option<f64>,
    pub bending_strength: Option<f64>,
    pub shear_strength: Option<f64>,
    pub compression_parallel: Option<f64>,
    pub e_modulus: Option<f64>,
    pub e_modulus_5: Option<f64>,
    pub modification_factor_permanent_term: Option<f64>,
    pub modification_factor_medium_term: Option<f64>,
    pub modification_factor_instantaneous_term: Option<f64>,
    pub creep_factor: Option<f64>,
    pub creep_factor_solid_timber: Option<f64>,
}

impl TimberInput {
    /// Substitute defaults for every absent or zero field.
    pub fn resolve(&self) -> TimberProperties {
        let d = TimberProperties::default();
        TimberProperties {
            partial_factor: or_default(self.partial_factor, d.partial_factor),
            density: or_default(self.density, d.density),
            bending_strength: or_default(self.bending_strength, d.bending_strength),
            shear_strength: or_default(self.shear_strength, d.shear_strength),
            compression_strength: or_default(self.compression_parallel, d.compression_strength),
            e_mean: or_default(self.e_modulus, d.e_mean),
            e_05: or_default(self.e_modulus_5, d.e_05),
            kmod: [
                or_default(self.modification_factor_permanent_term, d.kmod[0]),
                or_default(self.modification_factor_medium_term, d.kmod[1]),
                or_default(self.modification_factor_instantaneous_term, d.kmod[2]),
            ],
            creep_factor: or_default(self.creep_factor, d.creep_factor),
            instability_coefficient: or_default(
                self.creep_factor_solid_timber,
                d.instability_coefficient,
            ),
        }
    }
}

/// Resolved solid timber constants.
///
/// Strengths in MPa, moduli in GPa-scaled units as the formulas expect,
/// density in kg/m³.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimberProperties {
    /// Partial safety factor γ_M
    pub partial_factor: f64,
    /// Density ρ (kg/m³)
    pub density: f64,
    /// Characteristic bending strength f_m,k
    pub bending_strength: f64,
    /// Characteristic shear strength f_v,k
    pub shear_strength: f64,
    /// Characteristic compression strength parallel to grain f_c,0,k
    pub compression_strength: f64,
    /// Mean modulus of elasticity used for deflection
    pub e_mean: f64,
    /// Fifth-percentile modulus E_0,05 used for buckling
    pub e_05: f64,
    /// Modification factors k_mod indexed by [`LoadDuration`]
    pub kmod: [f64; 3],
    /// Creep factor k_def
    pub creep_factor: f64,
    /// Straightness coefficient β_c for solid timber
    pub instability_coefficient: f64,
}

impl Default for TimberProperties {
    fn default() -> Self {
        TimberProperties {
            partial_factor: 1.3,
            density: 610.0,
            bending_strength: 91.0,
            shear_strength: 9.0,
            compression_strength: 45.0,
            e_mean: 11.2,
            e_05: 11.2,
            kmod: [0.5, 0.65, 0.9],
            creep_factor: 2.0,
            instability_coefficient: 0.2,
        }
    }
}

impl TimberProperties {
    /// Modification factor for a duration class
    pub fn kmod(&self, duration: LoadDuration) -> f64 {
        self.kmod[duration.index()]
    }

    /// Design value `kmod × f_k / γ_M`
    fn design_value(&self, duration: LoadDuration, characteristic: f64) -> f64 {
        (self.kmod(duration) * characteristic) / self.partial_factor
    }

    /// Derive the nine design strengths.
    pub fn design_strengths(&self) -> DesignStrengths {
        let by_duration =
            |f_k: f64| LoadDuration::ALL.map(|duration| self.design_value(duration, f_k));
        DesignStrengths {
            bending: by_duration(self.bending_strength),
            shear: by_duration(self.shear_strength),
            compression: by_duration(self.compression_strength),
        }
    }
}

/// Design strengths for bending, shear and compression per duration class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignStrengths {
    pub bending: [f64; 3],
    pub shear: [f64; 3],
    pub compression: [f64; 3],
}

impl DesignStrengths {
    pub fn bending(&self, duration: LoadDuration) -> f64 {
        self.bending[duration.index()]
    }

    pub fn shear(&self, duration: LoadDuration) -> f64 {
        self.shear[duration.index()]
    }

    pub fn compression(&self, duration: LoadDuration) -> f64 {
        self.compression[duration.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve() {
        let props = TimberInput::default().resolve();
        assert_eq!(props, TimberProperties::default());
        assert_eq!(props.kmod(LoadDuration::Medium), 0.65);
    }

    #[test]
    fn test_zero_is_treated_as_missing() {
        let input = TimberInput {
            density: Some(0.0),
            bending_strength: Some(24.0),
            ..Default::default()
        };
        let props = input.resolve();
        assert_eq!(props.density, 610.0);
        assert_eq!(props.bending_strength, 24.0);
    }

    #[test]
    fn test_design_strengths() {
        let s = TimberProperties::default().design_strengths();
        // f_v,d,medium = 0.65 * 9 / 1.3 = 4.5
        assert!((s.shear(LoadDuration::Medium) - 4.5).abs() < 1e-9);
        // f_c,d,instantaneous = 0.9 * 45 / 1.3 = 31.15
        assert!((s.compression(LoadDuration::Instantaneous) - 31.1538).abs() < 1e-3);
        // f_m,d,medium = 0.65 * 91 / 1.3 = 45.5
        assert!((s.bending(LoadDuration::Medium) - 45.5).abs() < 1e-9);
    }

    #[test]
    fn test_json_keys() {
        let input: TimberInput =
            serde_json::from_str(r#"{"modification_factor_medium_term": 0.8, "creep_factor": null}"#)
                .unwrap();
        assert_eq!(input.modification_factor_medium_term, Some(0.8));
        let props = input.resolve();
        assert_eq!(props.kmod(LoadDuration::Medium), 0.8);
        assert_eq!(props.creep_factor, 2.0);
    }
}
