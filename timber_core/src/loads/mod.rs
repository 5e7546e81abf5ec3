//! Design loads and the load-combination supplier
//!
//! The utilization model consumes a [`DesignLoads`] value: twelve scalars
//! already combined per load-duration class. They either come straight from
//! the `load` request bundle ([`LoadInput`]) or are produced by the
//! [`LoadCalculator`] from a building footprint.
//!
//! # Overview
//!
//! - [`LoadType`] - Characteristic actions (G, Q, S, W)
//! - [`LoadCase`] - Characteristic action values for one member
//! - [`LoadCombination`] - Factored sums of actions
//! - [`wind`] - Peak velocity pressure and zone pressures
//! - [`LoadCalculator`] - Beam and column combination envelopes
//!
//! # Example
//!
//! ```
//! use timber_core::loads::{LoadInput, DesignLoads};
//! use timber_core::materials::LoadDuration;
//!
//! let loads = LoadInput::default().resolve();
//! assert_eq!(loads, DesignLoads::default());
//! assert_eq!(loads.beam(LoadDuration::Medium), 7.44);
//! assert_eq!(loads.column(LoadDuration::Instantaneous), 7.0);
//! ```

pub mod calculator;
pub mod combinations;
pub mod load_types;
pub mod wind;

pub use calculator::{BuildingInput, Building, LoadCalculator, LoadReport, SiteConstants};
pub use combinations::{
    find_governing_combination, sls_characteristic, uls_instantaneous, uls_medium_term,
    uls_permanent, CombinationFactors, LoadCombination,
};
pub use load_types::LoadType;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::inputs::or_default;
use crate::materials::LoadDuration;

/// Characteristic action values for one member
///
/// # Example
/// ```
/// use timber_core::loads::{LoadCase, LoadType};
///
/// let case = LoadCase::new("Beam")
///     .with_load(LoadType::Dead, 2.03)
///     .with_load(LoadType::Wind, 1.13);
///
/// assert_eq!(case.get(LoadType::Dead), 2.03);
/// assert_eq!(case.get(LoadType::Snow), 0.0);  // Not specified, defaults to 0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    /// Label for this load case
    pub label: String,

    /// Action values keyed by type (kN/m for beams, kN for columns)
    pub loads: HashMap<LoadType, f64>,
}

impl LoadCase {
    pub fn new(label: impl Into<String>) -> Self {
        LoadCase {
            label: label.into(),
            loads: HashMap::new(),
        }
    }

    /// Add or update a load value (builder pattern)
    pub fn with_load(mut self, load_type: LoadType, value: f64) -> Self {
        self.loads.insert(load_type, value);
        self
    }

    /// Get the load value for a type, defaulting to 0.0 if not set
    pub fn get(&self, load_type: LoadType) -> f64 {
        self.loads.get(&load_type).copied().unwrap_or(0.0)
    }
}

/// The `load` input bundle.
///
/// Keys match the request payload (`P_L`, `M_L`, ...). Absent or zero
/// values take the defaults on [`DesignLoads`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadInput {
    #[serde(rename = "P_L")]
    pub permanent_beam: Option<f64>,
    #[serde(rename = "M_L")]
    pub medium_beam: Option<f64>,
    #[serde(rename = "I_L")]
    pub instantaneous_beam: Option<f64>,
    #[serde(rename = "SLS_L")]
    pub serviceability_beam: Option<f64>,
    pub gk: Option<f64>,
    pub g_lead: Option<f64>,
    pub g_acmp: Option<f64>,
    pub psi_lead: Option<f64>,
    pub psi_acmp: Option<f64>,
    #[serde(rename = "P_clm")]
    pub permanent_column: Option<f64>,
    #[serde(rename = "M_clm")]
    pub medium_column: Option<f64>,
    #[serde(rename = "I_clm")]
    pub instantaneous_column: Option<f64>,
}

impl LoadInput {
    /// Substitute defaults for every absent or zero field.
    pub fn resolve(&self) -> DesignLoads {
        let d = DesignLoads::default();
        DesignLoads {
            beam: [
                or_default(self.permanent_beam, d.beam[0]),
                or_default(self.medium_beam, d.beam[1]),
                or_default(self.instantaneous_beam, d.beam[2]),
            ],
            serviceability: or_default(self.serviceability_beam, d.serviceability),
            permanent: or_default(self.gk, d.permanent),
            leading: or_default(self.g_lead, d.leading),
            accompanying: or_default(self.g_acmp, d.accompanying),
            psi_leading: or_default(self.psi_lead, d.psi_leading),
            psi_accompanying: or_default(self.psi_acmp, d.psi_accompanying),
            column: [
                or_default(self.permanent_column, d.column[0]),
                or_default(self.medium_column, d.column[1]),
                or_default(self.instantaneous_column, d.column[2]),
            ],
        }
    }
}

/// Resolved design loads.
///
/// Beam loads are line loads in kN/m, column loads are axial forces in kN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignLoads {
    /// ULS beam load per duration class (P_L, M_L, I_L)
    pub beam: [f64; 3],
    /// SLS beam load (SLS_L)
    pub serviceability: f64,
    /// Characteristic permanent beam load (gk)
    pub permanent: f64,
    /// Leading variable action (g_lead)
    pub leading: f64,
    /// Accompanying variable action (g_acmp)
    pub accompanying: f64,
    /// Quasi-permanent factor of the leading action (psi_lead)
    pub psi_leading: f64,
    /// Quasi-permanent factor of the accompanying action (psi_acmp)
    pub psi_accompanying: f64,
    /// ULS column load per duration class (P_clm, M_clm, I_clm)
    pub column: [f64; 3],
}

impl Default for DesignLoads {
    fn default() -> Self {
        DesignLoads {
            beam: [2.96, 7.44, 5.66],
            serviceability: 5.18,
            permanent: 1.38,
            leading: 2.0,
            accompanying: 1.4,
            psi_leading: 0.0,
            psi_accompanying: 0.2,
            column: [3.7, 9.2, 7.0],
        }
    }
}

impl DesignLoads {
    /// ULS beam line load for a duration class
    pub fn beam(&self, duration: LoadDuration) -> f64 {
        match duration {
            LoadDuration::Permanent => self.beam[0],
            LoadDuration::Medium => self.beam[1],
            LoadDuration::Instantaneous => self.beam[2],
        }
    }

    /// ULS column axial load for a duration class
    pub fn column(&self, duration: LoadDuration) -> f64 {
        match duration {
            LoadDuration::Permanent => self.column[0],
            LoadDuration::Medium => self.column[1],
            LoadDuration::Instantaneous => self.column[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_keys() {
        let input: LoadInput =
            serde_json::from_str(r#"{"P_L": 3.1, "SLS_L": 6.0, "psi_acmp": 0, "I_clm": 8}"#).unwrap();
        let loads = input.resolve();
        assert_eq!(loads.beam(LoadDuration::Permanent), 3.1);
        assert_eq!(loads.serviceability, 6.0);
        // Zero merges with missing
        assert_eq!(loads.psi_accompanying, 0.2);
        assert_eq!(loads.column(LoadDuration::Instantaneous), 8.0);
        assert_eq!(loads.leading, 2.0);
    }

    #[test]
    fn test_load_case_defaults_to_zero() {
        let case = LoadCase::new("Empty");
        for load_type in LoadType::ALL {
            assert_eq!(case.get(load_type), 0.0);
        }
    }
}
