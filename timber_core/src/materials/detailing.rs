//! Dowel placement multipliers.
//!
//! Minimum end, spacing, edge and vertical edge distances for a dowel are
//! expressed as multiples of the equivalent dowel diameter. The multipliers
//! travel in the `material` bundle under the `dtl_*` keys.

use serde::{Deserialize, Serialize};

use crate::inputs::or_default;

/// The `dtl_*` keys of the `material` bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DowelDetailingInput {
    /// End distance multiplier
    pub dtl_e: Option<f64>,
    /// Dowel spacing multiplier
    pub dtl_s: Option<f64>,
    /// Edge distance multiplier
    pub dtl_v: Option<f64>,
    /// Vertical edge distance multiplier
    pub dtl_g: Option<f64>,
}

impl DowelDetailingInput {
    pub fn resolve(&self) -> DowelDetailing {
        let d = DowelDetailing::default();
        DowelDetailing {
            end: or_default(self.dtl_e, d.end),
            spacing: or_default(self.dtl_s, d.spacing),
            edge: or_default(self.dtl_v, d.edge),
            vertical_edge: or_default(self.dtl_g, d.vertical_edge),
        }
    }
}

/// Resolved placement multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DowelDetailing {
    pub end: f64,
    pub spacing: f64,
    pub edge: f64,
    pub vertical_edge: f64,
}

impl Default for DowelDetailing {
    fn default() -> Self {
        DowelDetailing {
            end: 2.0,
            spacing: 2.5,
            edge: 1.5,
            vertical_edge: 1.5,
        }
    }
}
