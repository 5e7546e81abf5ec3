//! Wind actions on a rectangular building.
//!
//! Peak velocity pressure follows the basic-velocity / roughness /
//! turbulence chain; external pressures are the peak pressure times the
//! external pressure coefficient of each wall zone (A-E).
//!
//! All pressures are in kN/m², lengths in m, velocities in m/s.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Roughness length of terrain category II (m)
pub const REFERENCE_ROUGHNESS_M: f64 = 0.05;

/// Air density used for the velocity pressure (kg/m³)
pub const AIR_DENSITY: f64 = 1.25;

/// Turbulence factor k_I
pub const TURBULENCE_FACTOR: f64 = 1.0;

/// Terrain factor `k_r = 0.19 (z0 / z0,II)^0.07`
pub fn terrain_factor(z0: f64) -> f64 {
    0.19 * (z0 / REFERENCE_ROUGHNESS_M).powf(0.07)
}

/// Roughness factor `c_r = k_r ln(z / z0)`
pub fn roughness_factor(kr: f64, z: f64, z0: f64) -> f64 {
    kr * (z / z0).ln()
}

/// Turbulence intensity `I_v = k_I / (c0 ln(z / z0))`
///
/// The logarithmic profile is only defined above the roughness length.
pub fn turbulence_intensity(k_i: f64, c0: f64, z: f64, z0: f64) -> CalcResult<f64> {
    if z0 <= 0.0 {
        return Err(CalcError::invalid_input(
            "z0",
            z0.to_string(),
            "Roughness length must be positive",
        ));
    }
    if z <= z0 {
        return Err(CalcError::invalid_input(
            "height",
            z.to_string(),
            "Reference height must exceed the roughness length",
        ));
    }
    Ok(k_i / (c0 * (z / z0).ln()))
}

/// Mean wind velocity `v_m = c_r c0 v_b`
pub fn mean_wind_velocity(kr: f64, c0: f64, vb: f64, z: f64, z0: f64) -> f64 {
    roughness_factor(kr, z, z0) * c0 * vb
}

/// Peak velocity pressure `q_p = (1 + 7 I_v) ½ ρ v_m² / 1000`
pub fn peak_velocity_pressure(iv: f64, air_density: f64, vm: f64) -> f64 {
    ((1.0 + 7.0 * iv) * 0.5 * air_density * vm.powi(2)) / 1000.0
}

/// Wall zones for wind parallel to one face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    A,
    B,
    C,
    D,
    E,
}

impl Zone {
    pub const ALL: [Zone; 5] = [Zone::A, Zone::B, Zone::C, Zone::D, Zone::E];

    fn index(self) -> usize {
        match self {
            Zone::A => 0,
            Zone::B => 1,
            Zone::C => 2,
            Zone::D => 3,
            Zone::E => 4,
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::A => "A",
            Zone::B => "B",
            Zone::C => "C",
            Zone::D => "D",
            Zone::E => "E",
        };
        write!(f, "{}", name)
    }
}

/// External pressure per zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZonePressures(pub [f64; 5]);

impl ZonePressures {
    pub fn get(&self, zone: Zone) -> f64 {
        self.0[zone.index()]
    }

    /// Zone-wise maximum of two pressure sets
    pub fn envelope(&self, other: &ZonePressures) -> ZonePressures {
        ZonePressures(Zone::ALL.map(|zone| self.get(zone).max(other.get(zone))))
    }

    /// Largest pressure over all zones
    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Widths of the side-wall zones A, B and C (m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneWidths {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl ZoneWidths {
    /// Zone widths for `e = min(b, 2h)` against the building depth `d`
    pub fn new(e: f64, d: f64) -> Self {
        if e > 5.0 * d {
            ZoneWidths { a: d, b: 0.0, c: 0.0 }
        } else if e > d {
            ZoneWidths {
                a: e / 5.0,
                b: (d - e) / 5.0,
                c: 0.0,
            }
        } else {
            ZoneWidths {
                a: e / 5.0,
                b: e * (4.0 / 5.0),
                c: d - e,
            }
        }
    }
}

/// External pressure coefficients c_pe,10 for zones A-E.
pub fn external_pressure_coefficients(h_over_d: f64) -> CalcResult<[f64; 5]> {
    if h_over_d >= 5.0 {
        Ok([-1.2, -0.8, -0.5, 0.8, -0.7])
    } else if h_over_d >= 1.0 {
        Ok([-1.2, -0.8, -0.5, 0.8, -0.5])
    } else if h_over_d >= 0.25 {
        Ok([-1.2, -0.8, -0.5, 0.7, -0.3])
    } else {
        Err(CalcError::invalid_input(
            "height",
            h_over_d.to_string(),
            "h/d ratio below 0.25 has no external pressure coefficients",
        ))
    }
}

/// Pressures and zone widths for one wind direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindPressures {
    pub pressures: ZonePressures,
    pub widths: ZoneWidths,
}

/// Zone pressures for wind on the face of width `b`, building depth `d`,
/// height `h`.
///
/// # Example
/// ```
/// use timber_core::loads::wind::{zone_pressures, Zone};
///
/// let wind = zone_pressures(0.28, 2.0, 4.0, 2.0).unwrap();
/// assert!((wind.pressures.get(Zone::D) - 0.196).abs() < 1e-9);
/// assert!((wind.widths.b - 1.6).abs() < 1e-12);
/// ```
pub fn zone_pressures(qp: f64, b: f64, d: f64, h: f64) -> CalcResult<WindPressures> {
    let e = b.min(2.0 * h);
    let cpe = external_pressure_coefficients(h / d)?;
    Ok(WindPressures {
        pressures: ZonePressures(cpe.map(|c| qp * c)),
        widths: ZoneWidths::new(e, d),
    })
}

/// Line load on an eaves beam from the enveloped zone pressures
pub fn beam_wind_load(direct: &ZonePressures, side: &ZonePressures, h: f64) -> f64 {
    (direct.envelope(side).max() * h) / 2.0
}

/// Point load on one column from the enveloped zone pressures
///
/// Zones A-C act over their widths, D and E over the building depth; the
/// governing resultant is shared between the columns of one wall.
pub fn column_wind_load(
    direct: &ZonePressures,
    side: &ZonePressures,
    widths: &ZoneWidths,
    d: f64,
    column_number: f64,
) -> f64 {
    let env = direct.envelope(side);
    let resultants = [
        env.get(Zone::A) * widths.a,
        env.get(Zone::B) * widths.b,
        env.get(Zone::C) * widths.c,
        env.get(Zone::D) * d,
        env.get(Zone::E) * d,
    ];
    resultants.iter().copied().fold(f64::NEG_INFINITY, f64::max) / (column_number / 2.0)
}
