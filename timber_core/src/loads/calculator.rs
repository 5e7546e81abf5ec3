//! # Load Calculator
//!
//! Derives the design loads for the frame of a small slab building: one
//! eaves beam and one column out of `column_number` columns carrying a
//! rectangular slab of `width × length`.
//!
//! Characteristic actions per member:
//!
//! | Action | Beam (kN/m) | Column (kN) |
//! |--------|-------------|-------------|
//! | G | 2.3 × slab weight / L / 2 | 3 × slab weight / n |
//! | Q | 1.5 kN/m² × area / L / 2 | 3 × 1.5 kN/m² × area / n |
//! | S | 3.5 × 0.8 s_g × area / L / 2 | 0.8 s_g × area / n |
//! | W | 5 × max zone pressure × h / 2 | 3 × max zone resultant / (n/2) |
//!
//! The actions are combined per load-duration class (see
//! [`combinations`](super::combinations)) and each class keeps its maximum.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::loads::{Building, LoadCalculator};
//!
//! let calculator = LoadCalculator::new(450.0, Building::default());
//! let report = calculator.report().unwrap();
//! assert_eq!(report.permanent_beam.value, 2.74);
//! assert_eq!(report.peak_velocity_pressure.value, 0.28);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::combinations::{
    find_governing_combination, sls_characteristic, uls_instantaneous, uls_medium_term,
    uls_permanent, CombinationFactors,
};
use super::wind::{self, WindPressures, Zone, ZonePressures};
use super::{DesignLoads, LoadCase, LoadType};
use crate::errors::CalcResult;
use crate::inputs::{or_default, resolve_length};
use crate::materials::TimberInput;
use crate::report::Metric;

/// Slab density when the `material` bundle carries none (kg/m³)
pub const DEFAULT_SLAB_DENSITY: f64 = 450.0;

/// Gravitational acceleration (m/s²)
const GRAVITY: f64 = 9.81;

/// Imposed floor load (kN/m²)
const IMPOSED_AREA_LOAD: f64 = 1.5;

/// Snow shape coefficient μ₁
const SNOW_SHAPE: f64 = 0.8;
/// Exposure coefficient C_e
const SNOW_EXPOSURE: f64 = 1.0;
/// Thermal coefficient C_t
const SNOW_THERMAL: f64 = 1.0;

/// The `footprint` bundle of a load request.
///
/// Absent or zero values take the defaults on [`Building`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingInput {
    pub slab_thickness: Option<f64>,
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub height: Option<f64>,
    pub column_number: Option<f64>,
}

impl BuildingInput {
    /// Substitute defaults and reject negative dimensions.
    pub fn resolve(&self) -> CalcResult<Building> {
        let d = Building::default();
        Ok(Building {
            slab_thickness: resolve_length("slab_thickness", self.slab_thickness, d.slab_thickness)?,
            width: resolve_length("width", self.width, d.width)?,
            length: resolve_length("length", self.length, d.length)?,
            height: resolve_length("height", self.height, d.height)?,
            column_number: resolve_length("column_number", self.column_number, d.column_number)?,
        })
    }
}

/// Resolved building footprint. Lengths in m.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub slab_thickness: f64,
    /// Slab width, the wind-loaded face `b`
    pub width: f64,
    /// Slab length, the building depth `d`
    pub length: f64,
    /// Building height, also the wind reference height
    pub height: f64,
    pub column_number: f64,
}

impl Default for Building {
    fn default() -> Self {
        Building {
            slab_thickness: 0.2,
            width: 2.0,
            length: 4.0,
            height: 2.0,
            column_number: 6.0,
        }
    }
}

impl Building {
    /// Slab plan area (m²)
    pub fn area(&self) -> f64 {
        self.width * self.length
    }

    /// Slab self-weight (N)
    pub fn slab_weight(&self, density: f64) -> f64 {
        self.width * self.length * self.slab_thickness * density * GRAVITY
    }
}

/// Fixed site parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteConstants {
    /// Roughness length z₀ (m)
    pub roughness_length: f64,
    /// Orography factor c₀
    pub orography: f64,
    /// Basic wind velocity v_b (m/s)
    pub basic_wind_speed: f64,
    /// Site altitude (m)
    pub altitude: f64,
    /// Characteristic ground snow load s_g (kN/m²)
    pub ground_snow: f64,
}

impl Default for SiteConstants {
    fn default() -> Self {
        SiteConstants {
            roughness_length: 0.3,
            orography: 1.0,
            basic_wind_speed: 24.0,
            altitude: 2.0,
            ground_snow: 1.0,
        }
    }
}

impl SiteConstants {
    fn is_high_altitude(&self) -> bool {
        self.altitude > CombinationFactors::HIGH_ALTITUDE_M
    }
}

/// Peak pressure and zone pressures for both wind directions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindActions {
    pub peak_velocity_pressure: f64,
    /// Wind on the slab width
    pub direct: WindPressures,
    /// Wind on the slab length
    pub side: WindPressures,
}

/// Leading and accompanying variable actions with their ψ₂ factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableRanking {
    pub leading: LoadType,
    pub leading_value: f64,
    pub psi_leading: f64,
    pub accompanying: LoadType,
    pub accompanying_value: f64,
    pub psi_accompanying: f64,
}

/// Rank Q, S and W by magnitude.
///
/// Ties resolve in Q, S, W order. The accompanying action is the largest
/// of the two remaining values; its type is the first action carrying that
/// value.
pub fn rank_variable_actions(case: &LoadCase, high_altitude: bool) -> VariableRanking {
    let values = LoadType::VARIABLE.map(|t| case.get(t));

    let leading_value = largest(values.iter().copied());
    let leading_index = values
        .iter()
        .position(|v| *v == leading_value)
        .unwrap_or(0);
    let accompanying_value = largest(
        values
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != leading_index)
            .map(|(_, v)| *v),
    );
    let accompanying_index = values
        .iter()
        .position(|v| *v == accompanying_value)
        .unwrap_or(0);

    let leading = LoadType::VARIABLE[leading_index];
    let accompanying = LoadType::VARIABLE[accompanying_index];
    VariableRanking {
        leading,
        leading_value,
        psi_leading: match leading {
            LoadType::Snow if high_altitude => 0.5,
            LoadType::Snow | LoadType::Wind => 0.2,
            _ => 0.0,
        },
        accompanying,
        accompanying_value,
        psi_accompanying: match accompanying {
            LoadType::Snow if high_altitude => 0.2,
            _ => 0.0,
        },
    }
}

fn largest(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}

/// Combined beam loads
#[derive(Debug, Clone, PartialEq)]
pub struct BeamEnvelope {
    pub actions: LoadCase,
    pub permanent: f64,
    pub medium: f64,
    pub instantaneous: f64,
    pub serviceability: f64,
    pub ranking: VariableRanking,
}

/// Combined column loads
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnEnvelope {
    pub actions: LoadCase,
    pub permanent: f64,
    pub medium: f64,
    pub instantaneous: f64,
}

/// Load derivation for one building
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadCalculator {
    /// Slab density (kg/m³)
    pub density: f64,
    pub building: Building,
    pub site: SiteConstants,
}

impl LoadCalculator {
    pub fn new(density: f64, building: Building) -> Self {
        LoadCalculator {
            density,
            building,
            site: SiteConstants::default(),
        }
    }

    /// Build from the request bundles, defaulting the density to
    /// [`DEFAULT_SLAB_DENSITY`].
    pub fn from_inputs(material: &TimberInput, footprint: &BuildingInput) -> CalcResult<Self> {
        Ok(Self::new(
            or_default(material.density, DEFAULT_SLAB_DENSITY),
            footprint.resolve()?,
        ))
    }

    fn factors(&self) -> CombinationFactors {
        CombinationFactors::for_altitude(self.site.altitude)
    }

    /// Peak velocity pressure at roof height and zone pressures
    pub fn wind(&self) -> CalcResult<WindActions> {
        let site = &self.site;
        let b = &self.building;
        let z = b.height;

        let kr = wind::terrain_factor(site.roughness_length);
        let iv = wind::turbulence_intensity(
            wind::TURBULENCE_FACTOR,
            site.orography,
            z,
            site.roughness_length,
        )?;
        let vm = wind::mean_wind_velocity(
            kr,
            site.orography,
            site.basic_wind_speed,
            z,
            site.roughness_length,
        );
        let qp = wind::peak_velocity_pressure(iv, wind::AIR_DENSITY, vm);

        Ok(WindActions {
            peak_velocity_pressure: qp,
            direct: wind::zone_pressures(qp, b.width, b.length, b.height)?,
            side: wind::zone_pressures(qp, b.length, b.width, b.height)?,
        })
    }

    fn snow_on_slab(&self) -> f64 {
        SNOW_SHAPE * SNOW_EXPOSURE * SNOW_THERMAL * self.site.ground_snow * self.building.area()
    }

    /// Characteristic actions on the eaves beam (kN/m)
    pub fn beam_actions(&self, wind: &WindActions) -> LoadCase {
        let b = &self.building;
        let gk = 2.3 * ((b.slab_weight(self.density) / b.length) / 2.0 / 1000.0);
        let qk = ((IMPOSED_AREA_LOAD * b.area()) / b.length) / 2.0 / 1000.0;
        let sk = 3.5 * ((self.snow_on_slab() / b.length) / 2.0);
        let wk = 5.0 * wind::beam_wind_load(&wind.direct.pressures, &wind.side.pressures, b.height);

        LoadCase::new("Beam")
            .with_load(LoadType::Dead, gk)
            .with_load(LoadType::Imposed, qk)
            .with_load(LoadType::Snow, sk)
            .with_load(LoadType::Wind, wk)
    }

    /// Characteristic actions on one column (kN)
    pub fn column_actions(&self, wind: &WindActions) -> LoadCase {
        let b = &self.building;
        let n = b.column_number;
        let gk = 3.0 * ((b.slab_weight(self.density) / n) / 1000.0);
        let qk = 3.0 * ((IMPOSED_AREA_LOAD * b.area()) / n / 1000.0);
        let sk = self.snow_on_slab() / n;
        let wk = 3.0
            * wind::column_wind_load(
                &wind.direct.pressures,
                &wind.side.pressures,
                &wind.direct.widths,
                b.length,
                n,
            );

        LoadCase::new("Column")
            .with_load(LoadType::Dead, gk)
            .with_load(LoadType::Imposed, qk)
            .with_load(LoadType::Snow, sk)
            .with_load(LoadType::Wind, wk)
    }

    /// Beam load envelope per duration class
    pub fn beam_envelope(&self, wind: &WindActions) -> BeamEnvelope {
        let f = self.factors();
        let actions = self.beam_actions(wind);

        let (permanent, _) = find_governing_combination(&actions, &uls_permanent(&f));
        let (medium, medium_combo) = find_governing_combination(&actions, &uls_medium_term(&f));
        let (instantaneous, inst_combo) =
            find_governing_combination(&actions, &uls_instantaneous(&f));
        let (serviceability, sls_combo) =
            find_governing_combination(&actions, &sls_characteristic(&f));
        debug!(
            medium = %medium_combo,
            instantaneous = %inst_combo,
            serviceability = %sls_combo,
            "Governing beam combinations"
        );

        let ranking = rank_variable_actions(&actions, self.site.is_high_altitude());
        BeamEnvelope {
            actions,
            permanent,
            medium,
            instantaneous,
            serviceability,
            ranking,
        }
    }

    /// Column load envelope per duration class
    pub fn column_envelope(&self, wind: &WindActions) -> ColumnEnvelope {
        let f = self.factors();
        let actions = self.column_actions(wind);

        let (permanent, _) = find_governing_combination(&actions, &uls_permanent(&f));
        let (medium, _) = find_governing_combination(&actions, &uls_medium_term(&f));
        let (instantaneous, inst_combo) =
            find_governing_combination(&actions, &uls_instantaneous(&f));
        debug!(instantaneous = %inst_combo, "Governing column combination");

        ColumnEnvelope {
            actions,
            permanent,
            medium,
            instantaneous,
        }
    }

    /// Full report of the derived loads
    #[instrument(skip_all, name = "load_calculator", fields(density = self.density))]
    pub fn report(&self) -> CalcResult<LoadReport> {
        let wind = self.wind()?;
        let beam = self.beam_envelope(&wind);
        let column = self.column_envelope(&wind);
        debug!(qp = wind.peak_velocity_pressure, "Derived peak velocity pressure");
        Ok(LoadReport::new(&wind, &beam, &column))
    }

    /// The twelve design loads, rounded to two decimals; zero results fall
    /// back to the [`DesignLoads`] defaults.
    pub fn design_loads(&self) -> CalcResult<DesignLoads> {
        let report = self.report()?;
        let d = DesignLoads::default();
        let pick = |m: &Metric<f64>, default: f64| or_default(Some(m.value), default);
        Ok(DesignLoads {
            beam: [
                pick(&report.permanent_beam, d.beam[0]),
                pick(&report.medium_beam, d.beam[1]),
                pick(&report.instantaneous_beam, d.beam[2]),
            ],
            serviceability: pick(&report.serviceability_beam, d.serviceability),
            permanent: pick(&report.gk, d.permanent),
            leading: pick(&report.g_lead, d.leading),
            accompanying: pick(&report.g_acmp, d.accompanying),
            psi_leading: pick(&report.psi_lead, d.psi_leading),
            psi_accompanying: pick(&report.psi_acmp, d.psi_accompanying),
            column: [
                pick(&report.permanent_column, d.column[0]),
                pick(&report.medium_column, d.column[1]),
                pick(&report.instantaneous_column, d.column[2]),
            ],
        })
    }
}

/// External pressure per zone for one wind direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneReport {
    #[serde(rename = "A")]
    pub a: Metric<f64>,
    #[serde(rename = "B")]
    pub b: Metric<f64>,
    #[serde(rename = "C")]
    pub c: Metric<f64>,
    #[serde(rename = "D")]
    pub d: Metric<f64>,
    #[serde(rename = "E")]
    pub e: Metric<f64>,
}

impl ZoneReport {
    fn new(pressures: &ZonePressures, direction: &str) -> Self {
        let zone = |z: Zone| {
            let p = pressures.get(z);
            Metric::new(p, format!("We for area {} for {}: {:.2} kN/m²", z, direction, p))
        };
        ZoneReport {
            a: zone(Zone::A),
            b: zone(Zone::B),
            c: zone(Zone::C),
            d: zone(Zone::D),
            e: zone(Zone::E),
        }
    }
}

/// Output of a load request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    #[serde(rename = "P_L")]
    pub permanent_beam: Metric<f64>,
    #[serde(rename = "M_L")]
    pub medium_beam: Metric<f64>,
    #[serde(rename = "I_L")]
    pub instantaneous_beam: Metric<f64>,
    #[serde(rename = "SLS_L")]
    pub serviceability_beam: Metric<f64>,
    pub g_lead: Metric<f64>,
    pub g_acmp: Metric<f64>,
    pub psi_lead: Metric<f64>,
    pub psi_acmp: Metric<f64>,
    pub gk: Metric<f64>,
    #[serde(rename = "qp")]
    pub peak_velocity_pressure: Metric<f64>,
    pub wk: Metric<f64>,
    pub wind_side: ZoneReport,
    pub wind_direct: ZoneReport,
    #[serde(rename = "P_clm")]
    pub permanent_column: Metric<f64>,
    #[serde(rename = "M_clm")]
    pub medium_column: Metric<f64>,
    #[serde(rename = "I_clm")]
    pub instantaneous_column: Metric<f64>,
    pub sk_clm: Metric<f64>,
    pub wk_clm: Metric<f64>,
    pub qk_clm: Metric<f64>,
}

impl LoadReport {
    fn new(wind: &WindActions, beam: &BeamEnvelope, column: &ColumnEnvelope) -> Self {
        let kn_per_m = |label: &str, v: f64| Metric::new(v, format!("{}: {:.2} kN/m", label, v));
        let kn = |label: &str, v: f64| Metric::new(v, format!("{}: {:.2} kN", label, v));
        let plain = |label: &str, v: f64| Metric::new(v, format!("{}: {:.2}", label, v));
        let gk = beam.actions.get(LoadType::Dead);
        let wk = beam.actions.get(LoadType::Wind);
        let qp = wind.peak_velocity_pressure;

        LoadReport {
            permanent_beam: kn_per_m("Maximum load for ULS Category 1 (Permanent)", beam.permanent),
            medium_beam: kn_per_m("Maximum load for ULS Category 2 (Medium-term)", beam.medium),
            instantaneous_beam: kn_per_m(
                "Maximum load for ULS Category 3 (Instantaneous)",
                beam.instantaneous,
            ),
            serviceability_beam: kn_per_m("Maximum load for SLS", beam.serviceability),
            g_lead: kn_per_m("Leading variable action", beam.ranking.leading_value),
            g_acmp: kn_per_m("Accompanying variable action", beam.ranking.accompanying_value),
            psi_lead: plain("psi_lead", beam.ranking.psi_leading),
            psi_acmp: plain("psi_acmp", beam.ranking.psi_accompanying),
            gk: Metric::new(
                gk,
                format!("The calculated dead load on the beam (gk) is {:.2} kN/m", gk),
            ),
            peak_velocity_pressure: Metric::new(
                qp,
                format!("Calculated peak velocity pressure qp: {:.2} kN/m²", qp),
            ),
            wk: Metric::new(wk, format!("Wind load on the beam (wk): {:.2} kN/m", wk)),
            wind_side: ZoneReport::new(&wind.side.pressures, "wind_side"),
            wind_direct: ZoneReport::new(&wind.direct.pressures, "wind_direct"),
            permanent_column: kn(
                "Maximum load for ULS Category 1 (Permanent) for column",
                column.permanent,
            ),
            medium_column: kn(
                "Maximum load for ULS Category 2 (Medium-term) for column",
                column.medium,
            ),
            instantaneous_column: kn(
                "Maximum load for ULS Category 3 (Instantaneous) for column",
                column.instantaneous,
            ),
            sk_clm: plain("sk_column", column.actions.get(LoadType::Snow)),
            wk_clm: plain("wk_column", column.actions.get(LoadType::Wind)),
            qk_clm: plain("qk_column", column.actions.get(LoadType::Imposed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_report(density: f64) -> LoadReport {
        LoadCalculator::new(density, Building::default())
            .report()
            .unwrap()
    }

    #[test]
    fn test_beam_envelope_defaults() {
        let r = default_report(DEFAULT_SLAB_DENSITY);
        assert_eq!(r.permanent_beam.value, 2.74);
        assert_eq!(r.medium_beam.value, 5.68);
        assert_eq!(r.instantaneous_beam.value, 7.96);
        assert_eq!(r.serviceability_beam.value, 5.51);
        assert_eq!(r.gk.value, 2.03);
        assert_eq!(r.wk.value, 1.13);
        assert_eq!(r.peak_velocity_pressure.value, 0.28);
        assert_eq!(
            r.permanent_beam.print_value,
            "Maximum load for ULS Category 1 (Permanent): 2.74 kN/m"
        );
    }

    #[test]
    fn test_variable_ranking_defaults() {
        let r = default_report(DEFAULT_SLAB_DENSITY);
        // Snow leads, wind accompanies
        assert_eq!(r.g_lead.value, 2.8);
        assert_eq!(r.g_acmp.value, 1.13);
        assert_eq!(r.psi_lead.value, 0.2);
        assert_eq!(r.psi_acmp.value, 0.0);
        assert_eq!(r.psi_acmp.print_value, "psi_acmp: 0.00");
    }

    #[test]
    fn test_zone_reports() {
        let r = default_report(DEFAULT_SLAB_DENSITY);
        assert_eq!(r.wind_side.a.value, -0.34);
        assert_eq!(r.wind_side.b.value, -0.23);
        assert_eq!(r.wind_side.d.value, 0.23);
        assert_eq!(r.wind_side.e.value, -0.14);
        assert_eq!(r.wind_direct.d.value, 0.2);
        assert_eq!(r.wind_direct.e.value, -0.08);
        assert_eq!(r.wind_side.a.print_value, "We for area A for wind_side: -0.34 kN/m²");
    }

    #[test]
    fn test_column_envelope_defaults() {
        let r = default_report(DEFAULT_SLAB_DENSITY);
        assert_eq!(r.permanent_column.value, 4.77);
        assert_eq!(r.medium_column.value, 5.9);
        assert_eq!(r.instantaneous_column.value, 7.24);
        assert_eq!(r.sk_clm.value, 1.07);
        assert_eq!(r.wk_clm.value, 0.9);
        assert_eq!(r.qk_clm.value, 0.01);
    }

    #[test]
    fn test_density_scales_permanent_loads() {
        let r = default_report(610.0);
        assert_eq!(r.permanent_beam.value, 3.72);
        assert_eq!(r.medium_beam.value, 6.66);
        assert_eq!(r.instantaneous_beam.value, 8.93);
        assert_eq!(r.serviceability_beam.value, 6.23);
        assert_eq!(r.gk.value, 2.75);
        assert_eq!(r.permanent_column.value, 6.46);
        assert_eq!(r.medium_column.value, 7.59);
        assert_eq!(r.instantaneous_column.value, 8.94);
        // Wind and snow do not depend on the slab
        assert_eq!(r.g_lead.value, 2.8);
        assert_eq!(r.wk_clm.value, 0.9);
    }

    #[test]
    fn test_design_loads_fall_back_on_zero() {
        let loads = LoadCalculator::new(610.0, Building::default())
            .design_loads()
            .unwrap();
        assert_eq!(loads.beam, [3.72, 6.66, 8.93]);
        assert_eq!(loads.serviceability, 6.23);
        assert_eq!(loads.permanent, 2.75);
        assert_eq!(loads.psi_leading, 0.2);
        // Computed ψ of the accompanying action is zero
        assert_eq!(loads.psi_accompanying, 0.2);
        assert_eq!(loads.column, [6.46, 7.59, 8.94]);
    }

    #[test]
    fn test_from_inputs_defaults_density() {
        let calc =
            LoadCalculator::from_inputs(&TimberInput::default(), &BuildingInput::default()).unwrap();
        assert_eq!(calc.density, DEFAULT_SLAB_DENSITY);
        assert_eq!(calc.building, Building::default());
    }

    #[test]
    fn test_invalid_buildings() {
        let low = Building {
            height: 0.2,
            ..Building::default()
        };
        assert!(LoadCalculator::new(450.0, low).report().is_err());

        let shallow = Building {
            height: 0.5,
            ..Building::default()
        };
        // h/d = 0.125 for direct wind
        assert!(LoadCalculator::new(450.0, shallow).report().is_err());

        let negative = BuildingInput {
            width: Some(-2.0),
            ..BuildingInput::default()
        };
        assert!(negative.resolve().is_err());
    }

    #[test]
    fn test_ranking_ties_and_altitude() {
        let case = LoadCase::new("Tie")
            .with_load(LoadType::Imposed, 1.0)
            .with_load(LoadType::Snow, 1.0)
            .with_load(LoadType::Wind, 0.5);
        let r = rank_variable_actions(&case, false);
        assert_eq!(r.leading, LoadType::Imposed);
        assert_eq!(r.accompanying, LoadType::Imposed);
        assert_eq!(r.accompanying_value, 1.0);

        let case = LoadCase::new("Snow")
            .with_load(LoadType::Snow, 3.0)
            .with_load(LoadType::Wind, 0.5)
            .with_load(LoadType::Imposed, 0.1);
        let r = rank_variable_actions(&case, true);
        assert_eq!(r.psi_leading, 0.5);
        assert_eq!(r.accompanying, LoadType::Wind);
        assert_eq!(r.psi_accompanying, 0.0);
    }
}
