//! Ultimate and serviceability load combinations
//!
//! Combinations are grouped by the load-duration class they feed:
//!
//! - Category 1 (permanent): permanent action alone
//! - Category 2 (medium-term): permanent plus imposed load
//! - Category 3 (instantaneous): every combination with snow or wind
//!
//! Each category's design value is the maximum over its combinations.
//! Serviceability uses the characteristic combinations with unit factors.
//!
//! Factors are kept in insertion order so that a combination always sums its
//! terms left to right.

use serde::{Deserialize, Serialize};

use super::load_types::LoadType;
use super::LoadCase;

/// A load combination with factors for each action
///
/// # Example
/// ```
/// use timber_core::loads::{LoadCase, LoadCombination, LoadType};
///
/// let combo = LoadCombination::new("ULS-2.1", "1.35G + 1.5Q")
///     .with_factor(LoadType::Dead, 1.35)
///     .with_factor(LoadType::Imposed, 1.5);
///
/// let case = LoadCase::new("Beam")
///     .with_load(LoadType::Dead, 2.0)
///     .with_load(LoadType::Imposed, 1.0);
///
/// assert!((combo.apply(&case) - 4.2).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Combination identifier (e.g., "ULS-3.4", "SLS-2")
    pub name: String,

    /// Human-readable equation for display (e.g., "1.35G + 1.5S")
    pub equation: String,

    /// Load factors in summation order
    pub factors: Vec<(LoadType, f64)>,
}

impl LoadCombination {
    pub fn new(name: impl Into<String>, equation: impl Into<String>) -> Self {
        LoadCombination {
            name: name.into(),
            equation: equation.into(),
            factors: Vec::new(),
        }
    }

    /// Append a load factor (builder pattern)
    pub fn with_factor(mut self, load_type: LoadType, factor: f64) -> Self {
        self.factors.push((load_type, factor));
        self
    }

    /// Apply this combination to a LoadCase, returning the total factored load
    pub fn apply(&self, case: &LoadCase) -> f64 {
        self.factors
            .iter()
            .fold(0.0, |sum, (load_type, factor)| sum + factor * case.get(*load_type))
    }

    /// Get the factor for a specific action (0.0 if not in combination)
    pub fn get_factor(&self, load_type: LoadType) -> f64 {
        self.factors
            .iter()
            .find(|(t, _)| *t == load_type)
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }
}

/// Partial and combination factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinationFactors {
    /// γ_G for permanent actions
    pub gamma_g: f64,
    /// γ_Q for variable actions
    pub gamma_q: f64,
    /// ψ₀ for imposed load
    pub psi_imposed: f64,
    /// ψ₀ for snow
    pub psi_snow: f64,
    /// ψ₀ for wind
    pub psi_wind: f64,
}

impl CombinationFactors {
    /// Site altitude above which the reduced snow factor applies (m)
    pub const HIGH_ALTITUDE_M: f64 = 1000.0;

    /// Factors for a site at the given altitude
    pub fn for_altitude(altitude_m: f64) -> Self {
        CombinationFactors {
            gamma_g: 1.35,
            gamma_q: 1.5,
            psi_imposed: 0.0,
            psi_snow: if altitude_m > Self::HIGH_ALTITUDE_M { 0.5 } else { 0.7 },
            psi_wind: 0.6,
        }
    }
}

/// Category 1: permanent action only
pub fn uls_permanent(f: &CombinationFactors) -> Vec<LoadCombination> {
    vec![LoadCombination::new("ULS-1", "γG·G").with_factor(LoadType::Dead, f.gamma_g)]
}

/// Category 2: permanent plus imposed, with one accompanying action
pub fn uls_medium_term(f: &CombinationFactors) -> Vec<LoadCombination> {
    let q = f.gamma_q;
    vec![
        LoadCombination::new("ULS-2.1", "γG·G + γQ·Q")
            .with_factor(LoadType::Dead, f.gamma_g)
            .with_factor(LoadType::Imposed, q),
        LoadCombination::new("ULS-2.2", "γG·G + γQ·Q + ψ0·γQ·S")
            .with_factor(LoadType::Dead, f.gamma_g)
            .with_factor(LoadType::Imposed, q)
            .with_factor(LoadType::Snow, f.psi_snow * q),
        LoadCombination::new("ULS-2.3", "γG·G + γQ·Q + ψ0·γQ·W")
            .with_factor(LoadType::Dead, f.gamma_g)
            .with_factor(LoadType::Imposed, q)
            .with_factor(LoadType::Wind, f.psi_wind * q),
    ]
}

/// Category 3: combinations led or accompanied by snow and wind
pub fn uls_instantaneous(f: &CombinationFactors) -> Vec<LoadCombination> {
    let g = f.gamma_g;
    let q = f.gamma_q;
    let psi_q = f.psi_imposed * q;
    let psi_s = f.psi_snow * q;
    let psi_w = f.psi_wind * q;
    vec![
        LoadCombination::new("ULS-3.1", "γG·G + γQ·Q + ψ0·γQ·S + ψ0·γQ·W")
            .with_factor(LoadType::Dead, g)
            .with_factor(LoadType::Imposed, q)
            .with_factor(LoadType::Snow, psi_s)
            .with_factor(LoadType::Wind, psi_w),
        LoadCombination::new("ULS-3.2", "γG·G + ψ0·γQ·Q + γQ·S + ψ0·γQ·W")
            .with_factor(LoadType::Dead, g)
            .with_factor(LoadType::Imposed, psi_q)
            .with_factor(LoadType::Snow, q)
            .with_factor(LoadType::Wind, psi_w),
        LoadCombination::new("ULS-3.3", "γG·G + ψ0·γQ·Q + ψ0·γQ·S + γQ·W")
            .with_factor(LoadType::Dead, g)
            .with_factor(LoadType::Imposed, psi_q)
            .with_factor(LoadType::Snow, psi_s)
            .with_factor(LoadType::Wind, q),
        LoadCombination::new("ULS-3.4", "γG·G + γQ·S")
            .with_factor(LoadType::Dead, g)
            .with_factor(LoadType::Snow, q),
        LoadCombination::new("ULS-3.5", "γG·G + γQ·W")
            .with_factor(LoadType::Dead, g)
            .with_factor(LoadType::Wind, q),
        LoadCombination::new("ULS-3.6", "γG·G + γQ·S + ψ0·γQ·W")
            .with_factor(LoadType::Dead, g)
            .with_factor(LoadType::Snow, q)
            .with_factor(LoadType::Wind, psi_w),
        LoadCombination::new("ULS-3.7", "γG·G + γQ·W + ψ0·γQ·S")
            .with_factor(LoadType::Dead, g)
            .with_factor(LoadType::Wind, q)
            .with_factor(LoadType::Snow, psi_s),
        LoadCombination::new("ULS-3.8", "γG·G + ψ0·γQ·Q + γQ·S")
            .with_factor(LoadType::Dead, g)
            .with_factor(LoadType::Imposed, psi_q)
            .with_factor(LoadType::Snow, q),
        LoadCombination::new("ULS-3.9", "γG·G + ψ0·γQ·Q + γQ·W")
            .with_factor(LoadType::Dead, g)
            .with_factor(LoadType::Imposed, psi_q)
            .with_factor(LoadType::Wind, q),
    ]
}

/// Characteristic serviceability combinations (unit partial factors)
pub fn sls_characteristic(f: &CombinationFactors) -> Vec<LoadCombination> {
    use LoadType::{Dead, Imposed, Snow, Wind};

    let terms: Vec<(&str, Vec<(LoadType, f64)>)> = vec![
        ("G", vec![(Dead, 1.0)]),
        ("G + Q", vec![(Dead, 1.0), (Imposed, 1.0)]),
        ("G + Q + ψ0·S", vec![(Dead, 1.0), (Imposed, 1.0), (Snow, f.psi_snow)]),
        ("G + Q + ψ0·W", vec![(Dead, 1.0), (Imposed, 1.0), (Wind, f.psi_wind)]),
        (
            "G + Q + ψ0·S + ψ0·W",
            vec![(Dead, 1.0), (Imposed, 1.0), (Snow, f.psi_snow), (Wind, f.psi_wind)],
        ),
        (
            "G + ψ0·Q + S + ψ0·W",
            vec![(Dead, 1.0), (Imposed, f.psi_imposed), (Snow, 1.0), (Wind, f.psi_wind)],
        ),
        (
            "G + ψ0·Q + ψ0·S + W",
            vec![(Dead, 1.0), (Imposed, f.psi_imposed), (Snow, f.psi_snow), (Wind, 1.0)],
        ),
        ("G + S", vec![(Dead, 1.0), (Snow, 1.0)]),
        ("G + W", vec![(Dead, 1.0), (Wind, 1.0)]),
        ("G + S + ψ0·W", vec![(Dead, 1.0), (Snow, 1.0), (Wind, f.psi_wind)]),
        ("G + W + ψ0·S", vec![(Dead, 1.0), (Wind, 1.0), (Snow, f.psi_snow)]),
        ("G + ψ0·Q + S", vec![(Dead, 1.0), (Imposed, f.psi_imposed), (Snow, 1.0)]),
        ("G + ψ0·Q + W", vec![(Dead, 1.0), (Imposed, f.psi_imposed), (Wind, 1.0)]),
    ];

    terms
        .into_iter()
        .enumerate()
        .map(|(i, (equation, factors))| {
            factors.into_iter().fold(
                LoadCombination::new(format!("SLS-{}", i + 1), equation),
                |combo, (load_type, factor)| combo.with_factor(load_type, factor),
            )
        })
        .collect()
}

/// Find the governing (maximum) load combination
///
/// Returns the maximum factored load along with the governing combination
/// name. Ties keep the earlier combination.
///
/// # Example
/// ```
/// use timber_core::loads::{find_governing_combination, uls_medium_term, CombinationFactors, LoadCase, LoadType};
///
/// let case = LoadCase::new("Beam")
///     .with_load(LoadType::Dead, 2.0)
///     .with_load(LoadType::Imposed, 0.5)
///     .with_load(LoadType::Wind, 1.0);
///
/// let combos = uls_medium_term(&CombinationFactors::for_altitude(2.0));
/// let (load, name) = find_governing_combination(&case, &combos);
/// assert_eq!(name, "ULS-2.3");
/// assert!(load > 3.45);
/// ```
pub fn find_governing_combination(
    case: &LoadCase,
    combinations: &[LoadCombination],
) -> (f64, String) {
    combinations
        .iter()
        .map(|combo| (combo.apply(case), combo))
        .fold(None, |best: Option<(f64, &LoadCombination)>, (load, combo)| match best {
            Some((max, _)) if load <= max => best,
            _ => Some((load, combo)),
        })
        .map(|(load, combo)| (load, combo.name.clone()))
        .unwrap_or((0.0, String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors() -> CombinationFactors {
        CombinationFactors::for_altitude(2.0)
    }

    #[test]
    fn test_combination_counts() {
        let f = factors();
        assert_eq!(uls_permanent(&f).len(), 1);
        assert_eq!(uls_medium_term(&f).len(), 3);
        assert_eq!(uls_instantaneous(&f).len(), 9);
        assert_eq!(sls_characteristic(&f).len(), 13);
    }

    #[test]
    fn test_snow_factor_depends_on_altitude() {
        assert_eq!(CombinationFactors::for_altitude(2.0).psi_snow, 0.7);
        assert_eq!(CombinationFactors::for_altitude(1200.0).psi_snow, 0.5);
    }

    #[test]
    fn test_accompanying_factor_is_premultiplied() {
        let combos = uls_medium_term(&factors());
        let snow = combos[1].get_factor(LoadType::Snow);
        assert!((snow - 0.7 * 1.5).abs() < 1e-15);
        assert_eq!(combos[0].get_factor(LoadType::Wind), 0.0);
    }

    #[test]
    fn test_governing_instantaneous() {
        let case = LoadCase::new("Beam")
            .with_load(LoadType::Dead, 1.0)
            .with_load(LoadType::Imposed, 0.0)
            .with_load(LoadType::Snow, 2.0)
            .with_load(LoadType::Wind, 1.0);
        let (load, name) = find_governing_combination(&case, &uls_instantaneous(&factors()));
        // 1.35 + 1.5*2.0 + 0.9*1.0 = 5.25 (ULS-3.2 and ULS-3.6 tie; first wins)
        assert!((load - 5.25).abs() < 1e-12);
        assert_eq!(name, "ULS-3.2");
    }

    #[test]
    fn test_sls_uses_unit_factors() {
        let case = LoadCase::new("Beam")
            .with_load(LoadType::Dead, 1.0)
            .with_load(LoadType::Imposed, 1.0);
        let (load, name) = find_governing_combination(&case, &sls_characteristic(&factors()));
        assert_eq!(load, 2.0);
        assert_eq!(name, "SLS-2");
    }

    #[test]
    fn test_empty_combinations() {
        let case = LoadCase::new("Empty");
        assert_eq!(find_governing_combination(&case, &[]), (0.0, String::new()));
    }
}
