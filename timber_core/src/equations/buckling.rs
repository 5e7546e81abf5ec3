//! # Column Buckling Formulas
//!
//! Flexural buckling of solid timber columns by the instability-factor
//! method.
//!
//! ## Notation
//!
//! - `L_c` = Buckling length
//! - `i` = Radius of gyration about the buckling axis
//! - `λ` = Slenderness ratio `L_c / i`
//! - `λ_rel` = Relative slenderness
//! - `β_c` = Straightness coefficient (0.2 for solid timber)
//! - `k` = Instability factor
//! - `k_c` = Buckling reduction coefficient (≤ 1)
//!
//! ## Units
//!
//! The relative slenderness carries the scale factors of its callers:
//! `f_c,0,k` in MPa, `E₀.₀₅` as entered (11.2 for 11 200 MPa), so the square
//! root is taken of `f_c,0,k / E₀.₀₅ × 10` and the result divided by 100.

use std::f64::consts::PI;

/// Slenderness ratio λ = L_c / i
#[inline]
pub fn slenderness_ratio(buckling_length: f64, radius_of_gyration: f64) -> f64 {
    buckling_length / radius_of_gyration
}

/// Relative slenderness
///
/// # Formula
/// λ_rel = (λ/π) × √(f_c,0,k / E₀.₀₅ × 10) / 100
#[inline]
pub fn relative_slenderness(slenderness: f64, compression_strength: f64, e_05: f64) -> f64 {
    ((slenderness / PI) * ((compression_strength / e_05) * 10.0).sqrt()) / 100.0
}

/// Instability factor
///
/// # Formula
/// k = 0.5 (1 + β_c (λ_rel − 0.3) + λ_rel²)
#[inline]
pub fn instability_factor(relative_slenderness: f64, beta_c: f64) -> f64 {
    0.5 * (1.0 + beta_c * (relative_slenderness - 0.3) + relative_slenderness.powi(2))
}

/// Buckling reduction coefficient
///
/// # Formula
/// k_c = 1 / (k + √(k² − λ_rel²))
///
/// NaN when `k < λ_rel`, which happens for large β_c on stocky columns.
///
/// # Example
/// ```rust
/// use timber_core::equations::buckling::{buckling_reduction, instability_factor};
///
/// // At λ_rel = 0.3 the straightness term vanishes
/// let k = instability_factor(0.3, 0.2);
/// assert!((k - 0.545).abs() < 1e-12);
/// let k_c = buckling_reduction(k, 0.3);
/// assert!((k_c - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn buckling_reduction(instability_factor: f64, relative_slenderness: f64) -> f64 {
    let k = instability_factor;
    1.0 / (k + (k.powi(2) - relative_slenderness.powi(2)).sqrt())
}

// =============================================================================
// UNIT TESTS
// =============================================================================
