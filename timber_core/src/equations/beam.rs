//! # Simply-Supported Beam Formulas
//!
//! Midspan and support values for a simply-supported beam under a full-span
//! uniform load, plus the rectangular-section shear stress.
//!
//! ## Notation
//!
//! - `L` = Span length
//! - `w` = Uniform load intensity (force per unit length)
//! - `M` = Bending moment
//! - `V` = Shear force
//! - `δ` = Deflection
//! - `E` = Modulus of elasticity
//! - `I` = Moment of inertia
//!
//! ## Sign Conventions
//!
//! - Loads: Positive downward
//! - Moment: Positive causes tension on bottom (sagging)
//! - Deflection: Positive downward
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1

// =============================================================================
// UNIFORM LOAD FORMULAS
// Simply-supported beam with uniform load w over entire span
// =============================================================================

/// Support reaction for a full-span uniform load
///
/// ```text
///    ↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓ w
///    ─────────────────
///    △               △
///   R1 ←────L─────→ R2
/// ```
///
/// # Formula
/// R1 = R2 = V_max = wL/2
#[inline]
pub fn uniform_load_reaction(w: f64, l: f64) -> f64 {
    w * l / 2.0
}

/// Maximum (midspan) moment for a full-span uniform load
///
/// # Formula
/// M_max = wL²/8
///
/// # Example
/// ```rust
/// use timber_core::equations::beam::uniform_load_max_moment;
///
/// // 7.44 kN/m over 2 m
/// let m = uniform_load_max_moment(7.44, 2.0);
/// assert!((m - 3.72).abs() < 1e-12);
/// ```
#[inline]
pub fn uniform_load_max_moment(w: f64, l: f64) -> f64 {
    w * l.powi(2) / 8.0
}

/// Maximum shear stress in a rectangular section
///
/// Parabolic distribution with its peak at the neutral axis:
///
/// # Formula
/// τ_max = 3/2 × V / A
#[inline]
pub fn rectangular_shear_stress(v: f64, area: f64) -> f64 {
    3.0 / 2.0 * v / area
}

/// Maximum (midspan) deflection for a full-span uniform load
///
/// # Formula (Roark's Table 8.1, Case 2e)
/// δ_max = 5wL⁴/(384EI)
///
/// # Arguments
/// * `w` - Uniform load intensity
/// * `l` - Span length
/// * `e` - Modulus of elasticity
/// * `i` - Moment of inertia
///
/// Units pass through untouched; callers scale the result.
#[inline]
pub fn uniform_load_max_deflection(w: f64, l: f64, e: f64, i: f64) -> f64 {
    5.0 * (w * l.powi(4)) / (384.0 * e * i)
}

/// Deflection limit `L / ratio` (e.g. L/300)
#[inline]
pub fn deflection_limit(l: f64, ratio: f64) -> f64 {
    l / ratio
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_uniform_load_reaction_and_moment() {
        // w = 5.66, L = 2 => R = 5.66, M = 2.83
        assert!((uniform_load_reaction(5.66, 2.0) - 5.66).abs() < EPSILON);
        assert!((uniform_load_max_moment(5.66, 2.0) - 2.83).abs() < EPSILON);
    }

    #[test]
    fn test_moment_equals_reaction_times_quarter_span() {
        let (w, l) = (3.3, 4.5);
        let m = uniform_load_max_moment(w, l);
        let r = uniform_load_reaction(w, l);
        assert!((m - r * l / 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_rectangular_shear_stress() {
        // V = 3, A = 0.015 => 1.5 * 200 = 300
        assert!((rectangular_shear_stress(3.0, 0.015) - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_load_max_deflection() {
        // 5 * 1 * 16 / (384 * 2 * 0.5) = 0.208333
        let d = uniform_load_max_deflection(1.0, 2.0, 2.0, 0.5);
        assert!((d - 80.0 / 384.0).abs() < EPSILON);
    }

    #[test]
    fn test_deflection_limit() {
        assert!((deflection_limit(2.0, 300.0) - 0.006_666_666_666).abs() < 1e-9);
        assert_eq!(deflection_limit(3.0, 150.0), 0.02);
    }
}
