//! # Cross-Section Property Formulas
//!
//! Geometric properties of the solid rectangular timber sections the
//! searches try.
//!
//! ## Notation
//!
//! - `A` = Cross-sectional area
//! - `I` = Moment of inertia (second moment of area)
//! - `i` = Radius of gyration (√(I/A))
//! - `b` = Width of section
//! - `d` = Depth (height) of section
//!
//! Sections are specified in metres; the utilization model takes `I` in mm⁴
//! and divides by an area scaled to the same base, so every formula here is
//! unit-agnostic.

// =============================================================================
// RECTANGULAR SECTION PROPERTIES
// =============================================================================

/// Calculate cross-sectional area for rectangular section
///
/// ```text
///     ┌─────────┐
///     │         │
///   d │         │
///     │         │
///     └─────────┘
///          b
/// ```
///
/// # Formula
/// A = b × d
///
/// # Example
/// ```rust
/// use timber_core::equations::section::rectangular_area;
///
/// // 65 x 139 mm
/// let area = rectangular_area(0.065, 0.139);
/// assert!((area - 0.009035).abs() < 1e-9);
/// ```
#[inline]
pub fn rectangular_area(b: f64, d: f64) -> f64 {
    b * d
}

/// Calculate moment of inertia for rectangular section about centroidal axis
///
/// ```text
///     ┌─────────┐
///     │         │
///   d │ ════════│ ← neutral axis at d/2
///     │         │
///     └─────────┘
///          b
/// ```
///
/// # Formula (Strong Axis Bending)
/// I = bd³/12
///
/// For weak axis bending swap the arguments: I = db³/12
///
/// # Arguments
/// * `b` - Width of section (perpendicular to bending)
/// * `d` - Depth of section (parallel to bending)
///
/// # Example
/// ```rust
/// use timber_core::equations::section::rectangular_moment_of_inertia;
///
/// // 100 x 150 mm, strong axis
/// let i = rectangular_moment_of_inertia(100.0, 150.0);
/// assert!((i - 28_125_000.0).abs() < 1e-6);
/// ```
#[inline]
pub fn rectangular_moment_of_inertia(b: f64, d: f64) -> f64 {
    b * d.powi(3) / 12.0
}

/// Radius of gyration from a moment of inertia and an area
///
/// # Formula
/// i = √(I/A)
///
/// The caller keeps `I` and `A` in consistent units; the result is in the
/// square root of their ratio.
#[inline]
pub fn radius_of_gyration(moment_of_inertia: f64, area: f64) -> f64 {
    (moment_of_inertia / area).sqrt()
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() / b.abs().max(1.0) < 1e-9
    }

    #[test]
    fn test_rectangular_moment_of_inertia_axes() {
        let i_y = rectangular_moment_of_inertia(65.0, 139.0);
        let i_z = rectangular_moment_of_inertia(139.0, 65.0);
        // 65 * 139^3 / 12 and 139 * 65^3 / 12
        assert!(approx_eq(i_y, 14_547_102.916_666_666), "I_y = {}", i_y);
        assert!(approx_eq(i_z, 3_181_072.916_666_666), "I_z = {}", i_z);
    }

    #[test]
    fn test_radius_of_gyration_matches_d_over_root_12() {
        // For any rectangle: i = d / √12
        let (b, d) = (100.0, 150.0);
        let i = radius_of_gyration(
            rectangular_moment_of_inertia(b, d),
            rectangular_area(b, d),
        );
        assert!(approx_eq(i, d / 12.0_f64.sqrt()), "i = {}", i);
    }
}
