//! # Unit Types
//!
//! Type-safe wrappers for the units that cross the engine's boundary. These
//! provide compile-time safety against unit confusion while remaining
//! lightweight (just f64 wrappers).
//!
//! ## Units in Use
//!
//! - Member geometry and spans: metres (m), reported in millimetres (mm)
//! - Dowel joint model: inches (in) and pounds-force (lb), reported in mm and kN
//! - Member self-weight: kilograms (kg)
//!
//! Internal formulas of the utilization model work on raw `f64` values; the
//! SI to mm/MPa bridge there is encoded by explicit 10³/10⁶/10¹² factors.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::units::{Inches, Meters, Millimeters};
//!
//! let width = Meters(0.065);
//! let width_mm: Millimeters = width.into();
//! assert!((width_mm.0 - 65.0).abs() < 1e-9);
//!
//! let dowel: Millimeters = Inches(1.0).into();
//! assert_eq!(dowel.0, 25.4);
//! ```

use serde::{Deserialize, Serialize};

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Kilonewtons per pound-force
pub const KN_PER_POUND: f64 = 0.00444822;

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Inches> for Millimeters {
    fn from(inches: Inches) -> Self {
        Millimeters(inches.0 * MM_PER_INCH)
    }
}

impl From<Millimeters> for Inches {
    fn from(mm: Millimeters) -> Self {
        Inches(mm.0 / MM_PER_INCH)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Pounds> for Kilonewtons {
    fn from(lb: Pounds) -> Self {
        Kilonewtons(lb.0 * KN_PER_POUND)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);
