//! # Reported Values
//!
//! Every number the engine hands to a consumer is reported twice: a
//! machine-readable value rounded to two decimals and a human-readable
//! string with its unit. [`Metric`] carries both.
//!
//! ## JSON Example
//!
//! ```json
//! { "print_value": "11.02 kg", "value": 11.02 }
//! ```
//!
//! ```rust
//! use timber_core::report::Metric;
//! use timber_core::units::Kilograms;
//!
//! let weight = Metric::kilograms(Kilograms(11.0227));
//! assert_eq!(weight.value, 11.02);
//! assert_eq!(weight.print_value, "11.02 kg");
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{Kilograms, Kilonewtons, Meters, Millimeters};

/// Display text for an accepted check
pub const ACCEPTABLE: &str = "Acceptable";

/// Display text for a rejected check
pub const UNACCEPTABLE: &str = "Unacceptable";

/// Round to two decimal places, half to even on the exact binary value.
///
/// Goes through the same `{:.2}` formatting the display strings use, so a
/// [`Metric`]'s value and text never disagree on a tie.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// A reported value with its formatted display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric<T> {
    /// Human-readable text including the unit
    pub print_value: String,
    /// Machine-readable value
    pub value: T,
}

impl Metric<f64> {
    /// Report `value` rounded to two decimals with a custom display string
    pub fn new(value: f64, print_value: impl Into<String>) -> Self {
        Metric {
            print_value: print_value.into(),
            value: round2(value),
        }
    }

    /// `"11.02 kg"`
    pub fn kilograms(mass: Kilograms) -> Self {
        Self::new(mass.0, format!("{:.2} kg", mass.0))
    }

    /// Whole millimetres in the text, two decimals in the value: `"65 mm"`
    pub fn whole_millimeters(length: Millimeters) -> Self {
        Self::new(length.0, format!("{:.0} mm", length.0))
    }

    /// `"25.91 mm"`
    pub fn millimeters(length: Millimeters) -> Self {
        Self::new(length.0, format!("{:.2} mm", length.0))
    }

    /// `"2.00 m"`
    pub fn meters(length: Meters) -> Self {
        Self::new(length.0, format!("{:.2} m", length.0))
    }

    /// `"11.04 kN"`
    pub fn kilonewtons(force: Kilonewtons) -> Self {
        Self::new(force.0, format!("{:.2} kN", force.0))
    }

    /// `"99.35%"`
    pub fn percent(ratio: f64) -> Self {
        Self::new(ratio, format!("{:.2}%", ratio))
    }

    /// Formula-sheet style: `"jc1 = 63.33"`
    pub fn labelled(name: &str, value: f64) -> Self {
        Self::new(value, format!("{} = {:.2}", name, value))
    }
}

impl Metric<bool> {
    /// `"Acceptable"` / `"Unacceptable"`
    pub fn status(accepted: bool) -> Self {
        Metric {
            print_value: if accepted { ACCEPTABLE } else { UNACCEPTABLE }.to_string(),
            value: accepted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(99.35397503403243), 99.35);
        assert_eq!(round2(1555.888), 1555.89);
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn test_round2_ties_match_display() {
        // 85.125 and 0.125 are exact binary ties
        assert_eq!(round2(85.125), 85.12);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(-0.125), -0.12);

        let m = Metric::labelled("b_clm", 85.125);
        assert_eq!(m.print_value, "b_clm = 85.12");
        assert_eq!(m.value, 85.12);
    }

    #[test]
    fn test_whole_millimeters() {
        let width = Metric::whole_millimeters(Meters(0.067).into());
        assert_eq!(width.print_value, "67 mm");
        assert_eq!(width.value, 67.0);
    }

    #[test]
    fn test_percent_and_meters() {
        assert_eq!(Metric::percent(67.3).print_value, "67.30%");
        assert_eq!(Metric::meters(Meters(2.0)).print_value, "2.00 m");
    }

    #[test]
    fn test_status() {
        let ok = Metric::status(true);
        assert_eq!(ok.print_value, "Acceptable");
        assert!(ok.value);
        assert_eq!(Metric::status(false).print_value, "Unacceptable");
    }

    #[test]
    fn test_labelled() {
        let m = Metric::labelled("jc1", 190.0 / 3.0);
        assert_eq!(m.print_value, "jc1 = 63.33");
        assert_eq!(m.value, 63.33);
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_string(&Metric::kilonewtons(Kilonewtons(11.0357))).unwrap();
        assert_eq!(json, r#"{"print_value":"11.04 kN","value":11.04}"#);
    }
}
