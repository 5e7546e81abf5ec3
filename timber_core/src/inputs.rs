//! Default substitution for flat input bundles.
//!
//! Request bundles arrive as flat key/value records where any key may be
//! missing. Every field has a documented default, and a value of exactly
//! zero is treated the same as a missing one, so `{"density": 0}` resolves
//! to the default density.

use crate::errors::{CalcError, CalcResult};

/// Resolve an optional input value: absent and zero both take `default`.
///
/// ```rust
/// use timber_core::inputs::or_default;
///
/// assert_eq!(or_default(None, 1.3), 1.3);
/// assert_eq!(or_default(Some(0.0), 1.3), 1.3);
/// assert_eq!(or_default(Some(1.25), 1.3), 1.25);
/// ```
#[inline]
pub fn or_default(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v != 0.0 => v,
        _ => default,
    }
}

/// Resolve a length-like input and reject negative values.
///
/// ```rust
/// use timber_core::inputs::resolve_length;
///
/// assert_eq!(resolve_length("height", None, 2.0).unwrap(), 2.0);
/// assert!(resolve_length("height", Some(-1.0), 2.0).is_err());
/// ```
pub fn resolve_length(field: &str, value: Option<f64>, default: f64) -> CalcResult<f64> {
    let resolved = or_default(value, default);
    if resolved < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            resolved.to_string(),
            "Must be positive",
        ));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_length_error_names_field() {
        let err = resolve_length("beam_length", Some(-0.5), 2.0).unwrap_err();
        match err {
            CalcError::InvalidInput { field, value, .. } => {
                assert_eq!(field, "beam_length");
                assert_eq!(value, "-0.5");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_negative_values_are_kept() {
        assert_eq!(or_default(Some(-2.0), 5.0), -2.0);
    }

    #[test]
    fn test_negative_zero_falls_back() {
        assert_eq!(or_default(Some(-0.0), 5.0), 5.0);
    }
}
