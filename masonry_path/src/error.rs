// Copyright 2025 the Masonry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while validating shape parameters.

use thiserror::Error;

/// Invalid input to [`generate_path`](crate::generate_path).
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ShapeError {
    /// A length or scale was zero, negative, or not finite.
    #[error("`{parameter}` must be positive and finite, got {value}")]
    NonPositive {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A measured length was negative or not finite.
    #[error("`{parameter}` must be non-negative and finite, got {value}")]
    Negative {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// [`ShapeFlags::NEST`](crate::ShapeFlags::NEST) was set without a nest length.
    #[error("a nested region requires `nest_length_y`")]
    MissingNestLength,
}

/// Returns `value` if it is finite and strictly positive.
///
/// # Errors
///
/// Returns [`ShapeError::NonPositive`] naming `parameter` otherwise.
pub fn ensure_positive(parameter: &'static str, value: f64) -> Result<f64, ShapeError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::NonPositive { parameter, value })
    }
}

/// Returns `value` if it is finite and not negative.
///
/// # Errors
///
/// Returns [`ShapeError::Negative`] naming `parameter` otherwise.
pub fn ensure_non_negative(parameter: &'static str, value: f64) -> Result<f64, ShapeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::Negative { parameter, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_a_length_but_not_a_scale() {
        assert_eq!(ensure_non_negative("w", 0.0), Ok(0.0));
        assert!(ensure_positive("scale", 0.0).is_err());
        assert!(ensure_non_negative("w", -1.0).is_err());
        assert!(ensure_non_negative("w", f64::NAN).is_err());
        assert!(ensure_non_negative("w", f64::INFINITY).is_err());
    }
}
