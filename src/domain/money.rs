//! Monetary amounts and minor/major unit conversion.
//!
//! Persisted and wire-transferred prices are always integer minor units (cents).
//! The form layer works in major units (the decimal a human types). All conversion
//! between the two goes through [`MinorUnits`] so the factor lives in one place.

use crate::domain::error::{MenuhubError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of minor units in one major unit.
pub const MINOR_UNIT_FACTOR: i64 = 100;

/// Largest magnitude an `f64` represents without losing integer precision (2^53).
const MAX_EXACT_F64_INT: i64 = 9_007_199_254_740_992;

/// Tolerance below which a scaled major-unit value is considered a whole cent.
const SUB_CENT_EPSILON: f64 = 1e-6;

/// An amount of money in integer minor currency units.
///
/// Serialized as a bare integer, which is the server's wire contract.
///
/// # Examples
///
/// ```
/// use menuhub::domain::MinorUnits;
///
/// let price = MinorUnits(1050);
/// assert!((price.to_major() - 10.5).abs() < f64::EPSILON);
/// assert_eq!(MinorUnits::from_major(10.5).unwrap(), price);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(pub i64);

impl MinorUnits {
    /// Converts to major units, rounded to two decimal places.
    ///
    /// Exact for every amount whose magnitude fits in 53 bits. Larger amounts
    /// cannot be represented exactly as a decimal `f64`; the conversion still
    /// happens but is reported as a data-quality condition.
    #[must_use]
    pub fn to_major(self) -> f64 {
        if self.0.unsigned_abs() > MAX_EXACT_F64_INT.unsigned_abs() {
            tracing::warn!(
                minor_units = self.0,
                "minor-unit amount exceeds exact f64 range, major-unit value is approximate"
            );
        }

        #[allow(clippy::cast_precision_loss)]
        let major = self.0 as f64 / MINOR_UNIT_FACTOR as f64;
        (major * 100.0).round() / 100.0
    }

    /// Converts a major-unit amount back to minor units, rounding to the nearest cent.
    ///
    /// This is the exact inverse of [`MinorUnits::to_major`] for every value that
    /// function produces. A value carrying sub-cent precision (`2.999`) is
    /// rounded and reported as a data-quality condition.
    ///
    /// # Errors
    ///
    /// Returns [`MenuhubError::Validation`] on the `price` field if the amount is
    /// not finite or does not fit in an `i64` after scaling.
    pub fn from_major(major: f64) -> Result<Self> {
        if !major.is_finite() {
            return Err(MenuhubError::validation("price", "must be a valid number"));
        }

        #[allow(clippy::cast_precision_loss)]
        let scaled = major * MINOR_UNIT_FACTOR as f64;
        let rounded = scaled.round();

        #[allow(clippy::cast_precision_loss)]
        let limit = MAX_EXACT_F64_INT as f64;
        if rounded.abs() > limit {
            return Err(MenuhubError::validation("price", "amount is too large"));
        }

        if (scaled - rounded).abs() > SUB_CENT_EPSILON {
            tracing::warn!(
                major_units = major,
                rounded_minor_units = rounded,
                "major-unit amount has sub-cent precision, rounding to nearest minor unit"
            );
        }

        #[allow(clippy::cast_possible_truncation)]
        let minor = rounded as i64;
        Ok(Self(minor))
    }
}

impl fmt::Display for MinorUnits {
    /// Canonical integer form, no grouping separators.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
