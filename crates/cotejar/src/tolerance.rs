//! Validated absolute tolerance for numeric checks.
//!
//! ## Toyota Way Application
//!
//! - **Poka-Yoke**: a `Tolerance` cannot hold a negative or NaN value, so a
//!   comparison can never silently run with a nonsensical accuracy

use crate::result::{CotejarError, CotejarResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum permitted absolute difference between an actual and a reference
/// value for the two to be considered equal, or for an ordering constraint
/// to be considered satisfied.
///
/// Construction validates the value: negative or NaN tolerances are rejected
/// with [`CotejarError::InvalidTolerance`] before any comparison runs.
///
/// ## Example
///
/// ```
/// use cotejar::Tolerance;
///
/// let tol = Tolerance::new(1e-6).unwrap();
/// assert_eq!(tol.value(), 1e-6);
/// assert!(Tolerance::new(-0.5).is_err());
/// assert!(Tolerance::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Tolerance(f64);

impl Tolerance {
    /// The zero tolerance: values must match exactly.
    pub const EXACT: Self = Self(0.0);

    /// Create a tolerance from a non-negative, non-NaN number.
    ///
    /// # Errors
    ///
    /// Returns [`CotejarError::InvalidTolerance`] for negative or NaN input.
    pub fn new(value: f64) -> CotejarResult<Self> {
        if value.is_nan() || value < 0.0 {
            return Err(CotejarError::InvalidTolerance { value });
        }
        Ok(Self(value))
    }

    /// The permitted absolute difference.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Whether this tolerance demands exact equality.
    #[must_use]
    pub fn is_exact(self) -> bool {
        self.0 == 0.0
    }
}

impl TryFrom<f64> for Tolerance {
    type Error = CotejarError;

    fn try_from(value: f64) -> CotejarResult<Self> {
        Self::new(value)
    }
}

impl From<Tolerance> for f64 {
    fn from(tolerance: Tolerance) -> Self {
        tolerance.0
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any non-negative finite value is accepted and preserved.
        #[test]
        fn prop_non_negative_accepted(value in 0.0f64..1e12) {
            let tol = Tolerance::new(value).unwrap();
            prop_assert_eq!(tol.value(), value);
        }

        /// Any negative value is rejected before a comparison could run.
        #[test]
        fn prop_negative_rejected(value in -1e12f64..-f64::MIN_POSITIVE) {
            prop_assert!(Tolerance::new(value).is_err());
        }
    }
}
