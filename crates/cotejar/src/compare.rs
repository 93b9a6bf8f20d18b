//! Scalar comparison engine.
//!
//! Pure predicates deciding whether two numbers satisfy a relation, either
//! exactly or within an absolute [`Tolerance`], plus the diagnostic
//! messages describing the magnitude and relative size of any discrepancy.
//!
//! ## Toyota Way Application
//!
//! - **Jidoka**: a failed comparison stops with the full numeric context
//!   (error, relative error, tolerance), not a bare boolean
//! - **Genchi Genbutsu**: messages always show the actual observed value
//!   next to the reference

use crate::diagnostic::{keys, Diagnostics};
use crate::result::{CotejarError, CotejarResult};
use crate::tolerance::Tolerance;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// RELATION
// =============================================================================

/// The relation a comparison asserts between the actual and the reference
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    /// Actual equals reference (within tolerance, when one is given).
    Equal,
    /// Actual differs from reference (beyond tolerance, when one is given).
    NotEqual,
    /// Actual is strictly greater than reference.
    Greater,
    /// Actual is greater than or equal to reference.
    GreaterOrEqual,
    /// Actual is strictly less than reference.
    Less,
    /// Actual is less than or equal to reference.
    LessOrEqual,
}

impl Relation {
    /// The comparison operator as written in messages.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
        }
    }

    /// Whether this relation orders its operands (as opposed to testing
    /// equality). Ordering relations are undefined for NaN operands.
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(
            self,
            Self::Greater | Self::GreaterOrEqual | Self::Less | Self::LessOrEqual
        )
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// =============================================================================
// COMPARISON
// =============================================================================

/// An immutable scalar comparison: actual vs reference under a [`Relation`],
/// optionally within a [`Tolerance`].
///
/// Constructed per check and consumed once. The tolerance always works in
/// favor of passing: it widens an equality band and relaxes an ordering
/// boundary in the permissive direction, never tightening either.
///
/// ## Example
///
/// ```
/// use cotejar::{Comparison, Relation, Tolerance};
///
/// let cmp = Comparison::new(0.9, 1.0, Relation::GreaterOrEqual)
///     .with_tolerance(Tolerance::new(0.1).unwrap());
/// assert!(cmp.evaluate().is_ok()); // 0.9 + 0.1 >= 1.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    actual: f64,
    reference: f64,
    relation: Relation,
    tolerance: Option<Tolerance>,
}

impl Comparison {
    /// Bind actual, reference, and the asserted relation. No tolerance:
    /// equality uses the platform-native `==` (NaN never equals itself) and
    /// ordering is unrelaxed.
    #[must_use]
    pub const fn new(actual: f64, reference: f64, relation: Relation) -> Self {
        Self {
            actual,
            reference,
            relation,
            tolerance: None,
        }
    }

    /// Allow the comparison an absolute tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// The value under check.
    #[must_use]
    pub const fn actual(&self) -> f64 {
        self.actual
    }

    /// The reference (expected) value.
    #[must_use]
    pub const fn reference(&self) -> f64 {
        self.reference
    }

    /// The asserted relation.
    #[must_use]
    pub const fn relation(&self) -> Relation {
        self.relation
    }

    /// The tolerance, when one was supplied.
    #[must_use]
    pub const fn tolerance(&self) -> Option<Tolerance> {
        self.tolerance
    }

    /// Decide the comparison without building a failure.
    ///
    /// # Errors
    ///
    /// Returns [`CotejarError::InvalidComparison`] when an ordering relation
    /// involves a NaN operand: NaN ordering is not total, so answering
    /// `false` would be indistinguishable from a legitimate miss.
    pub fn holds(&self) -> CotejarResult<bool> {
        if self.relation.is_ordering() && (self.actual.is_nan() || self.reference.is_nan()) {
            return Err(CotejarError::InvalidComparison {
                message: format!(
                    "cannot order {} against {}: NaN has no defined ordering",
                    self.actual, self.reference
                ),
            });
        }

        let allowed = self.tolerance.map(Tolerance::value);
        let holds = match self.relation {
            Relation::Equal => self.equal_holds(allowed),
            Relation::NotEqual => !self.equal_holds(allowed),
            Relation::Greater => self.actual + allowed.unwrap_or(0.0) > self.reference,
            Relation::GreaterOrEqual => self.actual + allowed.unwrap_or(0.0) >= self.reference,
            Relation::Less => self.actual - allowed.unwrap_or(0.0) < self.reference,
            Relation::LessOrEqual => self.actual - allowed.unwrap_or(0.0) <= self.reference,
        };
        Ok(holds)
    }

    /// Evaluate the comparison: `Ok(())` when it holds, otherwise a typed
    /// failure carrying the full numeric context.
    ///
    /// # Errors
    ///
    /// [`CotejarError::AssertionFailed`] when the relation does not hold,
    /// [`CotejarError::InvalidComparison`] for NaN ordering.
    pub fn evaluate(&self) -> CotejarResult<()> {
        if self.holds()? {
            return Ok(());
        }
        Err(self.failure())
    }

    // Equality band: native `==` without a tolerance, |a − r| <= t with one.
    fn equal_holds(&self, allowed: Option<f64>) -> bool {
        match allowed {
            None => self.actual == self.reference,
            Some(t) => (self.actual - self.reference).abs() <= t,
        }
    }

    /// Absolute error `|actual − reference|`.
    #[must_use]
    pub fn absolute_error(&self) -> f64 {
        (self.actual - self.reference).abs()
    }

    /// Signed error `reference − actual`.
    #[must_use]
    pub fn signed_error(&self) -> f64 {
        self.reference - self.actual
    }

    /// Error relative to the reference value. May be `±inf` or NaN when the
    /// reference is zero.
    #[must_use]
    pub fn relative_error(&self) -> f64 {
        self.signed_error() / self.reference
    }

    fn failure(&self) -> CotejarError {
        let mut diagnostics = Diagnostics::new()
            .with(keys::EXPECTED, self.reference)
            .with(keys::ACTUAL, self.actual);
        if let Some(t) = self.tolerance {
            diagnostics.push(keys::ACCURACY, t);
        }

        let message = match self.relation {
            Relation::Equal => {
                diagnostics.push(keys::ERROR, format_args!("{:e}", self.absolute_error()));
                match self.tolerance {
                    Some(t) => format!(
                        "expected {} ± {}, got {} (error: {:e})",
                        self.reference,
                        t,
                        self.actual,
                        self.absolute_error()
                    ),
                    None => format!(
                        "expected {}, got {} (error: {:e})",
                        self.reference,
                        self.actual,
                        self.absolute_error()
                    ),
                }
            }
            Relation::NotEqual => {
                diagnostics.push(keys::ERROR, format_args!("{:e}", self.absolute_error()));
                match self.tolerance {
                    Some(t) => format!(
                        "expected anything but {} ± {}, got {} (only {:e} away)",
                        self.reference,
                        t,
                        self.actual,
                        self.absolute_error()
                    ),
                    None => format!(
                        "expected anything but {}, got exactly that",
                        self.reference
                    ),
                }
            }
            _ => {
                diagnostics.push(keys::ERROR, format_args!("{:e}", self.signed_error()));
                diagnostics.push(keys::RELATIVE_ERROR, self.relative_error());
                match self.tolerance {
                    Some(t) => format!(
                        "expected value {} {} within {}, got {} (error: {:e}, relative error: {})",
                        self.relation,
                        self.reference,
                        t,
                        self.actual,
                        self.signed_error(),
                        self.relative_error()
                    ),
                    None => format!(
                        "expected value {} {}, got {} (error: {:e}, relative error: {})",
                        self.relation,
                        self.reference,
                        self.actual,
                        self.signed_error(),
                        self.relative_error()
                    ),
                }
            }
        };

        CotejarError::AssertionFailed {
            message,
            diagnostics,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tolerance {
            Some(t) => write!(
                f,
                "{} {} {} (± {})",
                self.actual, self.relation, self.reference, t
            ),
            None => write!(f, "{} {} {}", self.actual, self.relation, self.reference),
        }
    }
}

// =============================================================================
// FREE FUNCTIONS
// =============================================================================

/// Check `|actual − expected| <= tolerance`; without a tolerance, the
/// platform-native `==` (preserving NaN semantics).
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] with the absolute error in scientific
/// notation when the values differ beyond the tolerance.
pub fn are_equal(actual: f64, expected: f64, tolerance: Option<Tolerance>) -> CotejarResult<()> {
    comparison(actual, expected, Relation::Equal, tolerance).evaluate()
}

/// Logical negation of [`are_equal`] for the same inputs.
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] describing how close the undesired
/// match was.
pub fn are_not_equal(
    actual: f64,
    expected: f64,
    tolerance: Option<Tolerance>,
) -> CotejarResult<()> {
    comparison(actual, expected, Relation::NotEqual, tolerance).evaluate()
}

/// Check `actual > reference`, relaxed to `actual + tolerance > reference`
/// when a tolerance is given.
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] on a miss,
/// [`CotejarError::InvalidComparison`] for NaN operands.
pub fn greater(actual: f64, reference: f64, tolerance: Option<Tolerance>) -> CotejarResult<()> {
    comparison(actual, reference, Relation::Greater, tolerance).evaluate()
}

/// Check `actual >= reference`, relaxed to `actual + tolerance >= reference`
/// when a tolerance is given.
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] on a miss,
/// [`CotejarError::InvalidComparison`] for NaN operands.
pub fn greater_or_equal(
    actual: f64,
    reference: f64,
    tolerance: Option<Tolerance>,
) -> CotejarResult<()> {
    comparison(actual, reference, Relation::GreaterOrEqual, tolerance).evaluate()
}

/// Check `actual < reference`, relaxed to `actual − tolerance < reference`
/// when a tolerance is given.
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] on a miss,
/// [`CotejarError::InvalidComparison`] for NaN operands.
pub fn less(actual: f64, reference: f64, tolerance: Option<Tolerance>) -> CotejarResult<()> {
    comparison(actual, reference, Relation::Less, tolerance).evaluate()
}

/// Check `actual <= reference`, relaxed to `actual − tolerance <= reference`
/// when a tolerance is given.
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] on a miss,
/// [`CotejarError::InvalidComparison`] for NaN operands.
pub fn less_or_equal(
    actual: f64,
    reference: f64,
    tolerance: Option<Tolerance>,
) -> CotejarResult<()> {
    comparison(actual, reference, Relation::LessOrEqual, tolerance).evaluate()
}

/// Assert the value is NaN.
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] when the value is a number.
pub fn is_nan(value: f64) -> CotejarResult<()> {
    if value.is_nan() {
        Ok(())
    } else {
        Err(CotejarError::AssertionFailed {
            message: format!("expected NaN, got {value}"),
            diagnostics: Diagnostics::new()
                .with(keys::EXPECTED, "NaN")
                .with(keys::ACTUAL, value),
        })
    }
}

/// Assert the value is not NaN.
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] when the value is NaN.
pub fn is_not_nan(value: f64) -> CotejarResult<()> {
    if value.is_nan() {
        Err(CotejarError::AssertionFailed {
            message: "expected a number, got NaN".to_string(),
            diagnostics: Diagnostics::new()
                .with(keys::EXPECTED, "a number")
                .with(keys::ACTUAL, "NaN"),
        })
    } else {
        Ok(())
    }
}

fn comparison(
    actual: f64,
    reference: f64,
    relation: Relation,
    tolerance: Option<Tolerance>,
) -> Comparison {
    let cmp = Comparison::new(actual, reference, relation);
    match tolerance {
        Some(t) => cmp.with_tolerance(t),
        None => cmp,
    }
}
