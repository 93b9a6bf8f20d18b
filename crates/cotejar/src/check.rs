//! Fluent check surface.
//!
//! [`check`] wraps a value for immediate, type-generic checks; for floats it
//! also opens deferred comparisons that bind actual, reference, and relation
//! up front and are closed later by the accuracy-supplying step. Leaving a
//! deferred comparison unclosed is itself a failure, enforced both at compile
//! time (`#[must_use]`) and at scope exit.
//!
//! ## Toyota Way Application
//!
//! - **Poka-Yoke**: an opened comparison that is never finalized cannot
//!   silently count as a pass

use crate::compare::{self, Comparison, Relation};
use crate::diagnostic::{keys, Diagnostics};
use crate::result::{CotejarError, CotejarResult};
use crate::sequence;
use crate::tolerance::Tolerance;
use std::cmp::Ordering;
use std::fmt;

/// Wrap a value for fluent checks.
///
/// ```
/// use cotejar::check;
///
/// check(5).is_greater_than(3)?;
/// check("cotejar").is_equal_to("cotejar")?;
/// check(0.9f64).greater_or_equal(1.0).with_accuracy(0.1)?;
/// # Ok::<(), cotejar::CotejarError>(())
/// ```
pub fn check<T>(actual: T) -> ValueCheck<T> {
    ValueCheck { actual }
}

/// Wrap a float slice for fluent sequence checks.
pub fn check_sequence(actual: &[f64]) -> SequenceCheck<'_> {
    SequenceCheck { actual }
}

/// Anchored entry point for the fluent surface.
///
/// `Check::that(x)` is [`check(x)`](check) for callers who prefer a named
/// namespace over a free function.
#[derive(Debug, Clone, Copy)]
pub struct Check;

impl Check {
    /// Wrap a value for fluent checks.
    #[must_use]
    pub fn that<T>(actual: T) -> ValueCheck<T> {
        check(actual)
    }

    /// Wrap a float slice for fluent sequence checks.
    #[must_use]
    pub fn sequence(actual: &[f64]) -> SequenceCheck<'_> {
        check_sequence(actual)
    }
}

// =============================================================================
// VALUE CHECK
// =============================================================================

/// A value under check. Holds the actual value; each check method compares
/// it against a caller-supplied reference.
#[derive(Debug, Clone, Copy)]
pub struct ValueCheck<T> {
    actual: T,
}

impl<T> ValueCheck<T> {
    /// Borrow the wrapped value. The only way back out of the fluent
    /// surface; there is no implicit unwrapping.
    pub const fn value(&self) -> &T {
        &self.actual
    }

    /// Consume the check and return the wrapped value.
    pub fn into_value(self) -> T {
        self.actual
    }
}

impl<T> ValueCheck<T>
where
    T: PartialEq + fmt::Debug,
{
    /// Check exact equality via the type's own `==`.
    ///
    /// # Errors
    ///
    /// [`CotejarError::AssertionFailed`] when the values differ.
    pub fn is_equal_to(&self, expected: T) -> CotejarResult<()> {
        if self.actual == expected {
            return Ok(());
        }
        Err(CotejarError::AssertionFailed {
            message: format!("expected {expected:?}, got {:?}", self.actual),
            diagnostics: Diagnostics::new()
                .with(keys::EXPECTED, format_args!("{expected:?}"))
                .with(keys::ACTUAL, format_args!("{:?}", self.actual)),
        })
    }

    /// Check inequality via the type's own `!=`.
    ///
    /// # Errors
    ///
    /// [`CotejarError::AssertionFailed`] when the values are equal.
    pub fn is_not_equal_to(&self, expected: T) -> CotejarResult<()> {
        if self.actual != expected {
            return Ok(());
        }
        Err(CotejarError::AssertionFailed {
            message: format!("expected anything but {expected:?}, got exactly that"),
            diagnostics: Diagnostics::new()
                .with(keys::EXPECTED, format_args!("not {expected:?}"))
                .with(keys::ACTUAL, format_args!("{:?}", self.actual)),
        })
    }
}

impl<T> ValueCheck<T>
where
    T: PartialOrd + fmt::Debug,
{
    /// Check `actual > reference`.
    ///
    /// # Errors
    ///
    /// [`CotejarError::AssertionFailed`] on a miss,
    /// [`CotejarError::InvalidComparison`] when the values have no ordering.
    pub fn is_greater_than(&self, reference: T) -> CotejarResult<()> {
        self.ordered(reference, Relation::Greater, |o| o == Ordering::Greater)
    }

    /// Check `actual >= reference`.
    ///
    /// # Errors
    ///
    /// [`CotejarError::AssertionFailed`] on a miss,
    /// [`CotejarError::InvalidComparison`] when the values have no ordering.
    pub fn is_greater_or_equal_to(&self, reference: T) -> CotejarResult<()> {
        self.ordered(reference, Relation::GreaterOrEqual, |o| o != Ordering::Less)
    }

    /// Check `actual < reference`.
    ///
    /// # Errors
    ///
    /// [`CotejarError::AssertionFailed`] on a miss,
    /// [`CotejarError::InvalidComparison`] when the values have no ordering.
    pub fn is_less_than(&self, reference: T) -> CotejarResult<()> {
        self.ordered(reference, Relation::Less, |o| o == Ordering::Less)
    }

    /// Check `actual <= reference`.
    ///
    /// # Errors
    ///
    /// [`CotejarError::AssertionFailed`] on a miss,
    /// [`CotejarError::InvalidComparison`] when the values have no ordering.
    pub fn is_less_or_equal_to(&self, reference: T) -> CotejarResult<()> {
        self.ordered(reference, Relation::LessOrEqual, |o| o != Ordering::Greater)
    }

    fn ordered(
        &self,
        reference: T,
        relation: Relation,
        satisfied: impl Fn(Ordering) -> bool,
    ) -> CotejarResult<()> {
        let Some(ordering) = self.actual.partial_cmp(&reference) else {
            return Err(CotejarError::InvalidComparison {
                message: format!(
                    "values have no defined ordering: {:?} vs {reference:?}",
                    self.actual
                ),
            });
        };
        if satisfied(ordering) {
            return Ok(());
        }
        Err(CotejarError::AssertionFailed {
            message: format!(
                "expected value {relation} {reference:?}, got {:?}",
                self.actual
            ),
            diagnostics: Diagnostics::new()
                .with(keys::EXPECTED, format_args!("{relation} {reference:?}"))
                .with(keys::ACTUAL, format_args!("{:?}", self.actual)),
        })
    }
}

macro_rules! float_checks {
    ($ty:ty) => {
        impl ValueCheck<$ty> {
            /// Check tolerant equality: `|actual − expected| <= tolerance`.
            ///
            /// # Errors
            ///
            /// [`CotejarError::AssertionFailed`] when the values differ
            /// beyond the tolerance.
            pub fn is_close_to(&self, expected: $ty, tolerance: Tolerance) -> CotejarResult<()> {
                compare::are_equal(
                    f64::from(self.actual),
                    f64::from(expected),
                    Some(tolerance),
                )
            }

            /// Check the value is NaN.
            ///
            /// # Errors
            ///
            /// [`CotejarError::AssertionFailed`] when it is a number.
            pub fn is_nan(&self) -> CotejarResult<()> {
                compare::is_nan(f64::from(self.actual))
            }

            /// Check the value is not NaN.
            ///
            /// # Errors
            ///
            /// [`CotejarError::AssertionFailed`] when it is NaN.
            pub fn is_not_nan(&self) -> CotejarResult<()> {
                compare::is_not_nan(f64::from(self.actual))
            }

            /// Open a deferred equality comparison.
            pub fn equals(&self, expected: $ty) -> DeferredComparison {
                DeferredComparison::open(
                    f64::from(self.actual),
                    f64::from(expected),
                    Relation::Equal,
                )
            }

            /// Open a deferred inequality comparison.
            pub fn differs_from(&self, expected: $ty) -> DeferredComparison {
                DeferredComparison::open(
                    f64::from(self.actual),
                    f64::from(expected),
                    Relation::NotEqual,
                )
            }

            /// Open a deferred strictly-greater comparison.
            pub fn greater(&self, reference: $ty) -> DeferredComparison {
                DeferredComparison::open(
                    f64::from(self.actual),
                    f64::from(reference),
                    Relation::Greater,
                )
            }

            /// Open a deferred greater-or-equal comparison.
            pub fn greater_or_equal(&self, reference: $ty) -> DeferredComparison {
                DeferredComparison::open(
                    f64::from(self.actual),
                    f64::from(reference),
                    Relation::GreaterOrEqual,
                )
            }

            /// Open a deferred strictly-less comparison.
            pub fn less(&self, reference: $ty) -> DeferredComparison {
                DeferredComparison::open(
                    f64::from(self.actual),
                    f64::from(reference),
                    Relation::Less,
                )
            }

            /// Open a deferred less-or-equal comparison.
            pub fn less_or_equal(&self, reference: $ty) -> DeferredComparison {
                DeferredComparison::open(
                    f64::from(self.actual),
                    f64::from(reference),
                    Relation::LessOrEqual,
                )
            }
        }
    };
}

float_checks!(f64);
float_checks!(f32);

// =============================================================================
// DEFERRED COMPARISON
// =============================================================================

/// An opened comparison awaiting its accuracy.
///
/// Binds actual, reference, and relation; the check runs only when one of
/// the closing steps supplies the tolerance policy. Dropping an unclosed
/// comparison panics, so a fluent chain that forgets its terminal step fails
/// the test instead of silently passing.
#[must_use = "a deferred comparison checks nothing until closed with with_accuracy(), with_tolerance(), or exact()"]
#[derive(Debug)]
pub struct DeferredComparison {
    actual: f64,
    reference: f64,
    relation: Relation,
    closed: bool,
}

impl DeferredComparison {
    fn open(actual: f64, reference: f64, relation: Relation) -> Self {
        Self {
            actual,
            reference,
            relation,
            closed: false,
        }
    }

    /// Close with a raw accuracy value and evaluate.
    ///
    /// # Errors
    ///
    /// [`CotejarError::InvalidTolerance`] for a negative or NaN accuracy
    /// before any comparison occurs, otherwise the comparison's own failure.
    pub fn with_accuracy(mut self, accuracy: f64) -> CotejarResult<()> {
        self.closed = true;
        let tolerance = Tolerance::new(accuracy)?;
        self.finish(Some(tolerance))
    }

    /// Close with an already-validated [`Tolerance`] and evaluate.
    ///
    /// # Errors
    ///
    /// The comparison's own failure.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> CotejarResult<()> {
        self.closed = true;
        self.finish(Some(tolerance))
    }

    /// Close without a tolerance and evaluate: native equality for the
    /// equality relations, unrelaxed boundaries for the ordering ones.
    ///
    /// # Errors
    ///
    /// The comparison's own failure.
    pub fn exact(mut self) -> CotejarResult<()> {
        self.closed = true;
        self.finish(None)
    }

    fn finish(&self, tolerance: Option<Tolerance>) -> CotejarResult<()> {
        let comparison = Comparison::new(self.actual, self.reference, self.relation);
        match tolerance {
            Some(t) => comparison.with_tolerance(t).evaluate(),
            None => comparison.evaluate(),
        }
    }
}

impl Drop for DeferredComparison {
    fn drop(&mut self) {
        if !self.closed && !std::thread::panicking() {
            let guard = CotejarError::UnclosedComparison {
                description: format!("{} {} {}", self.actual, self.relation, self.reference),
            };
            panic!("{guard}");
        }
    }
}

// =============================================================================
// SEQUENCE CHECK
// =============================================================================

/// A float sequence under check.
#[derive(Debug, Clone, Copy)]
pub struct SequenceCheck<'a> {
    actual: &'a [f64],
}

impl SequenceCheck<'_> {
    /// Check exact element-wise equality.
    ///
    /// # Errors
    ///
    /// [`CotejarError::AssertionFailed`] at the first divergent index, or on
    /// a length mismatch once the shared prefix matches.
    pub fn is_equal_to(&self, expected: &[f64]) -> CotejarResult<()> {
        sequence::sequences_equal(self.actual, expected, None)
    }

    /// Check element-wise equality within a per-element tolerance.
    ///
    /// # Errors
    ///
    /// Same failures as [`Self::is_equal_to`].
    pub fn is_close_to(&self, expected: &[f64], tolerance: Tolerance) -> CotejarResult<()> {
        sequence::sequences_equal(self.actual, expected, Some(tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod generic_checks {
        use super::*;

        #[test]
        fn test_equality_on_integers() {
            assert!(check(42).is_equal_to(42).is_ok());
            assert!(check(42).is_equal_to(43).is_err());
        }

        #[test]
        fn test_equality_on_strings() {
            assert!(check("abc").is_equal_to("abc").is_ok());
            let err = check("abc").is_equal_to("abd").unwrap_err();
            assert!(format!("{err}").contains("\"abd\""));
        }

        #[test]
        fn test_inequality() {
            assert!(check(1).is_not_equal_to(2).is_ok());
            assert!(check(1).is_not_equal_to(1).is_err());
        }

        #[test]
        fn test_ordering_on_integers() {
            assert!(check(5).is_greater_than(3).is_ok());
            assert!(check(5).is_greater_or_equal_to(5).is_ok());
            assert!(check(3).is_less_than(5).is_ok());
            assert!(check(5).is_less_or_equal_to(5).is_ok());
            assert!(check(3).is_greater_than(5).is_err());
        }

        #[test]
        fn test_ordering_failure_carries_relation() {
            let err = check(3).is_greater_than(5).unwrap_err();
            assert!(format!("{err}").contains("> 5"));
        }

        #[test]
        fn test_unordered_values_are_invalid() {
            let err = check(f64::NAN).is_greater_than(1.0).unwrap_err();
            assert!(matches!(err, CotejarError::InvalidComparison { .. }));
        }

        #[test]
        fn test_explicit_value_accessor() {
            let wrapped = check(7);
            assert_eq!(*wrapped.value(), 7);
            assert_eq!(wrapped.into_value(), 7);
        }

        #[test]
        fn test_anchored_entry_point() {
            assert!(Check::that(5).is_greater_than(3).is_ok());
            assert!(Check::that(0.9f64).greater_or_equal(1.0).with_accuracy(0.1).is_ok());
            assert!(Check::sequence(&[1.0, 2.0]).is_equal_to(&[1.0, 2.0]).is_ok());
        }
    }

    mod float_checks {
        use super::*;

        #[test]
        fn test_is_close_to() {
            let t = Tolerance::new(0.1).unwrap();
            assert!(check(1.05f64).is_close_to(1.0, t).is_ok());
            assert!(check(1.5f64).is_close_to(1.0, t).is_err());
        }

        #[test]
        fn test_nan_predicates() {
            assert!(check(f64::NAN).is_nan().is_ok());
            assert!(check(1.0f64).is_not_nan().is_ok());
            assert!(check(1.0f64).is_nan().is_err());
        }

        #[test]
        fn test_f32_values_promote() {
            let t = Tolerance::new(0.01).unwrap();
            assert!(check(1.0f32).is_close_to(1.005f32, t).is_ok());
            assert!(check(f32::NAN).is_nan().is_ok());
        }
    }

    mod deferred {
        use super::*;

        #[test]
        fn test_greater_or_equal_with_accuracy_passes() {
            assert!(check(0.9f64).greater_or_equal(1.0).with_accuracy(0.1).is_ok());
        }

        #[test]
        fn test_strict_greater_with_accuracy_fails_short() {
            assert!(check(0.89f64).greater(1.0).with_accuracy(0.1).is_err());
        }

        #[test]
        fn test_equals_and_differs() {
            assert!(check(1.0f64).equals(1.05).with_accuracy(0.1).is_ok());
            assert!(check(1.0f64).differs_from(1.05).with_accuracy(0.1).is_err());
            assert!(check(1.0f64).differs_from(2.0).exact().is_ok());
        }

        #[test]
        fn test_exact_closing_uses_native_equality() {
            assert!(check(1.0f64).equals(1.0).exact().is_ok());
            assert!(check(f64::NAN).equals(f64::NAN).exact().is_err());
        }

        #[test]
        fn test_with_tolerance_closing() {
            let t = Tolerance::new(0.5).unwrap();
            assert!(check(1.4f64).less(1.0).with_tolerance(t).is_ok());
        }

        #[test]
        fn test_invalid_accuracy_is_configuration_error() {
            let err = check(1.0f64).equals(1.0).with_accuracy(-0.1).unwrap_err();
            assert!(matches!(err, CotejarError::InvalidTolerance { .. }));
            let err = check(1.0f64).equals(1.0).with_accuracy(f64::NAN).unwrap_err();
            assert!(matches!(err, CotejarError::InvalidTolerance { .. }));
        }

        #[test]
        #[should_panic(expected = "never finalized")]
        fn test_unclosed_comparison_panics_on_drop() {
            let open = check(0.9f64).greater(1.0);
            drop(open);
        }

        #[test]
        fn test_closed_comparison_drops_quietly() {
            let _ = check(0.9f64).greater_or_equal(1.0).with_accuracy(0.1);
        }
    }

    mod sequence_checks {
        use super::*;

        #[test]
        fn test_exact_sequence() {
            assert!(check_sequence(&[1.0, 2.0]).is_equal_to(&[1.0, 2.0]).is_ok());
        }

        #[test]
        fn test_tolerant_sequence() {
            let t = Tolerance::new(0.1).unwrap();
            assert!(check_sequence(&[1.05, 1.95])
                .is_close_to(&[1.0, 2.0], t)
                .is_ok());
        }
    }
}
