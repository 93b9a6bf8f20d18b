//! Paired-walk sequence equality.
//!
//! Two sequences compare element by element; the first divergent pair fails
//! with its position, and only once the common prefix is exhausted does a
//! length difference fail. Float sequences take the same tolerance semantics
//! as scalar equality.

use crate::compare::are_equal;
use crate::diagnostic::{keys, Diagnostics};
use crate::result::{CotejarError, CotejarResult};
use crate::tolerance::Tolerance;
use std::fmt;

/// Element-wise float sequence equality with an optional per-element
/// [`Tolerance`].
///
/// Each pair is compared like scalar [`are_equal`]: native `==` without a
/// tolerance, `|a − e| <= t` with one. The walk stops at the first divergent
/// pair; a length difference is reported only after the shared prefix
/// matches.
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] carrying an `Index` diagnostic for an
/// element mismatch, or a length-mismatch message when the prefixes agree.
pub fn sequences_equal(
    actual: &[f64],
    expected: &[f64],
    tolerance: Option<Tolerance>,
) -> CotejarResult<()> {
    for (index, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        if let Err(err) = are_equal(*a, *e, tolerance) {
            return Err(position_failure(index, err));
        }
    }
    check_lengths(actual.len(), expected.len())
}

/// [`sequences_equal`] for `f32` slices; elements are widened to `f64`
/// before comparison, like the scalar `f32` checks.
///
/// # Errors
///
/// Same failure shapes as [`sequences_equal`].
pub fn sequences_equal_f32(
    actual: &[f32],
    expected: &[f32],
    tolerance: Option<Tolerance>,
) -> CotejarResult<()> {
    for (index, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        if let Err(err) = are_equal(f64::from(*a), f64::from(*e), tolerance) {
            return Err(position_failure(index, err));
        }
    }
    check_lengths(actual.len(), expected.len())
}

/// Element-wise exact sequence equality for any comparable element type.
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] with the position and both elements on
/// the first mismatch, or a length-mismatch message when the prefixes agree.
pub fn sequences_exactly_equal<T>(actual: &[T], expected: &[T]) -> CotejarResult<()>
where
    T: PartialEq + fmt::Debug,
{
    for (index, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        if a != e {
            return Err(CotejarError::AssertionFailed {
                message: format!("index {index}: expected {e:?}, got {a:?}"),
                diagnostics: Diagnostics::new()
                    .with(keys::INDEX, index)
                    .with(keys::EXPECTED, format_args!("{e:?}"))
                    .with(keys::ACTUAL, format_args!("{a:?}")),
            });
        }
    }
    check_lengths(actual.len(), expected.len())
}

// Prefix the element failure with its position and record the index in the
// structured payload.
fn position_failure(index: usize, element_failure: CotejarError) -> CotejarError {
    match element_failure {
        CotejarError::AssertionFailed {
            message,
            mut diagnostics,
        } => {
            diagnostics.push(keys::INDEX, index);
            CotejarError::AssertionFailed {
                message: format!("index {index}: {message}"),
                diagnostics,
            }
        }
        other => other,
    }
}

fn check_lengths(actual: usize, expected: usize) -> CotejarResult<()> {
    if actual == expected {
        return Ok(());
    }
    Err(CotejarError::AssertionFailed {
        message: format!("expected {expected} elements, got {actual}"),
        diagnostics: Diagnostics::new()
            .with(keys::EXPECTED, expected)
            .with(keys::ACTUAL, actual),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tol(value: f64) -> Option<Tolerance> {
        Some(Tolerance::new(value).unwrap())
    }

    mod float_sequences {
        use super::*;

        #[test]
        fn test_equal_sequences_pass() {
            assert!(sequences_equal(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], None).is_ok());
        }

        #[test]
        fn test_empty_sequences_pass() {
            assert!(sequences_equal(&[], &[], None).is_ok());
        }

        #[test]
        fn test_tolerance_applies_per_element() {
            assert!(sequences_equal(&[1.02, 1.98], &[1.0, 2.0], tol(0.05)).is_ok());
            assert!(sequences_equal(&[1.02, 1.90], &[1.0, 2.0], tol(0.05)).is_err());
        }

        #[test]
        fn test_mismatch_reports_first_divergent_index() {
            let err = sequences_equal(&[1.0, 9.0, 9.0], &[1.0, 2.0, 3.0], None).unwrap_err();
            assert!(format!("{err}").starts_with("Check failed: index 1:"));
            assert_eq!(err.diagnostics().unwrap().get("Index"), Some("1"));
        }

        #[test]
        fn test_element_mismatch_wins_over_length_mismatch() {
            // divergence at index 0 is reported even though lengths differ too
            let err = sequences_equal(&[9.0, 2.0], &[1.0, 2.0, 3.0], None).unwrap_err();
            assert!(format!("{err}").contains("index 0"));
        }

        #[test]
        fn test_length_mismatch_after_matching_prefix() {
            let err = sequences_equal(&[1.0, 2.0], &[1.0, 2.0, 3.0], None).unwrap_err();
            assert!(format!("{err}").contains("expected 3 elements, got 2"));
            let diag = err.diagnostics().unwrap();
            assert_eq!(diag.get("Expected"), Some("3"));
            assert_eq!(diag.get("Actual"), Some("2"));
        }

        #[test]
        fn test_nan_elements_follow_native_equality() {
            let err = sequences_equal(&[f64::NAN], &[f64::NAN], None).unwrap_err();
            assert!(err.is_assertion_failure());
        }

        #[test]
        fn test_f32_elements_promote() {
            assert!(sequences_equal_f32(&[1.02f32, 1.98], &[1.0, 2.0], tol(0.05)).is_ok());
            let err = sequences_equal_f32(&[1.0f32, 9.0], &[1.0, 2.0], None).unwrap_err();
            assert!(format!("{err}").contains("index 1"));
        }
    }

    mod exact_sequences {
        use super::*;

        #[test]
        fn test_equal_string_slices_pass() {
            assert!(sequences_exactly_equal(&["a", "b"], &["a", "b"]).is_ok());
        }

        #[test]
        fn test_mismatch_shows_both_elements() {
            let err = sequences_exactly_equal(&[1, 2, 3], &[1, 5, 3]).unwrap_err();
            let text = format!("{err}");
            assert!(text.contains("index 1"));
            assert!(text.contains("expected 5"));
            assert!(text.contains("got 2"));
        }

        #[test]
        fn test_longer_actual_fails_on_length() {
            let err = sequences_exactly_equal(&[1, 2, 3, 4], &[1, 2, 3]).unwrap_err();
            assert!(format!("{err}").contains("expected 3 elements, got 4"));
        }
    }
}
