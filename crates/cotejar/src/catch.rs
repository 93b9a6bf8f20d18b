//! Panic and error capture.
//!
//! Checks of the form "does this operation fail, and how": a matching
//! failure is captured and handed back for chained inspection, a
//! non-matching one is wrapped into a check failure with its details, and
//! the absence of a required failure is a distinct failure of its own.

use crate::diagnostic::{keys, Diagnostics};
use crate::result::{CotejarError, CotejarResult};
use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// A captured panic, available for further inspection after
/// [`expect_panic`].
#[derive(Debug)]
pub struct CapturedPanic {
    message: String,
}

impl CapturedPanic {
    fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&'static str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Self { message }
    }

    /// The panic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Chained check: the captured message contains `needle`.
    ///
    /// # Errors
    ///
    /// [`CotejarError::AssertionFailed`] when the message does not contain
    /// the expected fragment.
    pub fn with_message_containing(&self, needle: &str) -> CotejarResult<&Self> {
        if self.message.contains(needle) {
            return Ok(self);
        }
        Err(CotejarError::AssertionFailed {
            message: format!(
                "panic message {:?} does not contain {needle:?}",
                self.message
            ),
            diagnostics: Diagnostics::new()
                .with(keys::EXPECTED, format_args!("contains {needle:?}"))
                .with(keys::ACTUAL, &self.message),
        })
    }
}

/// Run the operation under a panic guard, yielding either its value or
/// the captured panic.
///
/// # Errors
///
/// The captured panic when the operation panics.
pub fn run_catching<F, R>(operation: F) -> Result<R, CapturedPanic>
where
    F: FnOnce() -> R,
{
    panic::catch_unwind(AssertUnwindSafe(operation))
        .map_err(|payload| CapturedPanic::from_payload(payload.as_ref()))
}

/// Run the operation expecting it to panic; the panic is captured and
/// handed back for chained inspection.
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] when the operation completes without
/// panicking.
pub fn expect_panic<F, R>(operation: F) -> CotejarResult<CapturedPanic>
where
    F: FnOnce() -> R,
{
    match run_catching(operation) {
        Err(captured) => Ok(captured),
        Ok(_) => Err(CotejarError::AssertionFailed {
            message: "expected a panic, but none was raised".to_string(),
            diagnostics: Diagnostics::new()
                .with(keys::EXPECTED, "a panic")
                .with(keys::ACTUAL, "normal completion"),
        }),
    }
}

/// Run the operation expecting it to complete; an unexpected panic is
/// wrapped into a check failure carrying its message.
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] when the operation panics.
pub fn expect_no_panic<F, R>(operation: F) -> CotejarResult<R>
where
    F: FnOnce() -> R,
{
    match run_catching(operation) {
        Ok(value) => Ok(value),
        Err(captured) => Err(CotejarError::AssertionFailed {
            message: format!("unexpected panic: {}", captured.message()),
            diagnostics: Diagnostics::new()
                .with(keys::EXPECTED, "normal completion")
                .with(keys::ACTUAL, captured.message()),
        }),
    }
}

/// Run a fallible operation expecting an error; the error is captured and
/// handed back for chained inspection.
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] when the operation succeeds instead.
pub fn expect_error<F, T, E>(operation: F) -> CotejarResult<E>
where
    F: FnOnce() -> Result<T, E>,
    T: fmt::Debug,
{
    match operation() {
        Err(error) => Ok(error),
        Ok(value) => Err(CotejarError::AssertionFailed {
            message: format!("expected an error, got Ok({value:?})"),
            diagnostics: Diagnostics::new()
                .with(keys::EXPECTED, "an error")
                .with(keys::ACTUAL, format_args!("Ok({value:?})")),
        }),
    }
}

/// Run a fallible operation expecting an error of the concrete type `E`;
/// a matching boxed error is downcast and handed back for chained
/// inspection.
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] when the operation succeeds, or when
/// it fails with an error that is not an `E`.
pub fn expect_error_of<F, T, E>(operation: F) -> CotejarResult<Box<E>>
where
    F: FnOnce() -> Result<T, Box<dyn Error + 'static>>,
    T: fmt::Debug,
    E: Error + 'static,
{
    let error = expect_error(operation)?;
    let description = error.to_string();
    error.downcast::<E>().map_err(|_| {
        let expected = std::any::type_name::<E>();
        CotejarError::AssertionFailed {
            message: format!("expected a {expected} error, got: {description}"),
            diagnostics: Diagnostics::new()
                .with(keys::EXPECTED, expected)
                .with(keys::ACTUAL, description),
        }
    })
}

/// Run a fallible operation expecting success; an unexpected error is
/// wrapped with its details.
///
/// # Errors
///
/// [`CotejarError::AssertionFailed`] carrying the error's rendering when
/// the operation fails.
pub fn expect_ok<F, T, E>(operation: F) -> CotejarResult<T>
where
    F: FnOnce() -> Result<T, E>,
    E: fmt::Display,
{
    match operation() {
        Ok(value) => Ok(value),
        Err(error) => Err(CotejarError::AssertionFailed {
            message: format!("unexpected error: {error}"),
            diagnostics: Diagnostics::new()
                .with(keys::EXPECTED, "success")
                .with(keys::ACTUAL, error),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod panics {
        use super::*;

        #[test]
        fn test_expected_panic_is_captured() {
            let captured = expect_panic(|| panic!("boom: {}", 42)).unwrap();
            assert_eq!(captured.message(), "boom: 42");
        }

        #[test]
        fn test_static_str_payload() {
            let captured = expect_panic(|| panic!("plain")).unwrap();
            assert_eq!(captured.message(), "plain");
        }

        #[test]
        fn test_missing_panic_is_distinct_failure() {
            let err = expect_panic(|| 1 + 1).unwrap_err();
            assert!(format!("{err}").contains("none was raised"));
        }

        #[test]
        fn test_chained_message_inspection() {
            let captured = expect_panic(|| panic!("index 7 out of range")).unwrap();
            assert!(captured.with_message_containing("index 7").is_ok());
            assert!(captured.with_message_containing("overflow").is_err());
        }

        #[test]
        fn test_run_catching_passes_value_through() {
            assert_eq!(run_catching(|| 41 + 1).unwrap(), 42);
        }

        #[test]
        fn test_run_catching_captures_payload() {
            let captured = run_catching(|| panic!("kaput")).unwrap_err();
            assert_eq!(captured.message(), "kaput");
        }

        #[test]
        fn test_no_panic_passes_value_through() {
            let value = expect_no_panic(|| 2 * 3).unwrap();
            assert_eq!(value, 6);
        }

        #[test]
        fn test_unexpected_panic_is_wrapped() {
            let err = expect_no_panic(|| panic!("surprise")).unwrap_err();
            assert!(format!("{err}").contains("surprise"));
            assert_eq!(
                err.diagnostics().unwrap().get("Actual"),
                Some("surprise")
            );
        }
    }

    mod fallible {
        use super::*;

        fn parse_boxed(text: &str) -> Result<i32, Box<dyn Error + 'static>> {
            Ok(text.parse::<i32>()?)
        }

        #[test]
        fn test_expected_error_is_handed_back() {
            let error = expect_error(|| "nope".parse::<i32>()).unwrap();
            assert!(error.to_string().contains("invalid digit"));
        }

        #[test]
        fn test_matching_error_type_is_downcast() {
            let error =
                expect_error_of::<_, _, std::num::ParseIntError>(|| parse_boxed("nope")).unwrap();
            assert!(error.to_string().contains("invalid digit"));
        }

        #[test]
        fn test_non_matching_error_type_fails() {
            let err = expect_error_of::<_, _, std::num::ParseFloatError>(|| parse_boxed("nope"))
                .unwrap_err();
            assert!(format!("{err}").contains("ParseFloatError"));
            assert!(format!("{err}").contains("invalid digit"));
        }

        #[test]
        fn test_unexpected_ok_fails() {
            let err = expect_error(|| "17".parse::<i32>()).unwrap_err();
            assert!(format!("{err}").contains("Ok(17)"));
        }

        #[test]
        fn test_expect_ok_passes_value_through() {
            let value = expect_ok(|| "17".parse::<i32>()).unwrap();
            assert_eq!(value, 17);
        }

        #[test]
        fn test_expect_ok_wraps_error_details() {
            let err = expect_ok(|| "nope".parse::<i32>()).unwrap_err();
            assert!(format!("{err}").contains("invalid digit"));
        }
    }
}
