//! Result and error types for Cotejar.

use crate::diagnostic::Diagnostics;
use thiserror::Error;

/// Result type for Cotejar operations
pub type CotejarResult<T> = Result<T, CotejarError>;

/// Errors that can occur in Cotejar
#[derive(Debug, Error)]
pub enum CotejarError {
    /// A check did not hold: value mismatch, ordering violation, sequence
    /// mismatch, or panic-capture mismatch
    #[error("Check failed: {message}")]
    AssertionFailed {
        /// Human-readable failure message
        message: String,
        /// Structured name→value payload for tooling
        diagnostics: Diagnostics,
    },

    /// A tolerance was constructed from a negative or NaN value
    #[error("Invalid tolerance: {value} (must be a non-negative, non-NaN number)")]
    InvalidTolerance {
        /// The offending value
        value: f64,
    },

    /// An iteration count of zero was requested
    #[error("Invalid iteration count: {count} (must be at least 1)")]
    InvalidIterationCount {
        /// The offending count
        count: usize,
    },

    /// An ordering comparison was attempted on values with no defined order
    #[error("Invalid comparison: {message}")]
    InvalidComparison {
        /// What made the comparison undefined
        message: String,
    },

    /// A deferred comparison scope was dropped without being finalized
    #[error("Comparison never finalized: {description} (close it with with_accuracy(), with_tolerance(), or exact())")]
    UnclosedComparison {
        /// The opened comparison, rendered
        description: String,
    },

    /// A handler name was configured, but there is no registry to resolve it
    /// against
    #[error("Handler '{handler}' configured but no handler registry is attached")]
    MissingHandlerScope {
        /// The configured handler name
        handler: String,
    },

    /// A data-source name was not found in the registry
    #[error("Unknown data source: '{name}'")]
    UnknownDataSource {
        /// The requested source name
        name: String,
    },

    /// A generated row could not be bound to the target's parameters
    #[error("Cannot bind parameter '{parameter}' from row {row}")]
    UnboundParameter {
        /// The parameter that could not be bound
        parameter: String,
        /// The row, rendered
        row: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CotejarError {
    /// The structured diagnostics attached to this error, if any.
    #[must_use]
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::AssertionFailed { diagnostics, .. } => Some(diagnostics),
            _ => None,
        }
    }

    /// Whether this error is a failed check (as opposed to misuse or
    /// configuration problems).
    #[must_use]
    pub const fn is_assertion_failure(&self) -> bool {
        matches!(self, Self::AssertionFailed { .. })
    }
}
