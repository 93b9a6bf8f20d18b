//! Structured diagnostics attached to check failures.
//!
//! Every failed check carries, next to its human-readable message, an
//! ordered name→value payload that tooling can inspect without string
//! parsing. Entries keep insertion order so that rendered output reads the
//! same way the check was written.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known diagnostic entry names.
pub mod keys {
    /// The expected or reference value.
    pub const EXPECTED: &str = "Expected";
    /// The actual value under check.
    pub const ACTUAL: &str = "Actual";
    /// The tolerance the comparison was allowed.
    pub const ACCURACY: &str = "Accuracy";
    /// The computed error (absolute or signed, per check).
    pub const ERROR: &str = "Error";
    /// The error relative to the reference value.
    pub const RELATIVE_ERROR: &str = "RelativeError";
    /// The first mismatching position in a sequence check.
    pub const INDEX: &str = "Index";
}

/// One named value attached to a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    /// Entry name, e.g. `"Expected"`.
    pub name: String,
    /// Rendered value.
    pub value: String,
}

/// Ordered name→value payload attached to check failures.
///
/// ## Example
///
/// ```
/// use cotejar::{keys, Diagnostics};
///
/// let diag = Diagnostics::new()
///     .with(keys::EXPECTED, 1.0)
///     .with(keys::ACTUAL, 0.9);
/// assert_eq!(diag.get(keys::ACTUAL), Some("0.9"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    entries: Vec<DiagnosticEntry>,
}

impl Diagnostics {
    /// Create an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.push(name, value);
        self
    }

    /// Append an entry in place.
    pub fn push(&mut self, name: impl Into<String>, value: impl fmt::Display) {
        self.entries.push(DiagnosticEntry {
            name: name.into(),
            value: value.to_string(),
        });
    }

    /// Look up the first entry with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[DiagnosticEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the payload carries no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the payload as a JSON array of `{name, value}` objects.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", entry.name, entry.value)?;
        }
        Ok(())
    }
}
