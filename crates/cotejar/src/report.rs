//! Run summary rendering.
//!
//! Collects case results and renders them as a one-line summary, a plain
//! text listing, or JSON. Rendering produces strings only; where they go is
//! the caller's concern.

use crate::result::CotejarResult;
use crate::runner::{CaseOutcome, CaseResult};
use serde::Serialize;

/// Collected results of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    run_name: String,
    results: Vec<CaseResult>,
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

impl RunReport {
    /// An empty report.
    #[must_use]
    pub fn new() -> Self {
        Self {
            run_name: "Check Run".to_string(),
            results: Vec::new(),
        }
    }

    /// Set the run name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.run_name = name.into();
        self
    }

    /// Record one result.
    pub fn record(&mut self, result: CaseResult) {
        self.results.push(result);
    }

    /// Record a batch of results.
    pub fn record_all(&mut self, results: impl IntoIterator<Item = CaseResult>) {
        self.results.extend(results);
    }

    /// The recorded results, in order.
    #[must_use]
    pub fn results(&self) -> &[CaseResult] {
        &self.results
    }

    /// Number of passing results.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.count(CaseOutcome::Passed)
    }

    /// Number of failing results.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(CaseOutcome::Failed)
    }

    /// Number of errored results.
    #[must_use]
    pub fn errored_count(&self) -> usize {
        self.count(CaseOutcome::Errored)
    }

    /// Total result count.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Pass rate, 0.0 to 1.0. An empty run counts as fully passing.
    #[must_use]
    pub fn pass_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 1.0;
        }
        self.passed_count() as f64 / self.results.len() as f64
    }

    /// Whether every recorded result passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(CaseResult::is_passed)
    }

    /// The non-passing results.
    #[must_use]
    pub fn failures(&self) -> Vec<&CaseResult> {
        self.results.iter().filter(|r| !r.is_passed()).collect()
    }

    /// One-line summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: {}/{} passed ({:.1}%)",
            self.run_name,
            self.passed_count(),
            self.total(),
            self.pass_rate() * 100.0
        )
    }

    /// Render the full listing: summary line, then one line per result with
    /// its outcome marker and message.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut text = self.summary();
        text.push('\n');
        for result in &self.results {
            text.push_str(&format!("  [{}] {}", marker(result.outcome), result.name));
            if let Some(message) = &result.message {
                text.push_str(&format!(" - {message}"));
            }
            text.push('\n');
        }
        text
    }

    /// Render the report as JSON, counts included.
    ///
    /// # Errors
    ///
    /// [`crate::CotejarError::Json`] when serialization fails.
    pub fn render_json(&self) -> CotejarResult<String> {
        let shape = JsonReport {
            run: &self.run_name,
            total: self.total(),
            passed: self.passed_count(),
            failed: self.failed_count(),
            errored: self.errored_count(),
            results: &self.results,
        };
        Ok(serde_json::to_string_pretty(&shape)?)
    }

    fn count(&self, outcome: CaseOutcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    run: &'a str,
    total: usize,
    passed: usize,
    failed: usize,
    errored: usize,
    results: &'a [CaseResult],
}

const fn marker(outcome: CaseOutcome) -> &'static str {
    match outcome {
        CaseOutcome::Passed => "PASS",
        CaseOutcome::Failed => "FAIL",
        CaseOutcome::Errored => "ERROR",
    }
}
