//! Decorated case execution.
//!
//! A case is an opaque single-shot invocation producing zero or more
//! results. The runner fans that single shot out according to the case's
//! [`CaseDecoration`]: repeat it round by round with an optional early stop,
//! and route results to a named handler after each invocation. Handlers
//! observe finalized results; they can never alter what the caller sees.

use crate::decoration::{CaseDecoration, GroupDecoration, IterativeOptions};
use crate::handler::{HandlerBinding, HandlerRegistry};
use crate::result::{CotejarError, CotejarResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// CASE RESULTS
// =============================================================================

/// Outcome of one executed case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseOutcome {
    /// The case completed and every check held.
    Passed,
    /// A check failed.
    Failed,
    /// The case could not run to a verdict (invalid usage, bad
    /// configuration, unexpected error).
    Errored,
}

impl CaseOutcome {
    /// Whether this outcome counts as a pass.
    #[must_use]
    pub const fn is_passed(self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Result of one executed case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseResult {
    /// Case name
    pub name: String,
    /// How the case ended
    pub outcome: CaseOutcome,
    /// Failure or error message, absent on a pass
    pub message: Option<String>,
    /// Case duration, zero unless stamped
    pub duration: Duration,
}

impl CaseResult {
    /// Create a passing result.
    #[must_use]
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: CaseOutcome::Passed,
            message: None,
            duration: Duration::ZERO,
        }
    }

    /// Create a failing result.
    #[must_use]
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: CaseOutcome::Failed,
            message: Some(message.into()),
            duration: Duration::ZERO,
        }
    }

    /// Create an errored result.
    #[must_use]
    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: CaseOutcome::Errored,
            message: Some(message.into()),
            duration: Duration::ZERO,
        }
    }

    /// Set duration
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Fold a check's verdict into a result: a check failure becomes
    /// [`CaseOutcome::Failed`], any other error [`CaseOutcome::Errored`].
    #[must_use]
    pub fn from_check(name: impl Into<String>, verdict: CotejarResult<()>) -> Self {
        match verdict {
            Ok(()) => Self::pass(name),
            Err(err) if err.is_assertion_failure() => Self::fail(name, err.to_string()),
            Err(err) => Self::error(name, err.to_string()),
        }
    }

    /// Whether the case passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        self.outcome.is_passed()
    }
}

// =============================================================================
// INVOKER
// =============================================================================

/// The single-shot execution primitive: run the case once and produce its
/// results. Supplied by the host; closures implement it directly.
pub trait TestInvoker {
    /// Run the case once.
    fn invoke(&mut self) -> Vec<CaseResult>;
}

impl<F> TestInvoker for F
where
    F: FnMut() -> Vec<CaseResult>,
{
    fn invoke(&mut self) -> Vec<CaseResult> {
        self()
    }
}

// =============================================================================
// REPETITION
// =============================================================================

/// Results accumulated across repeated rounds of one case.
///
/// The round structure is preserved: stopping early leaves exactly as many
/// result-sets as rounds actually ran. [`Self::all`] flattens when callers
/// only care about individual results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatResults {
    rounds: Vec<Vec<CaseResult>>,
}

impl RepeatResults {
    fn push_round(&mut self, results: Vec<CaseResult>) {
        self.rounds.push(results);
    }

    /// The per-round result-sets, in execution order.
    #[must_use]
    pub fn rounds(&self) -> &[Vec<CaseResult>] {
        &self.rounds
    }

    /// How many rounds actually ran.
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Every result across all rounds, flattened.
    pub fn all(&self) -> impl Iterator<Item = &CaseResult> {
        self.rounds.iter().flatten()
    }

    /// Consume and flatten into a single result list.
    #[must_use]
    pub fn into_flattened(self) -> Vec<CaseResult> {
        self.rounds.into_iter().flatten().collect()
    }

    /// Whether every result in every round passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.all().all(CaseResult::is_passed)
    }

    /// Count of passing results across all rounds.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.all().filter(|r| r.is_passed()).count()
    }

    /// Count of non-passing results across all rounds.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.all().filter(|r| !r.is_passed()).count()
    }

    /// Total result count across all rounds.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rounds.iter().map(Vec::len).sum()
    }
}

/// Repeat the invoker for the declared number of rounds, appending each
/// round's results. With stop-on-failure set, the loop ends after the first
/// round whose results contain a non-passing result.
pub fn run_repeated<I>(invoker: &mut I, options: &IterativeOptions) -> RepeatResults
where
    I: TestInvoker,
{
    let mut accumulated = RepeatResults::default();
    for round in 0..options.count() {
        let results = invoker.invoke();
        let round_failed = results.iter().any(|r| !r.is_passed());
        tracing::debug!(
            round,
            results = results.len(),
            failed = round_failed,
            "repetition round finished"
        );
        accumulated.push_round(results);
        if round_failed && options.stop_on_failure() {
            tracing::debug!(round, "repetition stopped at first failing round");
            break;
        }
    }
    accumulated
}

// =============================================================================
// HANDLER DECORATION
// =============================================================================

/// Wraps an invoker so each invocation's results are routed to the resolved
/// handler after they are finalized.
///
/// Results the handler does not care about (passing ones, unless
/// `handle_passed` is set) are skipped. An unresolvable name makes this a
/// pure passthrough. A handler that panics is not caught; the panic
/// propagates to the caller as an unexpected error.
#[derive(Debug)]
pub struct HandledInvoker<'a, I> {
    inner: I,
    binding: HandlerBinding,
    registry: &'a HandlerRegistry,
}

impl<'a, I> HandledInvoker<'a, I>
where
    I: TestInvoker,
{
    /// Wrap `inner`, routing results through `binding` resolved against
    /// `registry`.
    pub fn new(inner: I, binding: HandlerBinding, registry: &'a HandlerRegistry) -> Self {
        Self {
            inner,
            binding,
            registry,
        }
    }
}

impl<I> TestInvoker for HandledInvoker<'_, I>
where
    I: TestInvoker,
{
    fn invoke(&mut self) -> Vec<CaseResult> {
        let results = self.inner.invoke();
        if let Some(handler) = self.binding.resolve(self.registry) {
            let handle_passed = self.binding.options().handle_passed();
            for result in &results {
                if handle_passed || !result.is_passed() {
                    handler(result);
                }
            }
        }
        results
    }
}

// =============================================================================
// DECORATED RUNNER
// =============================================================================

/// Runs a case under its effective decoration.
///
/// Holds the ambient context a single case cannot carry itself: the group's
/// decoration defaults and the handler registry. Construction is cheap; the
/// runner borrows everything.
#[derive(Debug, Default)]
pub struct DecoratedRunner<'a> {
    group: Option<&'a GroupDecoration>,
    registry: Option<&'a HandlerRegistry>,
}

impl<'a> DecoratedRunner<'a> {
    /// A runner with no group defaults and no handler registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            group: None,
            registry: None,
        }
    }

    /// Supply the containing group's decoration defaults.
    #[must_use]
    pub const fn with_group(mut self, group: &'a GroupDecoration) -> Self {
        self.group = Some(group);
        self
    }

    /// Attach the handler registry names are resolved against.
    #[must_use]
    pub const fn with_registry(mut self, registry: &'a HandlerRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Run one case under its effective decoration.
    ///
    /// The case's declaration is merged with the group default (case wins),
    /// the handler wrap is applied when one is named, and the repetition
    /// loop runs when iterative options are declared; otherwise the case
    /// runs once as a single round.
    ///
    /// # Errors
    ///
    /// [`CotejarError::MissingHandlerScope`] when the effective decoration
    /// names a handler but no registry is attached.
    pub fn run<I>(&self, mut invoker: I, decoration: &CaseDecoration) -> CotejarResult<RepeatResults>
    where
        I: TestInvoker,
    {
        let effective = decoration.effective(self.group);
        tracing::debug!(
            iterative = effective.iterative().is_some(),
            handler = ?effective.handler().map(|h| h.handler()),
            "running decorated case"
        );

        match effective.handler() {
            Some(options) => {
                let Some(registry) = self.registry else {
                    return Err(CotejarError::MissingHandlerScope {
                        handler: options.handler().to_string(),
                    });
                };
                let binding = HandlerBinding::new(options.clone());
                let mut handled = HandledInvoker::new(invoker, binding, registry);
                Ok(Self::repeat(&mut handled, effective.iterative()))
            }
            None => Ok(Self::repeat(&mut invoker, effective.iterative())),
        }
    }

    fn repeat<I>(invoker: &mut I, options: Option<&IterativeOptions>) -> RepeatResults
    where
        I: TestInvoker,
    {
        match options {
            Some(iterative) => run_repeated(invoker, iterative),
            None => {
                let mut single = RepeatResults::default();
                single.push_round(invoker.invoke());
                single
            }
        }
    }
}
