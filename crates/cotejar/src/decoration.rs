//! Execution decorations.
//!
//! Declarative options attached to a test case or its containing group,
//! read by [`crate::runner`] to decide how a single invocation fans out.
//! A case's effective decoration is computed once by ordinary data merging:
//! an optional group-level default combined with the case's own declaration,
//! case fields winning.

use crate::result::{CotejarError, CotejarResult};
use serde::Serialize;

/// Repeat a case `count` times, optionally stopping at the first round that
/// produces a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IterativeOptions {
    count: usize,
    stop_on_failure: bool,
}

impl IterativeOptions {
    /// Declare `count` rounds. Validated at declaration time, before any
    /// case runs.
    ///
    /// # Errors
    ///
    /// [`CotejarError::InvalidIterationCount`] when `count` is zero.
    pub fn new(count: usize) -> CotejarResult<Self> {
        if count == 0 {
            return Err(CotejarError::InvalidIterationCount { count });
        }
        Ok(Self {
            count,
            stop_on_failure: false,
        })
    }

    /// Stop after the first round whose results contain a failure.
    #[must_use]
    pub const fn with_stop_on_failure(mut self) -> Self {
        self.stop_on_failure = true;
        self
    }

    /// The declared number of rounds.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Whether repetition aborts on the first failing round.
    #[must_use]
    pub const fn stop_on_failure(&self) -> bool {
        self.stop_on_failure
    }
}

/// Route results to a named handler callback after each invocation.
///
/// By default only failing results are handed over; `handle_passed` widens
/// that to every result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerOptions {
    handler: String,
    handle_passed: bool,
}

impl HandlerOptions {
    /// Name the handler callback to invoke.
    #[must_use]
    pub fn new(handler: impl Into<String>) -> Self {
        Self {
            handler: handler.into(),
            handle_passed: false,
        }
    }

    /// Also hand passing results to the handler.
    #[must_use]
    pub const fn with_handle_passed(mut self) -> Self {
        self.handle_passed = true;
        self
    }

    /// The configured handler name.
    #[must_use]
    pub fn handler(&self) -> &str {
        &self.handler
    }

    /// Whether passing results are handed over too.
    #[must_use]
    pub const fn handle_passed(&self) -> bool {
        self.handle_passed
    }
}

/// The decorations a single case declares for itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CaseDecoration {
    iterative: Option<IterativeOptions>,
    handler: Option<HandlerOptions>,
}

impl CaseDecoration {
    /// An undecorated case.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            iterative: None,
            handler: None,
        }
    }

    /// Attach repetition options.
    #[must_use]
    pub const fn with_iterative(mut self, options: IterativeOptions) -> Self {
        self.iterative = Some(options);
        self
    }

    /// Attach handler options.
    #[must_use]
    pub fn with_handler(mut self, options: HandlerOptions) -> Self {
        self.handler = Some(options);
        self
    }

    /// The case's repetition options, when declared.
    #[must_use]
    pub const fn iterative(&self) -> Option<&IterativeOptions> {
        self.iterative.as_ref()
    }

    /// The case's handler options, when declared.
    #[must_use]
    pub const fn handler(&self) -> Option<&HandlerOptions> {
        self.handler.as_ref()
    }

    /// Merge a group-level default into this declaration.
    ///
    /// The group contributes its handler only when the case names none of
    /// its own: the first explicit declaration wins, and the case always
    /// takes precedence over its group. Repetition options are never
    /// inherited from the group.
    #[must_use]
    pub fn effective(&self, group: Option<&GroupDecoration>) -> Self {
        let handler = match (&self.handler, group.and_then(GroupDecoration::handler)) {
            (Some(own), _) => Some(own.clone()),
            (None, Some(default)) => Some(default.clone()),
            (None, None) => None,
        };
        Self {
            iterative: self.iterative,
            handler,
        }
    }
}

/// The default decoration a group supplies to its cases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupDecoration {
    handler: Option<HandlerOptions>,
}

impl GroupDecoration {
    /// A group with no defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self { handler: None }
    }

    /// Supply a handler default for cases that declare none.
    #[must_use]
    pub fn with_handler(mut self, options: HandlerOptions) -> Self {
        self.handler = Some(options);
        self
    }

    /// The group's handler default, when declared.
    #[must_use]
    pub const fn handler(&self) -> Option<&HandlerOptions> {
        self.handler.as_ref()
    }
}
