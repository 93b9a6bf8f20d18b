//! Cotejar: Tolerance-Aware Checks and Decorated Test Execution
//!
//! Cotejar (Spanish: "to collate, to check against") is a fluent check
//! library plus a small execution-decoration layer for test code: tolerant
//! float and sequence comparisons with rich numeric diagnostics, and
//! declarative repetition, result handling, and data-driven case generation
//! around a host framework's single-shot test invocation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    COTEJAR Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐       ┌────────────┐       ┌────────────┐      │
//! │   │ Fluent     │       │ Comparator │       │ Typed      │      │
//! │   │ Checks     │──────►│ Engine     │──────►│ Failure +  │      │
//! │   │ (check)    │       │ (compare)  │       │ Diagnostics│      │
//! │   └────────────┘       └────────────┘       └────────────┘      │
//! │   ┌────────────┐       ┌────────────┐       ┌────────────┐      │
//! │   │ Case       │       │ Decorated  │       │ Run        │      │
//! │   │ Decoration │──────►│ Runner     │──────►│ Report     │      │
//! │   │ + Sources  │       │ (runner)   │       │ (report)   │      │
//! │   └────────────┘       └────────────┘       └────────────┘      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use cotejar::prelude::*;
//!
//! fn verify() -> CotejarResult<()> {
//!     // tolerant scalar and sequence checks
//!     check(0.9f64).greater_or_equal(1.0).with_accuracy(0.1)?;
//!     check_sequence(&[1.02, 1.98]).is_close_to(&[1.0, 2.0], Tolerance::new(0.05)?)?;
//!
//!     // decorated execution: repeat, stop on first failure
//!     let decoration = CaseDecoration::new()
//!         .with_iterative(IterativeOptions::new(3)?.with_stop_on_failure());
//!     let results = DecoratedRunner::new()
//!         .run(|| vec![CaseResult::pass("steady")], &decoration)?;
//!     assert_eq!(results.round_count(), 3);
//!     Ok(())
//! }
//! # verify().unwrap();
//! ```
//!
//! ## Toyota Way Application
//!
//! - **Jidoka**: failures stop with full numeric context, never a bare
//!   boolean
//! - **Poka-Yoke**: invalid tolerances and unclosed fluent chains fail at
//!   the point of misuse, before any comparison

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

mod catch;
mod check;
mod compare;
mod datasource;
mod decoration;
mod diagnostic;
mod handler;
mod report;
mod result;
mod runner;
mod sequence;
mod tolerance;

pub use catch::{
    expect_error, expect_error_of, expect_no_panic, expect_ok, expect_panic, run_catching,
    CapturedPanic,
};
pub use check::{check, check_sequence, Check, DeferredComparison, SequenceCheck, ValueCheck};
pub use compare::{
    are_equal, are_not_equal, greater, greater_or_equal, is_nan, is_not_nan, less, less_or_equal,
    Comparison, Relation,
};
pub use datasource::{
    display_name, row_from_struct, ArgValue, BoundArgs, DataDrivenCase, DataRow, DataSource,
    DataSourceRegistry, GeneratedCase, ParamSpec, RowsFn,
};
pub use decoration::{CaseDecoration, GroupDecoration, HandlerOptions, IterativeOptions};
pub use diagnostic::{keys, DiagnosticEntry, Diagnostics};
pub use handler::{HandlerBinding, HandlerFn, HandlerRegistry};
pub use report::RunReport;
pub use result::{CotejarError, CotejarResult};
pub use runner::{
    run_repeated, CaseOutcome, CaseResult, DecoratedRunner, HandledInvoker, RepeatResults,
    TestInvoker,
};
pub use sequence::{sequences_equal, sequences_equal_f32, sequences_exactly_equal};
pub use tolerance::Tolerance;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::catch::*;
    pub use super::check::*;
    pub use super::compare::*;
    pub use super::datasource::*;
    pub use super::decoration::*;
    pub use super::diagnostic::*;
    pub use super::handler::*;
    pub use super::report::*;
    pub use super::result::*;
    pub use super::runner::*;
    pub use super::sequence::*;
    pub use super::tolerance::*;
}
