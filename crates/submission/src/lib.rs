//! Build artifacts for online-judge submissions.
//!
//! This crate turns a multi-file contest project into artifacts usable both
//! for local compilation and for single-file judge submissions:
//!
//! - [`pack`] flattens local quoted includes into one self-contained source
//!   file, deduplicating by resolved path so diamond and cyclic include
//!   graphs are emitted exactly once.
//! - [`stale`] answers whether a build output already dominates its inputs,
//!   so drivers can skip redundant work.
//! - [`compile`] wraps the native compiler invocation behind that check.
//! - [`run`] executes a built binary and reports exit code, wall time, and
//!   any input left unconsumed on stdin.

#![warn(missing_docs)]

pub mod compile;
mod log;
pub mod pack;
pub mod run;
pub mod stale;

pub use compile::{CompileOutcome, CompileRequest, compile};
pub use pack::{PackRequest, pack};
pub use run::{RunReport, RunRequest, run};
pub use stale::is_up_to_date;
