//! cpcli, a command-line helper for competitive-programming workflows.
//!
//! It consolidates multi-file template projects into single files for online
//! judge submissions, wraps compilation and execution of solutions, and
//! scaffolds contest repositories.

#![warn(missing_docs)]

pub mod cli;
