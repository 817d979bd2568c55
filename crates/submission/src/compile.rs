//! Drives the native compiler, skipping work when the binary is fresh.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use crate::log;
use crate::stale::{self, StaleError};


//================================================================================================
// Types
//================================================================================================

/// The compiler binary invoked for every build.
pub const COMPILER: &str = "g++";

/// A request to compile source files into a single binary.
#[derive(Clone, Debug)]
pub struct CompileRequest {
    /// Source files handed to the compiler, in order.
    pub source_files: Vec<PathBuf>,
    /// Path of the binary to produce.
    pub output_path: PathBuf,
    /// Extra flags appended to the compiler command line.
    pub flags: Vec<String>,
}

/// The result of a successful [`compile`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompileOutcome {
    /// The compiler ran and produced the output binary.
    Compiled,
    /// The binary already dominates all sources; the compiler was not run.
    UpToDate,
}

/// An error representing a failure while compiling source files.
#[derive(thiserror::Error, Debug)]
pub enum CompileError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path}")]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The freshness check could not stat an input or the output.
    #[error(transparent)]
    Stale(#[from] StaleError),
    /// The compiler binary could not be spawned at all.
    #[error("failed to invoke {COMPILER}")]
    Spawn(#[source] io::Error),
    /// The compiler ran but reported failure.
    #[error("{COMPILER} exited with {status}")]
    Failed {
        /// The compiler's exit status.
        status: ExitStatus,
    },
}

//================================================================================================
// Functions
//================================================================================================

/// Compiles the request's sources, unless the output is already up to date.
///
/// Diagnostics go straight to the inherited stderr; progress bars are
/// suspended for the duration so compiler output is not garbled. When stderr
/// is a terminal the compiler is asked to color its diagnostics.
#[tracing::instrument(skip_all, fields(output = %request.output_path.display()))]
pub fn compile(request: &CompileRequest) -> Result<CompileOutcome, CompileError> {
    let span = tracing::Span::current();
    log::set_task(&span, "🔨 compile");

    if let Some(output_dir) = request.output_path.parent()
        && !output_dir.as_os_str().is_empty()
    {
        fs::create_dir_all(output_dir).map_err(|source| CompileError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
    }

    if stale::is_up_to_date(&request.output_path, &request.source_files)? {
        tracing::debug!("binary is up to date, skipping compilation");
        return Ok(CompileOutcome::UpToDate);
    }

    let mut command = Command::new(COMPILER);
    command
        .args(&request.source_files)
        .arg("-o")
        .arg(&request.output_path);
    if io::stderr().is_terminal() {
        command.arg("-fdiagnostics-color=always");
    }
    command.args(&request.flags);

    let status = tracing_indicatif::suspend_tracing_indicatif(|| command.status())
        .map_err(CompileError::Spawn)?;
    if !status.success() {
        return Err(CompileError::Failed { status });
    }
    Ok(CompileOutcome::Compiled)
}
