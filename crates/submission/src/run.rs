//! Executes a built binary and measures it.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::log;


//================================================================================================
// Types
//================================================================================================

/// A request to execute a built binary.
#[derive(Clone, Debug)]
pub struct RunRequest {
    /// The binary to execute.
    pub executable_path: PathBuf,
    /// Arguments passed through to the binary.
    pub args: Vec<String>,
}

/// What happened when the binary ran.
///
/// A non-zero exit from the program under test is a report, not an error;
/// wrong answers and runtime errors are exactly what this tool exists to
/// surface.
#[derive(Clone, Copy, Debug)]
pub struct RunReport {
    /// The program's exit code, `-1` if it was killed by a signal.
    pub exit_code: i32,
    /// Wall time between spawn and exit.
    pub elapsed: Duration,
    /// Whitespace-separated tokens left unread on stdin after the program
    /// exited. A non-zero count usually means the solution stopped reading
    /// the testcase early.
    pub extra_tokens: usize,
}

/// An error representing a failure to execute the binary at all.
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    /// The binary could not be spawned.
    #[error("failed to execute {path}")]
    Spawn {
        /// The binary that could not be spawned.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Leftover input could not be read after the program exited.
    #[error("failed to read leftover input")]
    DrainStdin(#[source] io::Error),
}

//================================================================================================
// Functions
//================================================================================================

/// Runs the binary with inherited stdio and reports how it went.
///
/// Leftover stdin tokens are only counted when stdin is redirected; on an
/// interactive terminal draining would block waiting for end-of-file.
#[tracing::instrument(skip_all, fields(executable = %request.executable_path.display()))]
pub fn run(request: &RunRequest) -> Result<RunReport, RunError> {
    let span = tracing::Span::current();
    log::set_task(&span, "🚀 run");

    let mut command = std::process::Command::new(&request.executable_path);
    command.args(&request.args);

    let start = Instant::now();
    let status = tracing_indicatif::suspend_tracing_indicatif(|| command.status()).map_err(
        |source| RunError::Spawn {
            path: request.executable_path.clone(),
            source,
        },
    )?;
    let elapsed = start.elapsed();

    let extra_tokens = if io::stdin().is_terminal() {
        0
    } else {
        let mut leftover = String::new();
        io::stdin()
            .read_to_string(&mut leftover)
            .map_err(RunError::DrainStdin)?;
        leftover.split_whitespace().count()
    };

    Ok(RunReport {
        exit_code: status.code().unwrap_or(-1),
        elapsed,
        extra_tokens,
    })
}
