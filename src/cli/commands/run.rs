//! The `run` subcommand.

use std::path::PathBuf;

use clap::Parser;
use config::CONFIG;
use submission::{CompileOutcome, CompileRequest, PackRequest, RunRequest};

use crate::cli::logging::{ansi, style};

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
#[command(next_help_heading = "Run Options")]
pub struct Args {
    /// Source files to pack, compile, and execute.
    #[arg(required = true)]
    source_files: Vec<PathBuf>,
    /// Compilation flags, whitespace separated.
    ///
    /// Sanitizers are enabled by default so local runs catch undefined
    /// behavior the judge would punish.
    #[arg(short, long, default_value_t = CONFIG.compile.run_flags.clone())]
    flags: String,
    /// Path for the packed submission file.
    #[arg(short, long)]
    submission: Option<PathBuf>,
    /// Path for the compiled binary.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Arguments passed through to the program, after `--`.
    #[arg(last = true)]
    program_args: Vec<String>,
}

pub(super) fn run(args: Args) -> anyhow::Result<()> {
    let Args {
        source_files,
        flags,
        submission,
        output,
        program_args,
    } = args;
    let submission_path = super::submission_path(&source_files[0], submission);
    let output_path = super::binary_path(&source_files[0], output);

    submission::pack(&PackRequest {
        source_files,
        output_path: submission_path.clone(),
    })?;
    let outcome = submission::compile(&CompileRequest {
        source_files: vec![submission_path],
        output_path: output_path.clone(),
        flags: flags.split_whitespace().map(String::from).collect(),
    })?;
    if let CompileOutcome::UpToDate = outcome {
        tracing::warn!("executable is up-to-date, skipping compilation");
    }

    let report = submission::run(&RunRequest {
        executable_path: std::fs::canonicalize(&output_path)?,
        args: program_args,
    })?;

    let code_color = if report.exit_code == 0 {
        ansi::GREEN
    } else {
        ansi::RED
    };
    eprintln!(
        "{}{}Program exited with code {}{}",
        style(ansi::BOLD),
        style(code_color),
        report.exit_code,
        style(ansi::RESET),
    );
    eprintln!("Elapsed time: {:?}", report.elapsed);
    if report.extra_tokens > 0 {
        eprintln!(
            "{}⚠ {} extra tokens found{}",
            style(ansi::YELLOW),
            report.extra_tokens,
            style(ansi::RESET),
        );
    }
    Ok(())
}
