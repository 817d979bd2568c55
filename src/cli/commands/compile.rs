//! The `compile` subcommand.

use std::path::PathBuf;

use clap::Parser;
use config::CONFIG;
use submission::{CompileOutcome, CompileRequest, PackRequest};

/// Arguments for the `compile` subcommand.
#[derive(Parser, Debug)]
#[command(next_help_heading = "Compile Options")]
pub struct Args {
    /// Source files to pack and compile.
    #[arg(required = true)]
    source_files: Vec<PathBuf>,
    /// Compilation flags, whitespace separated.
    #[arg(short, long, default_value_t = CONFIG.compile.flags.clone())]
    flags: String,
    /// Path for the packed submission file.
    #[arg(short, long)]
    submission: Option<PathBuf>,
    /// Path for the compiled binary.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub(super) fn run(args: Args) -> anyhow::Result<()> {
    let Args {
        source_files,
        flags,
        submission,
        output,
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
    match outcome {
        CompileOutcome::UpToDate => {
            tracing::warn!("executable is up-to-date, skipping compilation");
        },
        CompileOutcome::Compiled => {
            tracing::info!(output = %output_path.display(), "binary written");
        },
    }
    Ok(())
}
