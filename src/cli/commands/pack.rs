//! The `pack` subcommand.

use std::path::PathBuf;

use clap::Parser;
use submission::PackRequest;

/// Arguments for the `pack` subcommand.
#[derive(Parser, Debug)]
#[command(next_help_heading = "Pack Options")]
pub struct Args {
    /// Source files to flatten, in emission order.
    #[arg(required = true)]
    source_files: Vec<PathBuf>,
    /// Output file path.
    ///
    /// Defaults to the first source's file name under the configured
    /// submission directory.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub(super) fn run(args: Args) -> anyhow::Result<()> {
    let output_path = super::submission_path(&args.source_files[0], args.output);
    submission::pack(&PackRequest {
        source_files: args.source_files,
        output_path: output_path.clone(),
    })?;
    tracing::info!(output = %output_path.display(), "packed submission written");
    Ok(())
}
