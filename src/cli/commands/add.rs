//! The `add` subcommand.

use std::path::Path;

use clap::Parser;

/// Arguments for the `add` subcommand.
#[derive(Parser, Debug)]
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Name of the source file to create; `.cpp` is appended if missing.
    filename: String,
}

pub(super) fn run(args: Args) -> anyhow::Result<()> {
    let mut filename = args.filename;
    if !filename.ends_with(".cpp") {
        filename.push_str(".cpp");
    }
    scaffold::add(Path::new("."), &filename)?;
    tracing::info!(file = %filename, "successfully added");
    Ok(())
}
