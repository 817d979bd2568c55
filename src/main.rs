//! The main entry point for the cpcli binary.

#![warn(missing_docs)]

use std::process::ExitCode;

use clap::Parser;
use cpcli::cli::{self, Args};

fn main() -> ExitCode {
    let args = Args::parse_from(cli::change_directory());
    let _guard = cli::init_global_subscriber(args.log);

    if let Err(e) = cli::run(args) {
        cpcli::fatal!(e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
