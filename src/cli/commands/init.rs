//! The `init` subcommand.

use std::path::PathBuf;

use clap::Parser;
use config::CONFIG;
use scaffold::Settings;

/// Arguments for the `init` subcommand.
#[derive(Parser, Debug)]
#[command(next_help_heading = "Init Options")]
pub struct Args {
    /// The directory to initialize; if it doesn't exist, it will be created.
    #[clap(default_value = ".")]
    directory: PathBuf,
    /// Number of main program files to create.
    #[arg(short, long, default_value_t = CONFIG.scaffold.count)]
    count: u8,
    /// URL of the template repository to vendor.
    #[arg(short, long, default_value_t = CONFIG.scaffold.repository.clone())]
    repository: String,
    /// Scaffold a problem-setting repository with testlib instead of
    /// lettered contest mains.
    #[arg(long)]
    testlib: bool,
    /// Skip git initialization and submodule vendoring.
    #[arg(long)]
    no_git: bool,
}

pub(super) fn run(args: Args) -> anyhow::Result<()> {
    scaffold::run(&Settings {
        directory: args.directory.clone(),
        main_program_count: args.count,
        template_repository: args.repository,
        testlib_repository: CONFIG.scaffold.testlib_repository.clone(),
        include_testlib: args.testlib,
        init_git: !args.no_git,
    })?;
    tracing::info!(directory = %args.directory.display(), "successfully initialized");
    Ok(())
}
