mod add;
mod compile;
mod init;
mod pack;
mod run;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use config::CONFIG;

use super::Args;

#[derive(Subcommand)]
pub(super) enum Commands {
    /// Pack source files into a single file for online judge submissions.
    ///
    /// Local quoted includes are resolved recursively and flattened in
    /// place, each included file exactly once. System includes pass through
    /// untouched, and testlib.h is symlinked beside the output instead of
    /// being inlined.
    #[command(verbatim_doc_comment)]
    Pack(pack::Args),
    /// Compile source files to a binary.
    ///
    /// The sources are first packed into a single submission file, which is
    /// then compiled. Compilation is skipped when the binary is already
    /// newer than every source.
    #[command(verbatim_doc_comment)]
    Compile(compile::Args),
    /// Compile and run source files.
    ///
    /// Packs, compiles, and executes the result. The exit code and elapsed
    /// time are reported after execution, along with a warning when the
    /// program left part of its input unread.
    #[command(verbatim_doc_comment)]
    Run(run::Args),
    /// Initialize a new repository for programming contests.
    ///
    /// Creates a configurable number of starter main programs, formatting
    /// configuration, a CMakeLists.txt, and vendors the template library
    /// as a git submodule.
    #[command(verbatim_doc_comment)]
    Init(init::Args),
    /// Add a new source file from template and update CMakeLists.txt.
    #[command(verbatim_doc_comment)]
    Add(add::Args),
}

/// Dispatches the parsed arguments to their subcommand.
pub fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Commands::Pack(args) => pack::run(args),
        Commands::Compile(args) => compile::run(args),
        Commands::Run(args) => run::run(args),
        Commands::Init(args) => init::run(args),
        Commands::Add(args) => add::run(args),
    }
}

/// Default packed-submission path: the first source's file name under the
/// configured submission directory.
fn submission_path(first_source: &Path, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        let name = first_source
            .file_name()
            .unwrap_or_else(|| "submission.cpp".as_ref());
        CONFIG.paths.submission_dir.join(name)
    })
}

/// Default binary path: the first source's name with `.cpp` swapped for
/// `.out`, under the configured build directory.
fn binary_path(first_source: &Path, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        let name = first_source
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("submission.cpp")
            .replace(".cpp", ".out");
        CONFIG.paths.build_dir.join(name)
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn explicit_paths_win() {
        let out = submission_path(Path::new("A.cpp"), Some("custom.cpp".into()));
        assert_eq!(out, PathBuf::from("custom.cpp"));
        let bin = binary_path(Path::new("A.cpp"), Some("custom.out".into()));
        assert_eq!(bin, PathBuf::from("custom.out"));
    }

    #[test]
    fn defaults_derive_from_first_source_name() {
        let out = submission_path(Path::new("contest/A.cpp"), None);
        assert!(out.ends_with("A.cpp"));
        let bin = binary_path(Path::new("contest/A.cpp"), None);
        assert!(bin.ends_with("A.out"));
    }
}
