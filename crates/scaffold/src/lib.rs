//! Scaffolds contest repositories from embedded templates.
//!
//! `run` lays out a fresh repository: starter main programs (or the testlib
//! tool set for problem setting), formatting configuration, a generated
//! `CMakeLists.txt`, and optionally a git repository with the shared template
//! library vendored as a submodule. [`add`] grows an existing repository by
//! one source file.

#![warn(missing_docs)]

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

mod add;
mod log;

pub use add::add;

//================================================================================================
// Templates
//================================================================================================

const MAIN_CPP: &str = include_str!("../templates/main.cpp");
const GEN_CPP: &str = include_str!("../templates/gen.cpp");
const CHECKER_CPP: &str = include_str!("../templates/checker.cpp");
const VAL_CPP: &str = include_str!("../templates/val.cpp");
const INTERACTOR_CPP: &str = include_str!("../templates/interactor.cpp");
const GITIGNORE: &str = include_str!("../templates/gitignore");
const CLANG_FORMAT: &str = include_str!("../templates/clang-format");

/// The testlib header linked at the root of problem-setting repositories.
pub const TESTLIB_HEADER: &str = "testlib.h";

//================================================================================================
// Types
//================================================================================================

/// Describes the repository to scaffold.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Where to create the repository. Created if missing.
    pub directory: PathBuf,
    /// How many lettered main programs (`A.cpp`, `B.cpp`, …) to create.
    /// Ignored when `include_testlib` selects the problem-setting layout.
    pub main_program_count: u8,
    /// The template repository vendored as the `templates/` submodule.
    pub template_repository: String,
    /// The testlib repository vendored as the `testlib/` submodule.
    pub testlib_repository: String,
    /// Lay out a problem-setting repository (solution, generator, checker,
    /// validator, interactor) instead of lettered contest mains.
    pub include_testlib: bool,
    /// Initialize git, commit the scaffold, and vendor submodules.
    pub init_git: bool,
}

/// An error representing a failure while scaffolding a repository.
#[derive(thiserror::Error, Debug)]
pub enum ScaffoldError {
    /// The repository directory could not be created.
    #[error("failed to create directory {path}")]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A scaffolded file could not be written.
    #[error("failed to write {path}")]
    WriteFile {
        /// The file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The repository directory could not be listed.
    #[error("failed to read directory {path}")]
    ReadDir {
        /// The directory that could not be listed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The target source file already exists.
    #[error("file {path} already exists")]
    Exists {
        /// The pre-existing file.
        path: PathBuf,
    },
    /// A source file name outside the expected `.cpp` convention.
    #[error("filename must end with .cpp: {path}")]
    NotACppFile {
        /// The rejected file name.
        path: PathBuf,
    },
    /// `CMakeLists.txt` could not be opened for appending.
    #[error("failed to open {path}")]
    OpenCMakeLists {
        /// The CMakeLists path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Git repository initialization failed.
    #[error(transparent)]
    GitInit(#[from] Box<gix::init::Error>),
    /// A git subprocess could not be spawned.
    #[error("failed to run `git {action}`")]
    Git {
        /// The git arguments being run.
        action: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A git subprocess ran and failed.
    #[error("`git {action}` exited with {status}")]
    GitFailed {
        /// The git arguments being run.
        action: String,
        /// The subprocess exit status.
        status: ExitStatus,
    },
    /// The testlib symlink could not be created.
    #[error("failed to create symlink {path}")]
    Symlink {
        /// The link path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

//================================================================================================
// Functions
//================================================================================================

/// Scaffolds a new contest repository according to `settings`.
#[tracing::instrument(skip_all, fields(directory = %settings.directory.display()))]
pub fn run(settings: &Settings) -> Result<(), ScaffoldError> {
    let span = tracing::Span::current();
    log::set_task(&span, "🏗️ init");
    let dir = &settings.directory;

    {
        let phase = tracing::info_span!("create_directory");
        log::set_sub_task(&phase, "create repository directory");
        let _enter = phase.enter();
        fs::create_dir_all(dir).map_err(|source| ScaffoldError::CreateDir {
            path: dir.clone(),
            source,
        })?;
    }

    {
        let phase = tracing::info_span!("create_main_programs");
        log::set_sub_task(&phase, "create main program files");
        let _enter = phase.enter();
        if settings.include_testlib {
            for (name, template) in [
                ("solution.cpp", MAIN_CPP),
                ("gen.cpp", GEN_CPP),
                ("checker.cpp", CHECKER_CPP),
                ("val.cpp", VAL_CPP),
                ("interactor.cpp", INTERACTOR_CPP),
            ] {
                write_file(&dir.join(name), template)?;
            }
        } else {
            for i in 0..settings.main_program_count.min(26) {
                let name = format!("{}.cpp", char::from(b'A' + i));
                write_file(&dir.join(name), MAIN_CPP)?;
            }
        }
    }

    {
        let phase = tracing::info_span!("create_template_files");
        log::set_sub_task(&phase, "create template files");
        let _enter = phase.enter();
        write_file(&dir.join(".gitignore"), GITIGNORE)?;
        write_file(&dir.join(".clang-format"), CLANG_FORMAT)?;
        write_cmake_lists(dir)?;
    }

    if settings.init_git {
        {
            let phase = tracing::info_span!("init_git");
            log::set_sub_task(&phase, "initialize git repository");
            let _enter = phase.enter();
            if !dir.join(".git").try_exists().unwrap_or(false) {
                gix::init(dir.clone()).map_err(Box::new)?;
            }
            git(dir, &["add", "."])?;
            git(
                dir,
                &["commit", "-m", "feat: initial repository with main templates"],
            )?;
        }

        {
            let phase = tracing::info_span!("vendor_templates");
            log::set_sub_task(&phase, "download templates");
            let _enter = phase.enter();
            git(
                dir,
                &[
                    "submodule",
                    "add",
                    settings.template_repository.as_str(),
                    "templates",
                ],
            )?;
            git(dir, &["add", "."])?;
            git(dir, &["commit", "-m", "feat: add templates submodule"])?;
        }

        if settings.include_testlib {
            let phase = tracing::info_span!("vendor_testlib");
            log::set_sub_task(&phase, "download testlib");
            let _enter = phase.enter();
            git(
                dir,
                &[
                    "submodule",
                    "add",
                    settings.testlib_repository.as_str(),
                    "testlib",
                ],
            )?;
            link_testlib(dir)?;
            git(dir, &["add", "."])?;
            git(dir, &["commit", "-m", "feat: add testlib submodule"])?;
        }
    } else if settings.include_testlib {
        link_testlib(dir)?;
    }

    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    fs::write(path, contents).map_err(|source| ScaffoldError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Generates `CMakeLists.txt` with one executable target per source found.
fn write_cmake_lists(dir: &Path) -> Result<(), ScaffoldError> {
    let project = dir
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("contest");

    let mut sources: Vec<String> = fs::read_dir(dir)
        .map_err(|source| ScaffoldError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".cpp"))
        .collect();
    sources.sort();

    let mut contents = format!(
        "cmake_minimum_required(VERSION 3.16)\n\
         project({project} CXX)\n\
         \n\
         set(CMAKE_CXX_STANDARD 20)\n\
         set(CMAKE_CXX_STANDARD_REQUIRED ON)\n\
         set(CMAKE_EXPORT_COMPILE_COMMANDS ON)\n\
         \n"
    );
    for name in sources {
        contents.push_str(&add_executable_line(&name));
    }
    write_file(&dir.join("CMakeLists.txt"), &contents)
}

fn add_executable_line(source_name: &str) -> String {
    let target = source_name.replace(".cpp", ".out");
    format!("add_executable({target} {source_name})\n")
}

/// Appends a target for `source_name` to an existing `CMakeLists.txt`.
fn append_cmake_target(dir: &Path, source_name: &str) -> Result<(), ScaffoldError> {
    let path = dir.join("CMakeLists.txt");
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(&path)
        .map_err(|source| ScaffoldError::OpenCMakeLists {
            path: path.clone(),
            source,
        })?;
    file.write_all(add_executable_line(source_name).as_bytes())
        .map_err(|source| ScaffoldError::WriteFile { path, source })
}

fn link_testlib(dir: &Path) -> Result<(), ScaffoldError> {
    let link = dir.join(TESTLIB_HEADER);
    let target = Path::new("testlib").join(TESTLIB_HEADER);
    match std::os::unix::fs::symlink(&target, &link) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(ScaffoldError::Symlink { path: link, source }),
    }
}

fn git(dir: &Path, args: &[&str]) -> Result<(), ScaffoldError> {
    let action = args.join(" ");
    let mut command = Command::new("git");
    command.args(args).current_dir(dir);
    let status = tracing_indicatif::suspend_tracing_indicatif(|| command.status())
        .map_err(|source| ScaffoldError::Git {
            action: action.clone(),
            source,
        })?;
    if !status.success() {
        return Err(ScaffoldError::GitFailed { action, status });
    }
    Ok(())
}
