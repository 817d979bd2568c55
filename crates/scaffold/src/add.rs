//! Adds one source file to an existing contest repository.

use std::path::Path;

use crate::{MAIN_CPP, ScaffoldError, append_cmake_target, write_file};

/// Creates `source_name` in `dir` from the main template and registers a
/// matching executable target in `CMakeLists.txt`.
///
/// Refuses to overwrite an existing file; the caller decides what to do with
/// a half-written repository, this function decides nothing silently.
pub fn add(dir: &Path, source_name: &str) -> Result<(), ScaffoldError> {
    if !source_name.ends_with(".cpp") {
        return Err(ScaffoldError::NotACppFile {
            path: source_name.into(),
        });
    }
    let path = dir.join(source_name);
    if path.try_exists().unwrap_or(false) {
        return Err(ScaffoldError::Exists { path });
    }
    write_file(&path, MAIN_CPP)?;
    append_cmake_target(dir, source_name)
}
