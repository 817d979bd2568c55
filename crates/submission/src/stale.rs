//! Modification-time staleness check gating rebuilds.
//!
//! A pure function of filesystem metadata: no content hashing is performed,
//! so an input that was touched but not changed still forces a rebuild. That
//! imprecision is accepted; re-running a build step is always correct here,
//! skipping it is only an optimization.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(test)]
mod test;

/// An error from stating a build input or output.
#[derive(thiserror::Error, Debug)]
pub enum StaleError {
    /// Filesystem metadata could not be read for a path.
    #[error("failed to stat {path}")]
    Stat {
        /// The path that could not be stated.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Reports whether `output` is at least as new as every path in `inputs`.
///
/// A missing output is not an error, merely not up to date. A missing or
/// unreadable input is an error; it never silently reads as "fresh".
pub fn is_up_to_date<I, P>(output: &Path, inputs: I) -> Result<bool, StaleError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let output_meta = match fs::metadata(output) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(source) => {
            return Err(StaleError::Stat {
                path: output.to_path_buf(),
                source,
            });
        },
    };
    let built = output_meta.modified().map_err(|source| StaleError::Stat {
        path: output.to_path_buf(),
        source,
    })?;

    for input in inputs {
        let input = input.as_ref();
        let modified = fs::metadata(input)
            .and_then(|meta| meta.modified())
            .map_err(|source| StaleError::Stat {
                path: input.to_path_buf(),
                source,
            })?;
        if modified > built {
            return Ok(false);
        }
    }
    Ok(true)
}
