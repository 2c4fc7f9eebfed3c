//! Stat predicates.
//!
//! Each predicate fetches fresh metadata and answers with `Ok(bool)`. A path that
//! does not exist is a plain `Ok(false)`; the error channel is reserved for cases
//! where the answer cannot be determined (e.g. an untraversable parent directory).

use std::fs;
use std::io;
use std::path::Path;
use tracing::trace;

use crate::errors::{FsError, Result};

/// Stat `path` (following symlinks); `Ok(None)` when it does not exist.
fn stat(path: &Path) -> Result<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FsError::io("stat", path, e)),
    }
}

/// Whether `path` is a regular file.
pub fn is_regular(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    Ok(stat(path)?.is_some_and(|m| m.file_type().is_file()))
}

/// Whether `path` is a directory.
pub fn is_dir(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    Ok(stat(path)?.is_some_and(|m| m.is_dir()))
}

/// Whether `path` is itself a symbolic link (the link is not followed).
pub fn is_symlink(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match fs::symlink_metadata(path) {
        Ok(meta) => Ok(meta.file_type().is_symlink()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(FsError::io("lstat", path, e)),
    }
}

/// Whether `path` is a directory holding at least one entry.
///
/// Anything that is not a directory, including a missing path, yields `Ok(false)`.
/// A directory whose listing cannot be opened or read yields an error.
pub fn is_non_empty_dir(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if !is_dir(path)? {
        return Ok(false);
    }

    let mut entries = fs::read_dir(path).map_err(|e| FsError::io("list directory", path, e))?;
    let first = entries
        .next()
        .transpose()
        .map_err(|e| FsError::io("read directory entry", path, e))?;

    trace!(path = %path.display(), non_empty = first.is_some(), "probed directory");
    Ok(first.is_some())
}
