// src/fetch/materialize.rs
//! Local directory creation and atomic file writes.

use crate::errors::{io_error_with_path, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Prefix of the temporary files written next to their destination.
pub const PARTIAL_FILE_PREFIX: &str = ".ghparts-";
/// Suffix of the temporary files written next to their destination.
pub const PARTIAL_FILE_SUFFIX: &str = ".part";

/// Ensures `path` exists as a directory, creating missing ancestors.
///
/// Safe to call concurrently for the same or overlapping paths: a directory
/// that appears between the check and the `mkdir` counts as success. Fails if
/// `path` exists but is not a directory, or on any other I/O error.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Ok(());
    }
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(io_error_with_path(e, path)),
    }
}

/// Writes `contents` to `path` so that readers see either the old file or the
/// complete new one.
///
/// The bytes go to a temporary file in the same directory, which is then
/// renamed over `path`. The temporary file is removed if anything fails.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut partial = tempfile::Builder::new()
        .prefix(PARTIAL_FILE_PREFIX)
        .suffix(PARTIAL_FILE_SUFFIX)
        .tempfile_in(parent)
        .map_err(|e| io_error_with_path(e, parent))?;
    partial
        .write_all(contents)
        .and_then(|()| partial.flush())
        .map_err(|e| io_error_with_path(e, partial.path()))?;
    partial
        .persist(path)
        .map_err(|e| io_error_with_path(e.error, path))?;
    Ok(())
}
