//! Defines application-specific error types.
//!
//! This module provides the `Error` enum, which categorizes the failures that can
//! occur while resolving, listing and downloading repository content, offering
//! more context than generic I/O or `reqwest` errors.

use std::fmt;
use thiserror::Error;

/// A specialized `Result` type for `ghparts` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Application-specific errors used throughout `ghparts`.
#[derive(Error, Debug)]
pub enum Error {
    // --- Upstream Errors ---
    /// The requested path, ref or repository does not exist upstream.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The remote API answered with a non-success status other than a confirmed 404.
    /// Rate limiting (403/429) and server errors land here and may be transient.
    #[error("GitHub API returned status {status} for '{url}'")]
    UpstreamError {
        /// The HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// The request could not be completed at the transport level (DNS, TLS, timeout...).
    #[error("Request to '{url}' failed: {reason}")]
    Transport {
        /// The requested URL.
        url: String,
        /// Description of the transport failure.
        reason: String,
    },

    /// The payload did not have the expected shape.
    #[error("Malformed response from '{url}': {reason}")]
    MalformedResponse {
        /// The requested URL.
        url: String,
        /// What was wrong with the payload.
        reason: String,
    },

    /// The requested path names something that cannot be downloaded (symlink, submodule).
    #[error("Path '{path}' is a {kind}, which cannot be downloaded")]
    UnsupportedEntry {
        /// The requested path.
        path: String,
        /// The entry type reported by the API.
        kind: String,
    },

    /// The requested path is not a valid repository path.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The path as given by the caller.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    // --- I/O Errors ---
    /// Local I/O failure unrelated to the network.
    #[error("I/O error accessing path '{path}': {source}")]
    FilesystemError {
        /// The path that caused the I/O error.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    // --- Aggregate ---
    /// Some queued items could not be retrieved after retry exhaustion.
    #[error("{} of {total} item(s) could not be retrieved:\n{}", failed.len(), FailedList(failed))]
    PartialFailure {
        /// Every item that failed, with its reason.
        failed: Vec<FailedItem>,
        /// The number of items that were queued.
        total: usize,
    },

    // --- Configuration Errors ---
    /// Invalid configuration settings or combinations.
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- Signal Handling ---
    /// The operation was cancelled by the user (e.g., Ctrl+C).
    #[error("Operation cancelled by user (Ctrl+C)")]
    Interrupted,
}

/// Errors raised while building a [`crate::Config`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No repository was given, neither as `repo` nor as `username` + `repository`.
    #[error("No repository specified. Use 'owner/repo[/ref]' or set both username and repository.")]
    MissingRepository,

    /// The repository specification could not be parsed.
    #[error("Invalid repository '{input}': {reason}")]
    InvalidRepository {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An option has an out-of-range or unparsable value.
    #[error("Invalid value for '{option}': {reason}")]
    InvalidValue {
        /// The option name.
        option: String,
        /// Why the value is invalid.
        reason: String,
    },
}

/// A queued item that did not reach the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    /// Path of the entry within the repository.
    pub remote_path: String,
    /// Why the item failed.
    pub reason: String,
}

impl fmt::Display for FailedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.remote_path, self.reason)
    }
}

struct FailedList<'a>(&'a [FailedItem]);

impl fmt::Display for FailedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {}", item)?;
        }
        Ok(())
    }
}

impl Error {
    /// Returns `true` if the error is worth retrying (transport failures and
    /// non-404 upstream statuses).
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::UpstreamError { .. })
    }
}

/// Helper function to create an `Error::FilesystemError` with path context.
///
/// # Arguments
/// * `source` - The original `std::io::Error`.
/// * `path` - The path associated with the error, convertible to `AsRef<std::path::Path>`.
pub fn io_error_with_path<P: AsRef<std::path::Path>>(source: std::io::Error, path: P) -> Error {
    Error::FilesystemError {
        path: path.as_ref().display().to_string(),
        source,
    }
}
