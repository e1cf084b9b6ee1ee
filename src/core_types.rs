//! Defines core data structures used throughout the download pipeline.
//!
//! A [`RepoCoordinate`] identifies the remote source, [`TreeEntry`] values come
//! out of the listing stage, and [`DownloadItem`]s make up the queue consumed by
//! the fetch stage.

use std::fmt;
use std::path::PathBuf;

/// The ref used when none is given.
pub const DEFAULT_REF: &str = "master";

/// Identifies a remote repository and the ref to read from.
///
/// Immutable once constructed.
///
/// # Examples
///
/// ```
/// use ghparts::core_types::RepoCoordinate;
///
/// let coordinate = RepoCoordinate::new("acme", "sample", None);
/// assert_eq!(coordinate.git_ref(), "master");
/// assert_eq!(coordinate.to_string(), "acme/sample@master");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoCoordinate {
    owner: String,
    name: String,
    git_ref: String,
}

impl RepoCoordinate {
    /// Creates a coordinate; `git_ref` falls back to [`DEFAULT_REF`] when `None` or empty.
    pub fn new(owner: impl Into<String>, name: impl Into<String>, git_ref: Option<&str>) -> Self {
        let git_ref = git_ref
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REF)
            .to_string();
        Self {
            owner: owner.into(),
            name: name.into(),
            git_ref,
        }
    }

    /// The repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The branch, tag or commit to read.
    pub fn git_ref(&self) -> &str {
        &self.git_ref
    }
}

impl fmt::Display for RepoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.name, self.git_ref)
    }
}

/// The type of a node in a recursive tree listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A file.
    Blob,
    /// A directory.
    Tree,
    /// A submodule gitlink. Listed, never downloaded.
    Commit,
}

/// A single node of a recursive tree listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Path relative to the listed subtree, `/`-separated.
    pub path: String,
    /// Blob, tree or gitlink.
    pub kind: EntryKind,
    /// Content-addressed identifier (sha).
    pub identifier: String,
}

impl TreeEntry {
    /// Convenience constructor used by the listing stage and tests.
    pub fn new(path: impl Into<String>, kind: EntryKind, identifier: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            identifier: identifier.into(),
        }
    }
}

/// What the requested path turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// The path names a blob; it can be fetched directly.
    SingleFile {
        /// Raw-content URL of the blob.
        download_url: String,
        /// Destination relative to the target directory (the blob's file name).
        local_destination: PathBuf,
    },
    /// The path names a directory (or the repository root).
    Subtree {
        /// Tree-ish identifier accepted by the trees endpoint.
        identifier: String,
    },
}

/// Whether a queued item downloads content or only creates a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Download `download_url` into `local_relative_path`.
    File,
    /// Create `local_relative_path` as a directory.
    DirectoryMarker,
}

/// A unit of work for the fetch stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadItem {
    /// Path of the entry within the repository.
    pub remote_path: String,
    /// Destination relative to the target directory. Never contains `..`.
    pub local_relative_path: PathBuf,
    /// Raw-content URL. Empty for directory markers.
    pub download_url: String,
    /// File or directory marker.
    pub kind: ItemKind,
}

/// A listing entry that was refused while building the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    /// Path of the entry within the repository.
    pub remote_path: String,
    /// Why it was refused.
    pub reason: String,
}

/// The ordered list of work, built entirely before any fetch starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadQueue {
    /// Directory every `local_relative_path` is joined onto.
    pub target_dir: PathBuf,
    /// Items in listing order.
    pub items: Vec<DownloadItem>,
    /// Entries that would have escaped the target directory.
    pub rejected: Vec<RejectedEntry>,
}

impl DownloadQueue {
    /// Creates an empty queue rooted at `target_dir`.
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            ..Default::default()
        }
    }

    /// The absolute (or cwd-relative) destination of `item`.
    pub fn local_path(&self, item: &DownloadItem) -> PathBuf {
        self.target_dir.join(&item.local_relative_path)
    }

    /// Number of items that will be processed.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing will be processed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items that download content.
    pub fn file_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.kind == ItemKind::File)
            .count()
    }
}

/// Terminal state of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The item is on disk.
    Success,
    /// The item failed after exhausting retries (or could not be attempted).
    Failed(String),
}

impl DownloadOutcome {
    /// Returns `true` for [`DownloadOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Success)
    }
}

/// How a requested directory maps onto the target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// The directory's contents are placed directly into the target directory.
    #[default]
    Contents,
    /// The directory itself is created inside the target directory.
    Nested,
}
