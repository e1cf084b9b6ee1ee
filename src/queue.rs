// src/queue.rs
//! Turns a tree listing into the download queue.
//!
//! Every entry gets its repository path, its raw-content URL, and a local path
//! relative to the target directory. Entries whose local path would leave the
//! target directory are refused here, before anything touches the network or
//! the disk.

use crate::core_types::{
    DownloadItem, DownloadQueue, EntryKind, ItemKind, Layout, RejectedEntry, RepoCoordinate,
    TreeEntry,
};
use crate::github::Endpoints;
use std::path::{Component, Path, PathBuf};

/// Builds [`DownloadQueue`]s for one repository coordinate.
#[derive(Debug, Clone)]
pub struct QueueBuilder<'a> {
    coordinate: &'a RepoCoordinate,
    endpoints: &'a Endpoints,
    layout: Layout,
}

impl<'a> QueueBuilder<'a> {
    /// Creates a builder with the default [`Layout::Contents`].
    pub fn new(coordinate: &'a RepoCoordinate, endpoints: &'a Endpoints) -> Self {
        Self {
            coordinate,
            endpoints,
            layout: Layout::default(),
        }
    }

    /// Sets how a requested directory maps onto the target directory.
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Builds the queue for a listing whose paths are relative to `requested_path`.
    ///
    /// With [`Layout::Contents`], `docs/img/logo.png` (listed as `img/logo.png`
    /// under `docs`) lands at `<target>/img/logo.png`. With [`Layout::Nested`] it
    /// lands at `<target>/docs/img/logo.png`, under the last component of the
    /// requested path (the repository name when the root is requested).
    ///
    /// # Examples
    /// ```
    /// use ghparts::core_types::{EntryKind, ItemKind, RepoCoordinate, TreeEntry};
    /// use ghparts::github::Endpoints;
    /// use ghparts::queue::QueueBuilder;
    /// use std::path::PathBuf;
    ///
    /// let coordinate = RepoCoordinate::new("acme", "sample", Some("main"));
    /// let endpoints = Endpoints::default();
    /// let entries = vec![
    ///     TreeEntry::new("img", EntryKind::Tree, "t1"),
    ///     TreeEntry::new("img/logo.png", EntryKind::Blob, "b1"),
    /// ];
    ///
    /// let queue = QueueBuilder::new(&coordinate, &endpoints).build(&entries, "docs", "out");
    ///
    /// assert_eq!(queue.items[0].kind, ItemKind::DirectoryMarker);
    /// assert_eq!(queue.items[1].remote_path, "docs/img/logo.png");
    /// assert_eq!(queue.items[1].local_relative_path, PathBuf::from("img/logo.png"));
    /// assert_eq!(
    ///     queue.items[1].download_url,
    ///     "https://raw.githubusercontent.com/acme/sample/main/docs/img/logo.png"
    /// );
    /// ```
    pub fn build(
        &self,
        entries: &[TreeEntry],
        requested_path: &str,
        target_dir: impl Into<PathBuf>,
    ) -> DownloadQueue {
        let requested_path = requested_path.trim_matches('/');
        let mut queue = DownloadQueue::new(target_dir);
        let prefix = self.nested_prefix(requested_path);

        for entry in entries {
            let remote_path = join_remote(requested_path, &entry.path);

            let relative = match safe_relative_path(&entry.path) {
                Ok(relative) => relative,
                Err(reason) => {
                    log::warn!("Refusing listing entry '{}': {}", remote_path, reason);
                    queue.rejected.push(RejectedEntry {
                        remote_path,
                        reason,
                    });
                    continue;
                }
            };
            let local_relative_path = match &prefix {
                Some(prefix) => prefix.join(relative),
                None => relative,
            };

            let item = match entry.kind {
                EntryKind::Blob => DownloadItem {
                    download_url: self.endpoints.raw_url(self.coordinate, &remote_path),
                    remote_path,
                    local_relative_path,
                    kind: ItemKind::File,
                },
                EntryKind::Tree => DownloadItem {
                    remote_path,
                    local_relative_path,
                    download_url: String::new(),
                    kind: ItemKind::DirectoryMarker,
                },
                EntryKind::Commit => {
                    log::warn!("Skipping submodule '{}'; submodules are not downloaded.", remote_path);
                    continue;
                }
            };
            queue.items.push(item);
        }

        log::debug!(
            "Queued {} item(s) ({} file(s)), refused {}.",
            queue.len(),
            queue.file_count(),
            queue.rejected.len()
        );
        queue
    }

    /// Builds the queue for a listing whose paths are relative to the repository root.
    ///
    /// Only entries below `requested_path` are kept, and that prefix is stripped
    /// before delegating to [`QueueBuilder::build`]. With an empty
    /// `requested_path` every entry is kept.
    pub fn build_rooted(
        &self,
        entries: &[TreeEntry],
        requested_path: &str,
        target_dir: impl Into<PathBuf>,
    ) -> DownloadQueue {
        let requested_path = requested_path.trim_matches('/');
        if requested_path.is_empty() {
            return self.build(entries, "", target_dir);
        }
        let prefix = format!("{}/", requested_path);
        let under: Vec<TreeEntry> = entries
            .iter()
            .filter_map(|entry| {
                let relative = entry.path.strip_prefix(&prefix)?;
                Some(TreeEntry::new(relative, entry.kind, entry.identifier.clone()))
            })
            .collect();
        log::debug!(
            "{} of {} listed entries are below '{}'.",
            under.len(),
            entries.len(),
            requested_path
        );
        self.build(&under, requested_path, target_dir)
    }

    /// Builds the one-item queue of a path that resolved to a single blob.
    pub fn single_file(
        &self,
        remote_path: &str,
        download_url: String,
        local_destination: PathBuf,
        target_dir: impl Into<PathBuf>,
    ) -> DownloadQueue {
        let mut queue = DownloadQueue::new(target_dir);
        queue.items.push(DownloadItem {
            remote_path: remote_path.trim_matches('/').to_string(),
            local_relative_path: local_destination,
            download_url,
            kind: ItemKind::File,
        });
        queue
    }

    fn nested_prefix(&self, requested_path: &str) -> Option<PathBuf> {
        if self.layout != Layout::Nested {
            return None;
        }
        let name = requested_path
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or_else(|| self.coordinate.name());
        safe_relative_path(name).ok()
    }
}

fn join_remote(requested_path: &str, entry_path: &str) -> String {
    if requested_path.is_empty() {
        entry_path.to_string()
    } else {
        format!("{}/{}", requested_path, entry_path)
    }
}

/// Converts a `/`-separated repository path into a relative local path.
///
/// Refuses anything that could resolve outside the directory it is joined
/// onto: empty paths, absolute paths, `.`/`..`/empty segments, drive prefixes,
/// backslashes and NUL bytes.
///
/// # Examples
/// ```
/// use ghparts::queue::safe_relative_path;
/// use std::path::PathBuf;
///
/// assert_eq!(safe_relative_path("img/logo.png").unwrap(), PathBuf::from("img").join("logo.png"));
/// assert!(safe_relative_path("../escape.txt").is_err());
/// assert!(safe_relative_path("/etc/passwd").is_err());
/// ```
pub fn safe_relative_path(path: &str) -> Result<PathBuf, String> {
    if path.is_empty() {
        return Err("empty path".to_string());
    }
    if path.contains('\\') || path.contains('\0') {
        return Err("path contains a backslash or NUL byte".to_string());
    }
    if path.starts_with('/') {
        return Err("absolute path".to_string());
    }

    let mut relative = PathBuf::new();
    for segment in path.split('/') {
        match segment {
            "" => return Err("empty path segment".to_string()),
            "." | ".." => return Err(format!("'{}' segment escapes the target directory", segment)),
            _ if segment.contains(':') && cfg!(windows) => {
                return Err("drive or stream prefix".to_string())
            }
            _ => relative.push(segment),
        }
    }

    // Every component must be a plain name on this platform too.
    if !Path::new(&relative)
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return Err("path resolves outside the target directory".to_string());
    }
    Ok(relative)
}
