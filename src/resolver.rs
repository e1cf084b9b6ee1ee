// src/resolver.rs
//! Decides whether a requested path is a file or a directory.
//!
//! The resolver lists the *parent* of the requested path through the Contents
//! API and looks the path up in that listing. A file resolves straight to its
//! raw-content URL, so single-file downloads never fetch a recursive tree. A
//! directory resolves to its tree sha, which the [`crate::listing`] stage expands.

use crate::core_types::{RepoCoordinate, ResolvedTarget};
use crate::errors::{Error, Result};
use crate::github::{fetch_json, fetch_value, from_value, BranchInfo, ContentItem, Endpoints, Transport};
use crate::queue::safe_relative_path;
use serde_json::Value;

/// Resolves requested paths against the Contents API.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    transport: &'a dyn Transport,
    endpoints: &'a Endpoints,
}

impl<'a> PathResolver<'a> {
    /// Creates a resolver using `transport` for requests against `endpoints`.
    pub fn new(transport: &'a dyn Transport, endpoints: &'a Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Resolves `requested_path` to a single file or a subtree.
    ///
    /// Leading and trailing separators are ignored. An empty path denotes the
    /// whole repository and is rejected here; use [`PathResolver::resolve_root`].
    ///
    /// # Errors
    /// * [`Error::NotFound`] if the parent listing is 404 or does not contain the path.
    /// * [`Error::UpstreamError`] for any other non-success status.
    /// * [`Error::MalformedResponse`] if the listing cannot be parsed.
    /// * [`Error::UnsupportedEntry`] for symlinks and submodules.
    #[tracing::instrument(level = "debug", skip_all, fields(repo = %coordinate, path = requested_path))]
    pub fn resolve(&self, coordinate: &RepoCoordinate, requested_path: &str) -> Result<ResolvedTarget> {
        let path = normalize_repo_path(requested_path)?;
        if path.is_empty() {
            return Err(Error::InvalidPath {
                path: requested_path.to_string(),
                reason: "an empty path denotes the whole repository".to_string(),
            });
        }

        let (parent, name) = path.rsplit_once('/').unwrap_or(("", path.as_str()));
        let url = self.endpoints.contents_url(coordinate, parent);
        let listing = fetch_value(
            self.transport,
            &url,
            &format!("directory listing of '{}' in {}", parent, coordinate),
        )?;

        // A directory lists as an array; a file parent comes back as a single object.
        let items: Vec<ContentItem> = match listing {
            Value::Array(_) => from_value(listing, &url)?,
            Value::Object(_) => vec![from_value(listing, &url)?],
            _ => {
                return Err(Error::MalformedResponse {
                    url,
                    reason: "expected a JSON array or object".to_string(),
                })
            }
        };

        let item = items
            .into_iter()
            .find(|item| item.path == path)
            .ok_or_else(|| Error::NotFound(format!("'{}' does not exist in {}", path, coordinate)))?;

        match item.item_type.as_str() {
            "file" => {
                log::debug!("'{}' is a file, fetching it directly.", path);
                let local_destination = safe_relative_path(name).map_err(|reason| Error::InvalidPath {
                    path: path.clone(),
                    reason,
                })?;
                Ok(ResolvedTarget::SingleFile {
                    download_url: self.endpoints.raw_url(coordinate, &path),
                    local_destination,
                })
            }
            "dir" => {
                log::debug!("'{}' is a directory with tree {}.", path, item.sha);
                Ok(ResolvedTarget::Subtree { identifier: item.sha })
            }
            other => Err(Error::UnsupportedEntry {
                path,
                kind: other.to_string(),
            }),
        }
    }

    /// Resolves the tree-ish for the whole repository at the coordinate's ref.
    ///
    /// Branches resolve to their head commit sha. When the ref is not a branch
    /// (a tag or a commit sha), the ref itself is returned, as the trees endpoint
    /// accepts any tree-ish.
    #[tracing::instrument(level = "debug", skip_all, fields(repo = %coordinate))]
    pub fn resolve_root(&self, coordinate: &RepoCoordinate) -> Result<String> {
        let url = self.endpoints.branch_url(coordinate);
        match fetch_json::<BranchInfo>(self.transport, &url, &format!("branch of {}", coordinate)) {
            Ok(branch) => {
                log::debug!("Branch '{}' is at {}.", coordinate.git_ref(), branch.commit.sha);
                Ok(branch.commit.sha)
            }
            Err(Error::NotFound(_)) => {
                log::debug!(
                    "'{}' is not a branch; using it as a tree-ish directly.",
                    coordinate.git_ref()
                );
                Ok(coordinate.git_ref().to_string())
            }
            Err(e) => Err(e),
        }
    }
}

/// Normalizes a requested repository path.
///
/// Strips leading and trailing separators and collapses repeated ones. `.` and
/// `..` segments, backslashes and NUL bytes are rejected.
///
/// # Examples
/// ```
/// use ghparts::resolver::normalize_repo_path;
///
/// assert_eq!(normalize_repo_path("/docs/img/").unwrap(), "docs/img");
/// assert_eq!(normalize_repo_path("").unwrap(), "");
/// assert!(normalize_repo_path("docs/../secrets").is_err());
/// ```
pub fn normalize_repo_path(requested_path: &str) -> Result<String> {
    let invalid = |reason: &str| Error::InvalidPath {
        path: requested_path.to_string(),
        reason: reason.to_string(),
    };
    if requested_path.contains('\\') || requested_path.contains('\0') {
        return Err(invalid("backslashes and NUL bytes are not allowed"));
    }
    let segments: Vec<&str> = requested_path
        .trim()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    if segments.iter().any(|segment| *segment == "." || *segment == "..") {
        return Err(invalid("'.' and '..' segments are not allowed"));
    }
    Ok(segments.join("/"))
}
