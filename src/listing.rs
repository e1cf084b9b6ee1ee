// src/listing.rs
//! Fetches the recursive listing of a subtree through the Git Trees API.

use crate::core_types::{EntryKind, RepoCoordinate, TreeEntry};
use crate::errors::Result;
use crate::github::{fetch_json, Endpoints, Transport, TreeResponse};

/// Lists subtrees with one `?recursive=1` request each.
#[derive(Debug, Clone, Copy)]
pub struct TreeLister<'a> {
    transport: &'a dyn Transport,
    endpoints: &'a Endpoints,
}

impl<'a> TreeLister<'a> {
    /// Creates a lister using `transport` for requests against `endpoints`.
    pub fn new(transport: &'a dyn Transport, endpoints: &'a Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Lists every blob, tree and gitlink below `identifier`.
    ///
    /// Paths are relative to the listed subtree. Entry types other than
    /// `blob`, `tree` and `commit` are skipped.
    ///
    /// # Errors
    /// [`crate::Error::NotFound`] on 404, [`crate::Error::UpstreamError`] on any other
    /// non-success status, [`crate::Error::MalformedResponse`] when the payload has no
    /// `tree` array.
    #[tracing::instrument(level = "debug", skip_all, fields(repo = %coordinate, tree = identifier))]
    pub fn list_recursive(
        &self,
        coordinate: &RepoCoordinate,
        identifier: &str,
    ) -> Result<Vec<TreeEntry>> {
        let url = self.endpoints.tree_url(coordinate, identifier);
        let response: TreeResponse = fetch_json(
            self.transport,
            &url,
            &format!("tree '{}' in {}", identifier, coordinate),
        )?;

        if response.truncated {
            log::warn!(
                "GitHub truncated the listing of tree '{}'; some files will be missing. \
                 Request a smaller directory to get a complete listing.",
                identifier
            );
        }

        let entries: Vec<TreeEntry> = response
            .tree
            .into_iter()
            .filter_map(|item| {
                let kind = match item.item_type.as_str() {
                    "blob" => EntryKind::Blob,
                    "tree" => EntryKind::Tree,
                    "commit" => EntryKind::Commit,
                    other => {
                        log::debug!("Skipping '{}' with unknown type '{}'", item.path, other);
                        return None;
                    }
                };
                Some(TreeEntry::new(item.path, kind, item.sha))
            })
            .collect();

        log::debug!("Tree '{}' lists {} entries.", identifier, entries.len());
        Ok(entries)
    }
}
