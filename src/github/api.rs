// src/github/api.rs
//! Payload types of the GitHub REST API and the status/shape checks shared by
//! every JSON request.

use super::transport::Transport;
use crate::errors::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Represents a file or directory item from the GitHub Contents API.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContentItem {
    pub path: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub sha: String,
}

/// Response of the Git Trees API.
#[derive(Deserialize, Debug)]
pub(crate) struct TreeResponse {
    pub tree: Vec<TreeItem>,
    #[serde(default)]
    pub truncated: bool,
}

/// A single entry of a recursive tree listing.
#[derive(Deserialize, Debug)]
pub(crate) struct TreeItem {
    pub path: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub sha: String,
}

/// Represents the branch metadata from the GitHub API, only for getting the head commit.
#[derive(Deserialize, Debug)]
pub(crate) struct BranchInfo {
    pub commit: BranchCommit,
}

#[derive(Deserialize, Debug)]
pub(crate) struct BranchCommit {
    pub sha: String,
}

/// Fetches `url` and parses the body as JSON.
///
/// A 404 becomes [`Error::NotFound`] naming `what`; any other non-2xx status
/// becomes [`Error::UpstreamError`]; an unparsable body becomes
/// [`Error::MalformedResponse`].
pub(crate) fn fetch_value(transport: &dyn Transport, url: &str, what: &str) -> Result<Value> {
    log::debug!("Fetching {} from: {}", what, url);
    let response = transport.get(url)?;

    if response.status == 404 {
        return Err(Error::NotFound(format!("{} ({})", what, url)));
    }
    if !response.is_success() {
        if matches!(response.status, 403 | 429) {
            log::warn!(
                "GitHub API request was refused with status {} (likely rate-limited).",
                response.status
            );
        }
        return Err(Error::UpstreamError {
            status: response.status,
            url: url.to_string(),
        });
    }

    serde_json::from_slice(&response.body).map_err(|e| Error::MalformedResponse {
        url: url.to_string(),
        reason: format!("body is not valid JSON: {}", e),
    })
}

/// Like [`fetch_value`], then deserializes the JSON into `T`.
pub(crate) fn fetch_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    url: &str,
    what: &str,
) -> Result<T> {
    let value = fetch_value(transport, url, what)?;
    from_value(value, url)
}

/// Deserializes an already-fetched JSON value, mapping failures to [`Error::MalformedResponse`].
pub(crate) fn from_value<T: DeserializeOwned>(value: Value, url: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::MalformedResponse {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::transport::HttpResponse;

    #[derive(Debug)]
    struct Fixed(u16, &'static str);

    impl Transport for Fixed {
        fn get(&self, _url: &str) -> Result<HttpResponse> {
            Ok(HttpResponse::new(self.0, self.1))
        }
    }

    #[test]
    fn test_404_maps_to_not_found() {
        let result = fetch_value(&Fixed(404, "{\"message\":\"Not Found\"}"), "u", "directory listing");
        assert!(matches!(result, Err(Error::NotFound(msg)) if msg.contains("directory listing")));
    }

    #[test]
    fn test_other_status_maps_to_upstream_error() {
        let result = fetch_value(&Fixed(403, "{\"message\":\"API rate limit exceeded\"}"), "u", "x");
        assert!(matches!(result, Err(Error::UpstreamError { status: 403, .. })));
        let result = fetch_value(&Fixed(500, ""), "u", "x");
        assert!(matches!(result, Err(Error::UpstreamError { status: 500, .. })));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let result = fetch_value(&Fixed(200, "<html>"), "u", "x");
        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let result: Result<TreeResponse> = fetch_json(&Fixed(200, "{\"sha\":\"abc\"}"), "u", "tree");
        match result {
            Err(Error::MalformedResponse { reason, .. }) => assert!(reason.contains("tree")),
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }
}
