// src/github/endpoints.rs
//! Builds the URLs of the GitHub endpoints used by the pipeline.

use crate::core_types::RepoCoordinate;
use crate::errors::ConfigError;
use url::Url;

/// Default REST API host.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// Default raw-content host.
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Base URLs of the API and raw-content hosts.
///
/// Path segments are percent-encoded by `url`, so repository paths containing
/// spaces or `#` produce valid URLs. Refs and paths are split on `/` so that
/// branch names such as `feature/x` keep their slashes.
///
/// # Examples
///
/// ```
/// use ghparts::core_types::RepoCoordinate;
/// use ghparts::github::Endpoints;
///
/// let endpoints = Endpoints::default();
/// let coordinate = RepoCoordinate::new("acme", "sample", Some("main"));
///
/// assert_eq!(
///     endpoints.contents_url(&coordinate, "docs"),
///     "https://api.github.com/repos/acme/sample/contents/docs?ref=main"
/// );
/// assert_eq!(
///     endpoints.raw_url(&coordinate, "docs/read me.md"),
///     "https://raw.githubusercontent.com/acme/sample/main/docs/read%20me.md"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: Url,
    raw_base: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            raw_base: Url::parse(DEFAULT_RAW_BASE).expect("default raw base is a valid URL"),
        }
    }
}

impl Endpoints {
    /// Creates endpoints from custom base URLs (e.g. GitHub Enterprise or a test server).
    pub fn new(api_base: &str, raw_base: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: parse_base(api_base, "api-url")?,
            raw_base: parse_base(raw_base, "raw-url")?,
        })
    }

    /// The API base URL.
    pub fn api_base(&self) -> &str {
        self.api_base.as_str()
    }

    /// The raw-content base URL.
    pub fn raw_base(&self) -> &str {
        self.raw_base.as_str()
    }

    /// `GET /repos/{owner}/{repo}/contents/{path}?ref={ref}`. An empty path lists the root.
    pub fn contents_url(&self, coordinate: &RepoCoordinate, path: &str) -> String {
        let mut url = extend(
            &self.api_base,
            ["repos", coordinate.owner(), coordinate.name(), "contents"]
                .into_iter()
                .chain(split(path)),
        );
        url.query_pairs_mut().append_pair("ref", coordinate.git_ref());
        url.into()
    }

    /// `GET /repos/{owner}/{repo}/git/trees/{identifier}?recursive=1`.
    pub fn tree_url(&self, coordinate: &RepoCoordinate, identifier: &str) -> String {
        let mut url = extend(
            &self.api_base,
            ["repos", coordinate.owner(), coordinate.name(), "git", "trees"]
                .into_iter()
                .chain(split(identifier)),
        );
        url.query_pairs_mut().append_pair("recursive", "1");
        url.into()
    }

    /// `GET /repos/{owner}/{repo}/branches/{ref}`.
    pub fn branch_url(&self, coordinate: &RepoCoordinate) -> String {
        extend(
            &self.api_base,
            ["repos", coordinate.owner(), coordinate.name(), "branches"]
                .into_iter()
                .chain(split(coordinate.git_ref())),
        )
        .into()
    }

    /// `{raw}/{owner}/{repo}/{ref}/{path}`, where `path` is relative to the repository root.
    pub fn raw_url(&self, coordinate: &RepoCoordinate, path: &str) -> String {
        extend(
            &self.raw_base,
            [coordinate.owner(), coordinate.name()]
                .into_iter()
                .chain(split(coordinate.git_ref()))
                .chain(split(path)),
        )
        .into()
    }
}

fn parse_base(input: &str, option: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(input).map_err(|e| ConfigError::InvalidValue {
        option: option.to_string(),
        reason: format!("'{}' is not a valid URL: {}", input, e),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            option: option.to_string(),
            reason: format!("'{}' must be an http(s) base URL", input),
        });
    }
    Ok(url)
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn extend<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> Url {
    let mut url = base.clone();
    // `parse_base` guarantees a base URL, so segments are always available.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
