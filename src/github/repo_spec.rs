//! Handles parsing of repository specifications and GitHub URLs.

use crate::core_types::RepoCoordinate;
use crate::errors::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;

/// A repository coordinate plus the path a URL may carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    /// The repository owner (user or organization).
    pub owner: String,
    /// The repository name, without any `.git` suffix.
    pub name: String,
    /// The branch, tag or commit, if the input named one.
    pub git_ref: Option<String>,
    /// The path within the repository, if the input named one (tree/blob URLs only).
    pub path: Option<String>,
}

impl RepoSpec {
    /// Builds the coordinate, letting `ref_override` win over the ref found in the input.
    pub fn coordinate(&self, ref_override: Option<&str>) -> RepoCoordinate {
        RepoCoordinate::new(
            self.owner.clone(),
            self.name.clone(),
            ref_override.or(self.git_ref.as_deref()),
        )
    }
}

/// Checks if a given string looks like a GitHub URL rather than `owner/repo` shorthand.
///
/// # Examples
/// ```
/// use ghparts::github::is_github_url;
///
/// assert!(is_github_url("https://github.com/user/repo"));
/// assert!(is_github_url("git@github.com:user/repo.git"));
/// assert!(!is_github_url("user/repo/main"));
/// ```
pub fn is_github_url(input: &str) -> bool {
    input.starts_with("https://github.com/")
        || input.starts_with("http://github.com/")
        || input.starts_with("git@github.com:")
}

/// Regex for GitHub browse URLs: `.../tree/ref/path` or `.../blob/ref/path`.
static GITHUB_BROWSE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://github\.com/([^/]+)/([^/]+)/(?:tree|blob)/([^/]+)(?:/(.*))?$").unwrap()
});

/// Regex for repository root and clone URLs (`https://github.com/o/r[.git]`, `git@github.com:o/r.git`).
static GITHUB_REPO_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://github\.com/|git@github\.com:)([^/]+)/([^/]+?)(?:\.git)?/?$").unwrap()
});

/// Allowed characters in owner and repository names.
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

/// Parses a repository specification.
///
/// Accepted forms:
/// * `owner/repo` and `owner/repo/ref` (everything after the repository is the
///   ref, so `owner/repo/feature/x` reads branch `feature/x`).
/// * `https://github.com/owner/repo[.git]` and `git@github.com:owner/repo.git`.
/// * `https://github.com/owner/repo/tree/ref/path` and `.../blob/ref/path`, which
///   also carry the path. A ref containing `/` cannot be told apart from the path
///   in this form; the first segment is taken as the ref.
///
/// # Examples
/// ```
/// use ghparts::github::parse_repo_spec;
///
/// let spec = parse_repo_spec("acme/sample/main").unwrap();
/// assert_eq!(spec.owner, "acme");
/// assert_eq!(spec.name, "sample");
/// assert_eq!(spec.git_ref.as_deref(), Some("main"));
///
/// let spec = parse_repo_spec("https://github.com/acme/sample/tree/v1.0/docs/img").unwrap();
/// assert_eq!(spec.git_ref.as_deref(), Some("v1.0"));
/// assert_eq!(spec.path.as_deref(), Some("docs/img"));
/// ```
pub fn parse_repo_spec(input: &str) -> Result<RepoSpec, ConfigError> {
    let input = input.trim();
    let invalid = |reason: &str| ConfigError::InvalidRepository {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let (owner, name, git_ref, path) = if let Some(caps) = GITHUB_BROWSE_URL_RE.captures(input) {
        let path = caps
            .get(4)
            .map(|m| m.as_str().trim_matches('/'))
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        (
            caps[1].to_string(),
            caps[2].trim_end_matches(".git").to_string(),
            Some(caps[3].to_string()),
            path,
        )
    } else if let Some(caps) = GITHUB_REPO_URL_RE.captures(input) {
        (caps[1].to_string(), caps[2].to_string(), None, None)
    } else if is_github_url(input) || input.contains("://") {
        return Err(invalid(
            "expected https://github.com/<owner>/<repo>[/tree/<ref>/<path>]",
        ));
    } else {
        let parts: Vec<&str> = input.split('/').collect();
        if parts.len() < 2 {
            return Err(invalid("expected <owner>/<repo>[/<ref>]"));
        }
        let git_ref = parts[2..].join("/");
        (
            parts[0].to_string(),
            parts[1].trim_end_matches(".git").to_string(),
            Some(git_ref).filter(|r| !r.is_empty()),
            None,
        )
    };

    for (label, value) in [("owner", &owner), ("repository name", &name)] {
        if value.is_empty() || value == "." || value == ".." || !NAME_RE.is_match(value) {
            return Err(invalid(&format!("'{}' is not a valid {}", value, label)));
        }
    }

    Ok(RepoSpec {
        owner,
        name,
        git_ref,
        path,
    })
}
