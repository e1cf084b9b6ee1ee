// src/github/mod.rs
//! Talks to GitHub.
//!
//! This module provides:
//! - The [`Transport`] capability and its `reqwest` implementation.
//! - [`Endpoints`], which builds contents, trees, branch and raw-content URLs.
//! - Parsing of `owner/repo[/ref]` shorthand and GitHub URLs.

mod api;
mod endpoints;
mod repo_spec;
mod transport;

pub(crate) use api::{fetch_json, fetch_value, from_value, BranchInfo, ContentItem, TreeResponse};
pub use endpoints::{Endpoints, DEFAULT_API_BASE, DEFAULT_RAW_BASE};
pub use repo_spec::{is_github_url, parse_repo_spec, RepoSpec};
pub use transport::{HttpResponse, HttpTransport, Transport};
