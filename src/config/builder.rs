// src/config/builder.rs

use super::{builder_logic, Config};
use crate::cli::Cli;
use crate::constants::{
    DEFAULT_RETRIES, DEFAULT_RETRY_DELAY, DEFAULT_TARGET_DIR, DEFAULT_TIMEOUT_SECS,
    DEFAULT_WORKERS,
};
use crate::core_types::Layout;
use crate::errors::Result;
use crate::github::Endpoints;
use std::path::PathBuf;
use std::time::Duration;

/// A builder for creating a [`Config`] programmatically.
///
/// Every setter is optional except the repository, given either with
/// [`repo`](Self::repo) or with both [`username`](Self::username) and
/// [`repository`](Self::repository). Defaults are resolved in
/// [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use ghparts::ConfigBuilder;
/// use ghparts::core_types::Layout;
///
/// let config = ConfigBuilder::new()
///     .repo("acme/sample/v1.0")
///     .path("docs")
///     .target_dir("out")
///     .layout(Layout::Nested)
///     .workers(4)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.coordinate.to_string(), "acme/sample@v1.0");
/// assert_eq!(config.path, "docs");
/// assert_eq!(config.workers, 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    pub(super) repo: Option<String>,
    pub(super) username: Option<String>,
    pub(super) repository: Option<String>,
    pub(super) git_ref: Option<String>,
    pub(super) path: Option<String>,
    pub(super) target_dir: Option<PathBuf>,
    pub(super) layout: Option<Layout>,
    pub(super) endpoints: Option<Endpoints>,
    pub(super) api_url: Option<String>,
    pub(super) raw_url: Option<String>,
    pub(super) workers: Option<usize>,
    pub(super) retries: Option<u32>,
    pub(super) retry_delay: Option<Duration>,
    pub(super) timeout: Option<Duration>,
    pub(super) dry_run: Option<bool>,
}

impl ConfigBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from parsed command-line arguments.
    ///
    /// Unlike the library defaults, the command line applies a request timeout of
    /// [`DEFAULT_TIMEOUT_SECS`] unless `--timeout` says otherwise (`0` disables it).
    pub fn from_cli(cli: Cli) -> Self {
        let timeout_secs = cli.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            repo: Some(cli.repo),
            path: cli.path,
            git_ref: cli.git_ref,
            target_dir: cli.target_dir.map(PathBuf::from),
            layout: Some(if cli.nested {
                Layout::Nested
            } else {
                Layout::Contents
            }),
            api_url: cli.api_url,
            raw_url: cli.raw_url,
            workers: cli.workers,
            retries: cli.retries,
            retry_delay: cli.retry_delay.map(Duration::from_millis),
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            dry_run: Some(cli.dry_run),
            ..Self::default()
        }
    }

    /// Sets the repository as `owner/repo[/ref]` or a GitHub URL.
    ///
    /// Takes precedence over [`username`](Self::username) and
    /// [`repository`](Self::repository).
    pub fn repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Sets the repository owner. Used together with [`repository`](Self::repository).
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Alias of [`username`](Self::username).
    pub fn user(self, user: impl Into<String>) -> Self {
        self.username(user)
    }

    /// Alias of [`username`](Self::username).
    pub fn owner(self, owner: impl Into<String>) -> Self {
        self.username(owner)
    }

    /// Sets the repository name. Used together with [`username`](Self::username).
    pub fn repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// Alias of [`repository`](Self::repository).
    pub fn name(self, name: impl Into<String>) -> Self {
        self.repository(name)
    }

    /// Sets the branch, tag or commit. Overrides a ref given in [`repo`](Self::repo).
    pub fn git_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }

    /// Sets the path within the repository. Empty means the whole repository.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the local target directory (default: the current directory).
    pub fn target_dir(mut self, target_dir: impl Into<PathBuf>) -> Self {
        self.target_dir = Some(target_dir.into());
        self
    }

    /// Sets how a requested directory maps onto the target directory.
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Sets both hosts at once. Individual URLs set with
    /// [`api_url`](Self::api_url) or [`raw_url`](Self::raw_url) still win.
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Sets the base URL of the REST API.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Sets the base URL of the raw content host.
    pub fn raw_url(mut self, url: impl Into<String>) -> Self {
        self.raw_url = Some(url.into());
        self
    }

    /// Sets the number of concurrent download workers.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sets the number of attempts per file, including the first one.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Sets the pause between two attempts of the same file.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enables or disables dry-run mode.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = Some(dry_run);
        self
    }

    /// Validates the options and builds the [`Config`].
    ///
    /// # Errors
    /// [`crate::Error::Config`] when no repository is given, the repository cannot
    /// be parsed, or a value is out of range.
    pub fn build(self) -> Result<Config> {
        builder_logic::validate_builder_options(&self)?;

        let (coordinate, path) = builder_logic::resolve_repository(
            self.repo.as_deref(),
            self.username.as_deref(),
            self.repository.as_deref(),
            self.git_ref.as_deref(),
            self.path.as_deref(),
        )?;
        let endpoints = builder_logic::determine_endpoints(
            self.endpoints,
            self.api_url.as_deref(),
            self.raw_url.as_deref(),
        )?;

        Ok(Config {
            coordinate,
            path,
            target_dir: self
                .target_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET_DIR)),
            layout: self.layout.unwrap_or_default(),
            endpoints,
            workers: self.workers.unwrap_or(DEFAULT_WORKERS),
            retries: self.retries.unwrap_or(DEFAULT_RETRIES),
            retry_delay: self.retry_delay.unwrap_or(DEFAULT_RETRY_DELAY),
            timeout: self.timeout,
            dry_run: self.dry_run.unwrap_or(false),
        })
    }
}
