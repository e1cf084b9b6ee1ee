//! Defines the `Config` struct consumed by the download pipeline.
//!
//! A `Config` is produced once by [`ConfigBuilder::build`], which resolves every
//! default and validates every value. The pipeline receives it explicitly; there
//! is no process-wide configuration state.

use crate::core_types::{Layout, RepoCoordinate};
use crate::fetch::FetchOptions;
use crate::github::Endpoints;
use std::path::PathBuf;
use std::time::Duration;

pub use builder::ConfigBuilder;
mod builder;
mod builder_logic;

/// Fully resolved settings of one download run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Repository, owner and ref to download from.
    pub coordinate: RepoCoordinate,
    /// Path within the repository; empty for the whole repository.
    pub path: String,
    /// Local directory the download is materialized into.
    pub target_dir: PathBuf,
    /// How a requested directory maps onto `target_dir`.
    pub layout: Layout,
    /// API and raw-content hosts.
    pub endpoints: Endpoints,
    /// Number of concurrent download workers.
    pub workers: usize,
    /// Attempts per file, including the first one.
    pub retries: u32,
    /// Pause between two attempts of the same file.
    pub retry_delay: Duration,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// If `true`, only plan the download and print it.
    pub dry_run: bool,
}

impl Config {
    /// The options of the fetch stage.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            workers: self.workers,
            retries: self.retries,
            retry_delay: self.retry_delay,
        }
    }

    /// Creates a `Config` for `acme/sample@main` with test-friendly defaults.
    ///
    /// Hidden from the public documentation; used by tests and doc tests.
    #[doc(hidden)]
    pub fn new_for_test() -> Self {
        Self {
            coordinate: RepoCoordinate::new("acme", "sample", Some("main")),
            path: String::new(),
            target_dir: PathBuf::from("."),
            layout: Layout::Contents,
            endpoints: Endpoints::default(),
            workers: 2,
            retries: 1,
            retry_delay: Duration::ZERO,
            timeout: None,
            dry_run: false,
        }
    }
}
