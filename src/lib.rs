//! `ghparts` is a library and command-line tool for downloading a single file or
//! directory from a GitHub repository without cloning it.
//!
//! As a library, it provides a small pipeline whose stages can also be used on
//! their own:
//! 1.  **Resolve**: decide whether the requested path is a file or a directory
//!     ([`resolver::PathResolver`]).
//! 2.  **List**: expand a directory into every entry below it with one
//!     recursive request ([`listing::TreeLister`]).
//! 3.  **Queue**: map entries onto safe local paths and raw-content URLs
//!     ([`queue::QueueBuilder`]).
//! 4.  **Fetch**: download the queue on a bounded worker pool with per-file
//!     retries and atomic writes ([`fetch::FetchExecutor`]).
//!
//! All network access goes through the [`Transport`] trait. The default,
//! [`HttpTransport`], is a blocking `reqwest` client; tests plug in their own.
//!
//! # Example: Library Usage
//!
//! ```
//! use ghparts::errors::Result;
//! use ghparts::github::{HttpResponse, Transport};
//! use ghparts::{download_with, CancellationToken, ConfigBuilder};
//! use tempfile::tempdir;
//!
//! // A stand-in for GitHub that knows one file.
//! #[derive(Debug)]
//! struct OneFile;
//!
//! impl Transport for OneFile {
//!     fn get(&self, url: &str) -> Result<HttpResponse> {
//!         Ok(match url {
//!             "https://api.github.com/repos/acme/sample/contents?ref=main" => HttpResponse::new(
//!                 200,
//!                 r#"[{"path": "README.md", "type": "file", "sha": "r1"}]"#,
//!             ),
//!             "https://raw.githubusercontent.com/acme/sample/main/README.md" => {
//!                 HttpResponse::new(200, "# Sample")
//!             }
//!             _ => HttpResponse::new(404, "{}"),
//!         })
//!     }
//! }
//!
//! let target = tempdir().unwrap();
//! let config = ConfigBuilder::new()
//!     .repo("acme/sample/main")
//!     .path("README.md")
//!     .target_dir(target.path())
//!     .build()
//!     .unwrap();
//!
//! let report = download_with(&OneFile, &config, &CancellationToken::new(), None).unwrap();
//!
//! assert!(report.is_success());
//! assert_eq!(
//!     std::fs::read_to_string(target.path().join("README.md")).unwrap(),
//!     "# Sample"
//! );
//! ```

// Make modules public if they contain public types used in the API
pub mod cancellation;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core_types;
pub mod errors;
pub mod fetch;
pub mod github;
pub mod listing;
pub mod prelude;
pub mod progress;
pub mod queue;
pub mod resolver;
pub mod signal;

#[cfg(test)]
mod test_support;

// Re-export key public types for easier use as a library
pub use cancellation::CancellationToken;
pub use config::{Config, ConfigBuilder};
pub use core_types::{DownloadQueue, Layout, RepoCoordinate};
pub use errors::{Error, Result};
pub use fetch::{DownloadReport, FetchExecutor, FetchOptions};
pub use github::{HttpTransport, Transport};

use crate::core_types::ResolvedTarget;
use crate::listing::TreeLister;
use crate::progress::ProgressReporter;
use crate::queue::QueueBuilder;
use crate::resolver::{normalize_repo_path, PathResolver};
use std::io::{self, Write};
use std::sync::Arc;

/// Resolves the configured path and builds the download queue, without
/// downloading anything.
///
/// A file costs one Contents request. A directory costs one Contents request
/// and one recursive Trees request. The whole repository (empty path) costs one
/// branch lookup and one recursive Trees request.
///
/// # Errors
/// Propagates resolver and listing failures ([`Error::NotFound`],
/// [`Error::UpstreamError`], [`Error::MalformedResponse`], ...), and
/// [`Error::Interrupted`] if `token` is cancelled between requests.
pub fn plan(
    transport: &dyn Transport,
    config: &Config,
    token: &CancellationToken,
) -> Result<DownloadQueue> {
    let resolver = PathResolver::new(transport, &config.endpoints);
    let lister = TreeLister::new(transport, &config.endpoints);
    let builder = QueueBuilder::new(&config.coordinate, &config.endpoints).layout(config.layout);
    let requested = normalize_repo_path(&config.path)?;

    if requested.is_empty() {
        log::info!("Listing the whole of {}...", config.coordinate);
        let root = resolver.resolve_root(&config.coordinate)?;
        token.check()?;
        let entries = lister.list_recursive(&config.coordinate, &root)?;
        return Ok(builder.build(&entries, "", &config.target_dir));
    }

    log::info!("Resolving '{}' in {}...", requested, config.coordinate);
    match resolver.resolve(&config.coordinate, &requested)? {
        ResolvedTarget::SingleFile {
            download_url,
            local_destination,
        } => Ok(builder.single_file(&requested, download_url, local_destination, &config.target_dir)),
        ResolvedTarget::Subtree { identifier } => {
            token.check()?;
            let entries = lister.list_recursive(&config.coordinate, &identifier)?;
            Ok(builder.build(&entries, &requested, &config.target_dir))
        }
    }
}

/// Executes the complete pipeline with a caller-provided [`Transport`].
///
/// Per-item failures do not make this function fail: they are listed in the
/// returned [`DownloadReport`], and [`DownloadReport::into_result`] turns them
/// into [`Error::PartialFailure`].
///
/// # Errors
/// Resolver and listing failures, and [`Error::Interrupted`] when `token` was
/// cancelled (files already written stay on disk).
pub fn download_with(
    transport: &dyn Transport,
    config: &Config,
    token: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<DownloadReport> {
    let queue = plan(transport, config, token)?;
    token.check()?;

    let report = FetchExecutor::new(transport, config.fetch_options(), token)
        .with_progress(progress)
        .run(&queue);

    token.check()?;
    log::info!(
        "Downloaded {} file(s) into '{}'; {} item(s) failed.",
        report.files_written(),
        report.target_dir.display(),
        report.failed.len()
    );
    Ok(report)
}

/// Executes the complete pipeline over HTTPS.
///
/// This is the primary entry point for programmatic use. It mirrors the
/// command line: build a [`Config`] with [`ConfigBuilder`], then call this.
///
/// # Errors
/// As [`download_with`], plus [`Error::Transport`] if the HTTP client cannot be
/// created.
pub fn download(
    config: &Config,
    token: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<DownloadReport> {
    let transport = HttpTransport::new(config.timeout)?;
    download_with(&transport, config, token, progress)
}

/// Writes the output of a dry run: every queued item and every refused entry.
pub fn write_plan(queue: &DownloadQueue, writer: &mut dyn Write) -> io::Result<()> {
    log::debug!("Executing dry run output...");
    writeln!(
        writer,
        "\n--- Dry Run: {} item(s) would be written to '{}' ---",
        queue.len(),
        queue.target_dir.display()
    )?;
    for item in &queue.items {
        let local = item.local_relative_path.display();
        match item.kind {
            core_types::ItemKind::File => writeln!(writer, "- {} -> {}", item.remote_path, local)?,
            core_types::ItemKind::DirectoryMarker => writeln!(writer, "- {}/", local)?,
        }
    }
    for rejected in &queue.rejected {
        writeln!(writer, "! {} (refused: {})", rejected.remote_path, rejected.reason)?;
    }
    writeln!(writer, "--- End Dry Run ---")?;
    writer.flush()
}
