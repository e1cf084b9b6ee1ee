//! The `ghparts` prelude for convenient library usage.
//!
//! This module re-exports the most commonly used types, traits, and functions
//! from the `ghparts` library.
//!
//! # Example
//!
//! ```
//! use ghparts::prelude::*;
//! # fn main() -> Result<()> {
//!
//! // Now you can use ConfigBuilder, CancellationToken, etc. without full paths.
//! let config = ConfigBuilder::new().repo("acme/sample").path("docs").build()?;
//! let token = CancellationToken::new();
//! assert_eq!(config.coordinate.to_string(), "acme/sample@master");
//! assert!(!token.is_cancelled());
//!
//! # Ok(())
//! # }
//! ```

pub use crate::cancellation::CancellationToken;
pub use crate::config::{Config, ConfigBuilder};
pub use crate::core_types::{
    DownloadItem, DownloadQueue, EntryKind, ItemKind, Layout, RepoCoordinate, ResolvedTarget,
    TreeEntry,
};
pub use crate::errors::{ConfigError, Error, FailedItem, Result};
pub use crate::fetch::{DownloadReport, FetchExecutor, FetchOptions};
pub use crate::github::{
    is_github_url, parse_repo_spec, Endpoints, HttpResponse, HttpTransport, RepoSpec, Transport,
};
pub use crate::listing::TreeLister;
pub use crate::progress::{NoOpProgress, ProgressReporter};
pub use crate::queue::QueueBuilder;
pub use crate::resolver::PathResolver;
pub use crate::{download, download_with, plan, write_plan};
