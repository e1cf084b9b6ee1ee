// src/fetch/mod.rs
//! Runs a [`DownloadQueue`] on a bounded worker pool.
//!
//! Every item is processed independently: directory markers are created,
//! files are fetched with a bounded number of attempts and written atomically.
//! A failing item never cancels its siblings. The run returns only after every
//! item reached a terminal state, and the [`DownloadReport`] is computed from
//! all outcomes at once.

pub mod materialize;
mod report;

pub use materialize::{ensure_dir, write_atomic, PARTIAL_FILE_PREFIX, PARTIAL_FILE_SUFFIX};
pub use report::DownloadReport;

use crate::cancellation::CancellationToken;
use crate::constants::{DEFAULT_RETRIES, DEFAULT_RETRY_DELAY, DEFAULT_WORKERS};
use crate::core_types::{DownloadItem, DownloadOutcome, DownloadQueue, ItemKind};
use crate::github::Transport;
use crate::progress::ProgressReporter;
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Tuning of the fetch stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Number of worker threads (at least 1).
    pub workers: usize,
    /// Attempts per file, including the first one (at least 1).
    pub retries: u32,
    /// Pause between two attempts of the same file.
    pub retry_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            retries: DEFAULT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Downloads queued items concurrently.
pub struct FetchExecutor<'a> {
    transport: &'a dyn Transport,
    options: FetchOptions,
    token: &'a CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
}

impl<'a> FetchExecutor<'a> {
    /// Creates an executor. `token` is checked before every item and every attempt.
    pub fn new(
        transport: &'a dyn Transport,
        options: FetchOptions,
        token: &'a CancellationToken,
    ) -> Self {
        Self {
            transport,
            options,
            token,
            progress: None,
        }
    }

    /// Reports per-item progress to `progress`.
    pub fn with_progress(mut self, progress: Option<Arc<dyn ProgressReporter>>) -> Self {
        self.progress = progress;
        self
    }

    /// Processes every item of `queue` and aggregates the outcomes.
    ///
    /// At most `workers` items are in flight at any time. The returned report
    /// lists every failed item (and every entry refused while building the
    /// queue); use [`DownloadReport::into_result`] for the overall verdict.
    pub fn run(&self, queue: &DownloadQueue) -> DownloadReport {
        let workers = self.options.workers.max(1);
        log::info!(
            "Downloading {} file(s) into '{}' with {} worker(s)...",
            queue.file_count(),
            queue.target_dir.display(),
            workers
        );

        if let Some(p) = &self.progress {
            p.set_length(queue.len() as u64);
            p.set_message("Downloading...".to_string());
        }
        let completed = AtomicU64::new(0);

        let work = || {
            queue
                .items
                .par_iter()
                .map(|item| {
                    let outcome = self.process(item, &queue.local_path(item));
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(p) = &self.progress {
                        p.set_position(done);
                    }
                    (item, outcome)
                })
                .collect::<Vec<_>>()
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("ghparts-fetch-{}", i))
            .build();
        let outcomes = match pool {
            Ok(pool) => pool.install(work),
            Err(e) => {
                log::warn!("Could not start a dedicated worker pool ({}); using the global pool.", e);
                work()
            }
        };

        let report = DownloadReport::from_outcomes(queue.target_dir.clone(), outcomes, &queue.rejected);
        if let Some(p) = &self.progress {
            p.finish_with_message(format!(
                "{} of {} item(s) done, {} failed",
                report.succeeded.len(),
                report.total(),
                report.failed.len()
            ));
        }
        report
    }

    fn process(&self, item: &DownloadItem, local_path: &Path) -> DownloadOutcome {
        if self.token.is_cancelled() {
            return DownloadOutcome::Failed("cancelled".to_string());
        }
        match item.kind {
            ItemKind::DirectoryMarker => match ensure_dir(local_path) {
                Ok(()) => DownloadOutcome::Success,
                Err(e) => DownloadOutcome::Failed(e.to_string()),
            },
            ItemKind::File => self.fetch_file(item, local_path),
        }
    }

    fn fetch_file(&self, item: &DownloadItem, local_path: &Path) -> DownloadOutcome {
        if let Some(parent) = local_path.parent() {
            if let Err(e) = ensure_dir(parent) {
                log::error!("Cannot create the directory for '{}': {}", item.remote_path, e);
                return DownloadOutcome::Failed(e.to_string());
            }
        }

        let attempts = self.options.retries.max(1);
        let mut last_error = String::new();
        for attempt in 1..=attempts {
            if self.token.is_cancelled() {
                return DownloadOutcome::Failed("cancelled".to_string());
            }
            if attempt > 1 && !self.options.retry_delay.is_zero() {
                thread::sleep(self.options.retry_delay);
            }

            log::debug!("Downloading '{}' (attempt {}/{})", item.remote_path, attempt, attempts);
            match self.transport.get(&item.download_url) {
                Ok(response) if response.is_success() => {
                    return match write_atomic(local_path, &response.body) {
                        Ok(()) => {
                            log::debug!("Wrote '{}'", local_path.display());
                            DownloadOutcome::Success
                        }
                        Err(e) => {
                            log::error!("Cannot write '{}': {}", item.remote_path, e);
                            DownloadOutcome::Failed(e.to_string())
                        }
                    };
                }
                Ok(response) => last_error = format!("HTTP status {}", response.status),
                Err(e) if !e.is_transient() => {
                    log::error!("Cannot download '{}': {}", item.remote_path, e);
                    return DownloadOutcome::Failed(e.to_string());
                }
                Err(e) => last_error = e.to_string(),
            }
            log::warn!(
                "Attempt {}/{} for '{}' failed: {}",
                attempt,
                attempts,
                item.remote_path,
                last_error
            );
        }

        log::error!("Giving up on '{}' after {} attempt(s).", item.remote_path, attempts);
        DownloadOutcome::Failed(format!("{} (after {} attempt(s))", last_error, attempts))
    }
}
