// src/fetch/report.rs
//! The aggregate result of a download run.

use crate::core_types::{DownloadItem, DownloadOutcome, ItemKind, RejectedEntry};
use crate::errors::{Error, FailedItem, Result};
use std::path::PathBuf;

/// Terminal outcomes of every queued item, computed after all items finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// The directory the queue was materialized into.
    pub target_dir: PathBuf,
    /// Items that reached the disk, in queue order.
    pub succeeded: Vec<DownloadItem>,
    /// Items that did not, including entries refused while building the queue.
    pub failed: Vec<FailedItem>,
}

impl DownloadReport {
    /// Aggregates per-item outcomes and refused entries.
    pub fn from_outcomes<'a>(
        target_dir: PathBuf,
        outcomes: impl IntoIterator<Item = (&'a DownloadItem, DownloadOutcome)>,
        rejected: &[RejectedEntry],
    ) -> Self {
        let mut report = Self {
            target_dir,
            ..Default::default()
        };
        report.failed.extend(rejected.iter().map(|entry| FailedItem {
            remote_path: entry.remote_path.clone(),
            reason: format!("refused: {}", entry.reason),
        }));
        for (item, outcome) in outcomes {
            match outcome {
                DownloadOutcome::Success => report.succeeded.push(item.clone()),
                DownloadOutcome::Failed(reason) => report.failed.push(FailedItem {
                    remote_path: item.remote_path.clone(),
                    reason,
                }),
            }
        }
        report
    }

    /// Total number of items accounted for.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Number of files written (directory markers excluded).
    pub fn files_written(&self) -> usize {
        self.succeeded
            .iter()
            .filter(|item| item.kind == ItemKind::File)
            .count()
    }

    /// Returns `true` if and only if every item succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Converts the report into the overall result.
    ///
    /// # Errors
    /// [`Error::PartialFailure`] naming every failed item when any item failed.
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            let total = self.total();
            Err(Error::PartialFailure {
                failed: self.failed,
                total,
            })
        }
    }
}
