// src/progress.rs

//! Progress reporting for the fetch stage.
#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// Receives progress updates, abstracting over specific implementations like `indicatif`.
///
/// The fetch stage calls it from several worker threads at once.
///
/// # Examples
///
/// ```
/// use ghparts::progress::ProgressReporter;
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// // Remembers only the position.
/// struct Counter(AtomicU64);
///
/// impl ProgressReporter for Counter {
///     fn set_length(&self, _len: u64) {}
///     fn set_position(&self, pos: u64) {
///         self.0.store(pos, Ordering::Relaxed);
///     }
///     fn set_message(&self, _msg: String) {}
///     fn finish(&self) {}
///     fn finish_with_message(&self, _msg: String) {}
/// }
///
/// let counter = Counter(AtomicU64::new(0));
/// counter.set_position(7);
/// assert_eq!(counter.0.load(Ordering::Relaxed), 7);
/// ```
pub trait ProgressReporter: Send + Sync {
    /// Sets the total number of queued items.
    fn set_length(&self, len: u64);
    /// Sets the number of items that reached a terminal state.
    fn set_position(&self, pos: u64);
    /// Sets a descriptive message (e.g., "Downloading...").
    fn set_message(&self, msg: String);
    /// Finishes reporting.
    fn finish(&self);
    /// Finishes reporting with a final message.
    fn finish_with_message(&self, msg: String);
}

/// A `ProgressReporter` that does nothing.
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    fn set_length(&self, _len: u64) {}
    fn set_position(&self, _pos: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self) {}
    fn finish_with_message(&self, _msg: String) {}
}

/// A progress bar on stderr using the `indicatif` crate.
#[cfg(feature = "progress")]
#[derive(Clone)]
pub struct IndicatifProgress {
    bar: ProgressBar,
}

#[cfg(feature = "progress")]
impl IndicatifProgress {
    /// Creates a bar with the default download style.
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        match ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            Ok(style) => bar.set_style(style.progress_chars("#>-")),
            Err(e) => log::debug!("Invalid progress template, keeping the default style: {}", e),
        }
        Self { bar }
    }
}

#[cfg(feature = "progress")]
impl Default for IndicatifProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "progress")]
impl ProgressReporter for IndicatifProgress {
    fn set_length(&self, len: u64) {
        self.bar.set_length(len);
    }

    fn set_position(&self, pos: u64) {
        self.bar.set_position(pos);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish(&self) {
        self.bar.finish();
    }

    fn finish_with_message(&self, msg: String) {
        self.bar.finish_with_message(msg);
    }
}
