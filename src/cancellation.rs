//! A token-based mechanism for stopping a download run early.

use crate::errors::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Signals cancellation to the pipeline.
///
/// Cloneable and thread-safe; every clone observes the same state. The
/// resolver checks it between stages and the fetch workers check it before
/// each item and each attempt, so a cancelled run winds down without starting
/// new requests.
///
/// # Examples
///
/// ```
/// use ghparts::CancellationToken;
/// use std::thread;
///
/// let token = CancellationToken::new();
/// let remote = token.clone();
///
/// thread::spawn(move || remote.cancel()).join().unwrap();
///
/// assert!(token.is_cancelled());
/// assert!(token.check().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    inner: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token in the non-cancelled state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Signals cancellation to this token and all of its clones.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once `cancel()` was called on this token or any clone.
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }

    /// Returns [`Error::Interrupted`] if the token was cancelled.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Interrupted)
        } else {
            Ok(())
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
