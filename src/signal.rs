// src/signal.rs

//! Ctrl+C handling for graceful shutdown.

use crate::cancellation::CancellationToken;
use anyhow::{Context, Result};

/// Registers a Ctrl+C (SIGINT/SIGTERM) handler that cancels the returned token.
///
/// Files already written stay on disk; items not yet started are reported as
/// cancelled and the run ends with [`crate::Error::Interrupted`].
///
/// # Errors
/// Returns an error if the handler cannot be installed (for instance when one
/// is already registered in this process).
pub fn setup_signal_handler() -> Result<CancellationToken> {
    let token = CancellationToken::new();
    let handle = token.clone();

    ctrlc::set_handler(move || {
        log::info!("Ctrl+C signal received, finishing in-flight downloads and stopping.");
        handle.cancel();
    })
    .context("Failed to set Ctrl+C signal handler")?;

    Ok(token)
}
