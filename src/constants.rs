// src/constants.rs

use std::time::Duration;

/// Number of concurrent download workers when none is configured.
pub const DEFAULT_WORKERS: usize = 6;

/// Upper bound accepted for the worker count.
pub const MAX_WORKERS: usize = 64;

/// Attempts per file, including the first one.
pub const DEFAULT_RETRIES: u32 = 3;

/// Pause between two attempts of the same file.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(250);

/// Per-request timeout used by the command line.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Target directory used when none is given.
pub const DEFAULT_TARGET_DIR: &str = ".";
