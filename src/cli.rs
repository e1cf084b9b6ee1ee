// src/cli.rs

use clap::Parser;

/// Download a single file or directory from a GitHub repository without cloning it.
///
/// ghparts resolves the requested path through the GitHub REST API, lists the
/// directory recursively with one request, and downloads every file from the raw
/// content host on a bounded pool of workers. Files are written atomically, and
/// a failing file never stops the others: the run reports every path that could
/// not be retrieved.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Repository as 'owner/repo[/ref]' or a GitHub URL. A '/tree/<ref>/<path>'
    /// or '/blob/<ref>/<path>' URL also supplies the ref and the path.
    #[arg(value_name = "REPO")]
    pub repo: String,

    /// Path of the file or directory within the repository (default: the whole repository).
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    // --- Destination ---
    /// Directory to write into. Created if missing; existing files are overwritten.
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub target_dir: Option<String>,

    /// Recreate the requested directory itself inside DIR instead of only its contents.
    #[arg(short = 'n', long, action = clap::ArgAction::SetTrue)]
    pub nested: bool,

    // --- Git Options ---
    /// Branch, tag or commit to download from. Overrides a ref given in REPO.
    #[arg(short = 'r', long = "ref", alias = "branch", value_name = "REF")]
    pub git_ref: Option<String>,

    // --- Network Options ---
    /// Number of concurrent downloads (1-64).
    #[arg(short = 'w', long, value_name = "N")]
    pub workers: Option<usize>,

    /// Attempts per file before giving up, including the first one.
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Pause between two attempts of the same file, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub retry_delay: Option<u64>,

    /// Per-request timeout in seconds (0 disables it).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Base URL of the GitHub REST API (e.g. for GitHub Enterprise).
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Base URL of the raw content host.
    #[arg(long, value_name = "URL")]
    pub raw_url: Option<String>,

    // --- Execution Control ---
    /// Perform a dry run. Print the files that would be downloaded but do not fetch them.
    #[arg(short = 'D', long, action = clap::ArgAction::SetTrue)]
    pub dry_run: bool,
}
