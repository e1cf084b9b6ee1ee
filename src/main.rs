// src/main.rs

use anyhow::Result;
use clap::Parser;
use ghparts::cli::Cli;
use ghparts::config::ConfigBuilder;
use ghparts::errors::Error;
#[cfg(feature = "progress")]
use ghparts::progress::IndicatifProgress;
use ghparts::progress::ProgressReporter;
use ghparts::signal::setup_signal_handler;
use ghparts::{download, plan, write_plan, CancellationToken, HttpTransport};
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize logging. Default to 'info' if RUST_LOG is not set.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                if cfg!(debug_assertions) {
                    "ghparts=debug".parse()?
                } else {
                    "ghparts=info".parse()?
                },
            ),
        )
        .init();

    log::info!("Starting ghparts v{}...", env!("CARGO_PKG_VERSION"));
    log::debug!("Raw arguments: {:?}", std::env::args().collect::<Vec<_>>());

    // --- Setup ---
    let cli = Cli::parse();

    // Show a progress bar only if stderr is a TTY.
    let progress_reporter: Option<Arc<dyn ProgressReporter>> = {
        #[cfg(feature = "progress")]
        {
            if atty::is(atty::Stream::Stderr) {
                Some(Arc::new(IndicatifProgress::new()))
            } else {
                None
            }
        }
        #[cfg(not(feature = "progress"))]
        {
            None
        }
    };

    // --- Configuration & Execution ---
    let config = match ConfigBuilder::from_cli(cli).build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    log::debug!("Configuration built successfully: {:?}", config);

    let token = setup_signal_handler()?;

    let result = if config.dry_run {
        run_dry(&config, &token)
    } else {
        download(&config, &token, progress_reporter)
            .and_then(|report| report.into_result())
            .map(|report| {
                println!(
                    "Downloaded {} file(s) into '{}'.",
                    report.files_written(),
                    report.target_dir.display()
                );
            })
    };

    // --- Error Handling ---
    match result {
        Ok(()) => Ok(()),
        Err(Error::Interrupted) => {
            eprintln!("\nOperation cancelled.");
            std::process::exit(130);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_dry(config: &ghparts::Config, token: &CancellationToken) -> ghparts::Result<()> {
    let transport = HttpTransport::new(config.timeout)?;
    let queue = plan(&transport, config, token)?;
    let stdout = std::io::stdout();
    write_plan(&queue, &mut stdout.lock())
        .map_err(|e| ghparts::errors::io_error_with_path(e, "<stdout>"))
}
