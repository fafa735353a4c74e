// dugout - Terminal explorer for batted-ball data
//
// Fetches batted-ball events and summary statistics from a REST backend
// and renders them as a filterable scatter chart with a per-record detail
// view.
//
// Architecture:
// - Fetcher (tokio task): issues HTTP requests, tagged with sequence
//   numbers so superseded completions can be discarded
// - App state: filter criteria, result set, summary, selection
// - TUI (ratatui): filter form, summary card, scatter chart, detail modal
// - mpsc channels connect the TUI event loop and the fetcher

mod cli;
mod client;
mod config;
mod data;
mod demo;
mod fetch;
mod filters;
mod logging;
mod tui;

use anyhow::Result;
use clap::Parser;
use client::ApiClient;
use config::{Config, LogRotation};
use fetch::FetchSource;
use logging::{LogBuffer, TuiLogLayer};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle subcommands first (config --show, --path, --reset)
    let args = cli::Cli::parse();
    if cli::handle_command(&args) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Load configuration, then apply command-line overrides
    let mut config = Config::from_env();
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }
    if args.demo {
        config.demo_mode = true;
    }

    // Logs are captured to an in-memory buffer (the TUI owns the screen)
    // and optionally to rotating JSON files.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let log_buffer = LogBuffer::new();
    let default_filter = format!("dugout={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must stay alive for the duration of the program so file
    // logs flush on exit
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            match std::fs::create_dir_all(&config.logging.file_dir) {
                Ok(()) => {
                    let file_appender = match config.logging.file_rotation {
                        LogRotation::Hourly => tracing_appender::rolling::hourly(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                        LogRotation::Daily => tracing_appender::rolling::daily(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                        LogRotation::Never => tracing_appender::rolling::never(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                    };
                    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .with(
                            tracing_subscriber::fmt::layer()
                                .json()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();
                    Some(guard)
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Could not create log directory {:?}: {}",
                        config.logging.file_dir, e
                    );
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .init();
                    None
                }
            }
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer.clone()))
                .init();
            None
        };

    // Pick the fetch source: real backend or the built-in mock dataset
    let (source, source_label) = if config.demo_mode {
        tracing::info!("Running in demo mode with the built-in dataset");
        (FetchSource::Demo, "demo".to_string())
    } else {
        let client = ApiClient::new(&config.api_url)?;
        let label = client.base_url().to_string();
        tracing::info!("Using backend at {label}");
        (FetchSource::Api(client), label)
    };

    // Channels between the TUI event loop and the fetcher.
    // Commands are few; completions are one per command.
    let (command_tx, command_rx) = mpsc::channel(64);
    let (event_tx, event_rx) = mpsc::channel(64);

    // Spawn the fetcher; it stops when the command channel closes
    let fetcher_handle = tokio::spawn(fetch::run_fetcher(source, command_rx, event_tx));

    // Run the TUI in the main task; blocks until the user quits
    let app = tui::app::App::new(log_buffer, source_label);
    let result = tui::run_tui(app, command_tx, event_rx).await;

    // Dropping the TUI's command sender shut the fetcher down
    let _ = fetcher_handle.await;

    tracing::info!("Shutdown complete");
    result
}
