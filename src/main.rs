// dcon - Decision intelligence console for the plant floor
//
// A terminal console over a fixed catalog of manufacturing decision streams.
// Operators watch the realtime decision feed, inspect a decision's trend and
// trace chain, question the Copilot about it, and browse the agents that
// take part in each stream.
//
// Architecture:
// - Catalog / detail: static registries of streams, agents and curated detail
// - Console: ties view state, the open decision session and replies together
// - Conversation: per-decision chat log, replies arrive after a delay
// - TUI (ratatui): renders the views and dispatches keys
// - Event system: an mpsc channel carries delayed replies into the event loop

mod catalog;
mod cli;
mod config;
mod console;
mod conversation;
mod detail;
mod editor;
mod events;
mod logging;
mod monitor;
mod theme;
mod trace;
mod tui;
mod util;
mod view;

use anyhow::{Context, Result};
use catalog::StreamCatalog;
use config::{Config, LogRotation};
use console::Console;
use conversation::ReplyScheduler;
use detail::{DetailTable, StreamDetailResolver};
use events::EVENT_CHANNEL_CAPACITY;
use logging::{LogBuffer, TuiLogLayer};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Subcommands run without the TUI and exit
    if cli::handle_cli()? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::load()?;

    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config, &log_buffer);

    tracing::info!(
        "Starting dcon v{} (theme: {}, reply delay: {}ms)",
        config::VERSION,
        config.theme,
        config.copilot.reply_delay_ms
    );

    let table = DetailTable::builtin().context("Built-in decision detail table is invalid")?;
    let resolver = StreamDetailResolver::new(table);
    let catalog = StreamCatalog::builtin();
    tracing::debug!(
        "Loaded {} streams, {} agents, {} curated details",
        catalog.streams().len(),
        catalog.agents().len(),
        resolver.table().ids().len()
    );

    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let replies = ReplyScheduler::new(event_tx, config.copilot.reply_delay());

    let console = Console::new(
        catalog,
        resolver,
        replies,
        config.copilot.reply_text.clone(),
        config.start_screen.into(),
    );
    let app = App::new(console, log_buffer, &config);

    tui::run_tui(app, event_rx, &config).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Initialize tracing
///
/// Logs go to the in-memory buffer the TUI log panel reads, never to stdout.
/// File logging optionally adds a JSON layer on a rolling file.
///
/// Precedence: RUST_LOG env var > config file > default "info"
///
/// The returned guard must be kept alive for the file writer to flush.
fn init_tracing(config: &Config, log_buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("dcon={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let logging = &config.logging;
    let (file_layer, guard) = if logging.file_enabled {
        if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
            eprintln!(
                "Warning: Could not create log directory {:?}: {}",
                logging.file_dir, e
            );
            (None, None)
        } else {
            let file_appender = match logging.file_rotation {
                LogRotation::Hourly => {
                    tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
                }
                LogRotation::Daily => {
                    tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
                }
                LogRotation::Never => {
                    tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
                }
            };

            // Writes happen on a background thread
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(TuiLogLayer::new(log_buffer.clone()))
        .with(file_layer)
        .init();

    guard
}
