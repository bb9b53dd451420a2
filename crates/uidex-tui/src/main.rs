//! `uidex-tui`: terminal browser for the UniFi hardware catalog.
//!
//! Built on [ratatui](https://ratatui.rs) with views recomputed by
//! `uidex-core`'s [`QueryWorker`](uidex_core::QueryWorker). The devices
//! screen lists or tiles the filtered catalog; Enter opens a device's
//! detail screen.
//!
//! Logs are written to a file (default `/tmp/uidex-tui.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod component;
mod event;
mod location;
mod query_bridge;
mod screen;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use uidex_core::{Catalog, QueryState, ViewMode};

use crate::app::App;
use crate::location::Location;

/// Browse the UniFi hardware catalog in the terminal.
#[derive(Parser, Debug)]
#[command(name = "uidex-tui", version, about)]
struct Cli {
    /// Device dataset (JSON) to load instead of the bundled catalog
    #[arg(short = 'd', long, env = "UIDEX_DATASET")]
    dataset: Option<PathBuf>,

    /// Initial layout: list or grid (defaults to the config file's
    /// `defaults.view`)
    #[arg(long)]
    view: Option<ViewMode>,

    /// Open directly on this device's detail screen
    #[arg(long)]
    device: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/uidex-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Logging to stdout/stderr would corrupt the
/// TUI. The returned guard must live as long as the app so logs flush.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("uidex_tui={log_level},uidex_core={log_level}"))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("uidex-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    // Priority: CLI flags > config file > bundled catalog
    let cfg = uidex_config::load_config()?;
    let dataset = cli.dataset.clone().or_else(|| cfg.dataset.clone());
    let catalog = Catalog::load(dataset.as_deref())?;
    let view = cli.view.unwrap_or(cfg.defaults.view);

    info!(
        devices = catalog.len(),
        dataset = ?dataset,
        %view,
        "starting uidex-tui"
    );

    let location = Location::start(view)?;
    let mut app = App::new(
        catalog,
        cfg.to_catalog_config(),
        QueryState::new().with_view(view),
        location,
    );
    if let Some(id) = cli.device.as_deref() {
        app.open_detail(id);
    }
    app.run().await?;

    Ok(())
}
