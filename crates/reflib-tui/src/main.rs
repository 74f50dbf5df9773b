//! `reflib` is a terminal dashboard for a personal reference library.
//!
//! Built on [ratatui](https://ratatui.rs) over the in-memory state of
//! `reflib-core`. References can be searched, filtered by category and tag,
//! shown as a card grid or a list, favorited, and annotated in a detail
//! modal. Nothing is persisted; each run starts from the seed.
//!
//! Logs are written to a file (default `<temp dir>/reflib.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, config, tracing setup, panic hooks,
//! and app launch.

mod action;
mod app;
mod component;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use reflib_config::{Config, ConfigError};
use reflib_core::{Library, ViewMode, seed};

use crate::app::App;

/// Browse, filter and annotate image and video references.
#[derive(Parser, Debug)]
#[command(name = "reflib", version, about)]
struct Cli {
    /// JSON file of references to start from instead of the built-in set
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Initial listing layout (grid or list)
    #[arg(long)]
    view: Option<ViewMode>,

    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file path (defaults to <temp dir>/reflib.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr, that would
/// corrupt the TUI output. The returned guard flushes logs on drop.
fn setup_tracing(cli: &Cli, default_level: &str) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "reflib={log_level},reflib_core={log_level},reflib_config={log_level}"
        ))
    });

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("reflib.log"));
    let log_dir = log_file
        .parent()
        .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
    let log_filename = log_file
        .file_name()
        .map_or_else(|| "reflib.log".into(), std::ffi::OsStr::to_os_string);

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

fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    match &cli.config {
        Some(path) => reflib_config::load_config_from(path),
        None => reflib_config::load_config(),
    }
}

/// Build the library. Priority: CLI flags > config file > built-in defaults.
fn build_library(cli: &Cli, cfg: &Config) -> Result<Library> {
    let items = match cli.seed.as_ref().or(cfg.seed_file.as_ref()) {
        Some(path) => seed::load_seed_file(path)?,
        None => seed::default_seed(),
    };
    let view_mode = cli.view.unwrap_or(cfg.defaults.view_mode);

    let library = Library::from_seed(items)?
        .with_view_mode(view_mode)
        .with_sidebar_tags(cfg.sidebar_tags.clone());
    Ok(library)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let loaded = load_config(&cli);
    let default_level = loaded
        .as_ref()
        .map_or("info", |cfg| cfg.defaults.log_level.as_str())
        .to_owned();

    // Tracing to file. Hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli, &default_level);

    let cfg = loaded.unwrap_or_else(|e| {
        warn!(error = %e, "config unusable, falling back to defaults");
        Config::default()
    });

    let library = build_library(&cli, &cfg)?;
    info!(
        references = library.store().len(),
        view = %library.view_mode(),
        "starting reflib"
    );

    let mut app = App::new(library)?;
    app.run().await?;

    Ok(())
}
