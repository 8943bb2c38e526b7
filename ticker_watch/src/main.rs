//! Ticker Watch — interactive terminal search over a periodically refreshed
//! mock quote dataset.
//!
//! The user types a comma-separated list of ticker symbols; after a short
//! idle window the query settles and the matching `symbol | price | time`
//! rows are shown. Internally, this binary wires together:
//!
//! - `ticker_feed::DatasetPoller` — background thread regenerating the full
//!   dataset on a fixed interval and broadcasting `FeedEvent`s.
//! - `model::debounce::QueryDebouncer` — collapses keystroke bursts into
//!   settled queries, persisting each settle.
//! - `model::staleness` + `model::resolver` — decide what the settled query
//!   selects, preserving the last good selection across a refresh as long as
//!   the query did not change mid-flight.
//! - `app::run` — the single event loop multiplexing keyboard input, feed
//!   events, and the debounce deadline via crossbeam `select!`.
//!
//! Concurrency and shutdown:
//! - Three threads total: the event loop, the crossterm reader, and the
//!   poller. All communication is crossbeam channels; no locks.
//! - Teardown stops the reader via a shared `AtomicBool`, the poller via its
//!   handle, and restores the terminal before exiting, so no pending timer
//!   or callback fires after the UI is gone.
//!
//! The last settled query and the last non-empty selection live in a small
//! JSON key-value file (`--state-file`) and survive a restart.
#![warn(missing_docs)]
mod app;
mod args;
mod input;
mod model;
mod ui;

use std::fs::File;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::ExecutableCommand;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::info;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use ticker_common::Result;
use ticker_common::store::FileStore;
use ticker_feed::{DatasetPoller, MockSource, RetryPolicy};

use crate::app::App;
use crate::args::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args)?;
    info!(
        "Starting ticker watch: refresh every {}s, debounce {}ms, state in {}",
        args.refresh_secs,
        args.debounce_ms,
        args.state_file.display()
    );

    let store = FileStore::open(&args.state_file);
    let mut app = App::new(store, Duration::from_millis(args.debounce_ms), Instant::now());

    let shutdown = Arc::new(AtomicBool::new(false));
    let input_rx = input::spawn_input_thread(Arc::clone(&shutdown));
    let feed = DatasetPoller::start(
        MockSource,
        Duration::from_secs(args.refresh_secs),
        Duration::from_millis(args.fetch_latency_ms),
        RetryPolicy::new(args.max_retries, Duration::from_millis(args.retry_delay_ms)),
    );

    // Panic hook: restore the terminal before the default handler runs, so a
    // panic inside the draw loop does not leave the shell in raw mode.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
        default_hook(panic_info);
    }));

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let run_result = app::run(&mut terminal, &mut app, &input_rx, &feed);

    shutdown.store(true, Ordering::Relaxed);
    feed.stop();
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    info!("Ticker watch stopped");

    run_result
}

fn init_logger(args: &Args) -> Result<()> {
    let log_file = File::create(&args.log_file)?;
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}
