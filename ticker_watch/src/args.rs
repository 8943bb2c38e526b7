//! Command-line arguments.
use std::path::PathBuf;

use clap::Parser;

/// Interactive ticker search over a periodically refreshed mock dataset.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Seconds between dataset refreshes.
    #[arg(long, default_value_t = 10)]
    pub refresh_secs: u64,

    /// Milliseconds a simulated fetch stays in flight.
    #[arg(long, default_value_t = 1000)]
    pub fetch_latency_ms: u64,

    /// Milliseconds of keyboard idle before the query settles.
    #[arg(long, default_value_t = 50)]
    pub debounce_ms: u64,

    /// JSON file persisting the last query and selection across restarts.
    #[arg(long, default_value = "ticker_watch_state.json")]
    pub state_file: PathBuf,

    /// Session log file (the UI owns the terminal, so logs go to disk).
    #[arg(long, default_value = "ticker_watch.log")]
    pub log_file: PathBuf,

    /// Fetch retries before the feed gives up.
    #[arg(long, default_value_t = 3)]
    pub max_retries: u32,

    /// Milliseconds before the first fetch retry; doubles per retry.
    #[arg(long, default_value_t = 500)]
    pub retry_delay_ms: u64,
}
