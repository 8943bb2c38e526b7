//! Error types shared between the feed and the watch UI.
//!
//! The `WatchError` enum unifies common failure cases for I/O, serialization,
//! channel communication, and snapshot fetching, allowing crates to propagate
//! a single error type.
use std::io;

use thiserror::Error;

/// Unified error type shared by the feed and the watch UI.
#[derive(Error, Debug)]
pub enum WatchError {
    /// I/O error originating from the standard library, the terminal, or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Crossbeam/channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// The dataset refresh operation failed after exhausting its retries.
    #[error("Snapshot fetch failed: {0}")]
    Fetch(String),
}
