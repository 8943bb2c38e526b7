//! Price/time snapshot model shared between feed and UI.
//!
//! A `TickerRecord` is one symbol's last-known price and the wall-clock time
//! it was generated. Records are immutable once created; the feed replaces the
//! whole `Dataset` wholesale on each refresh, never mutating it in place.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::tickers::Ticker;

/// Snapshot of a single symbol's last-known price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerRecord {
    /// Last generated price, carrying two decimals.
    pub price: f64,
    /// Wall-clock time the price was generated, e.g. `Tue Aug 04 2026 13:45:10`.
    pub time: String,
}

/// Full authoritative snapshot, keyed by symbol. Replaced atomically by the feed.
pub type Dataset = HashMap<Ticker, TickerRecord>;

/// Subset of a `Dataset` matching a settled search query.
pub type Selection = HashMap<Ticker, TickerRecord>;
