//! Mock snapshot generation and the snapshot source seam.
//!
//! `SnapshotSource` is the boundary the poller fetches through; the
//! production impl is `MockSource`, which synthesizes a uniformly random
//! price for every supported symbol and stamps the batch with the current
//! wall-clock time.

use chrono::Local;
use rand::Rng;

use ticker_common::Result;
use ticker_common::record::{Dataset, TickerRecord};
use ticker_common::tickers::Ticker;

/// Wall-clock format used for the `time` field, e.g. `Tue Aug 04 2026 13:45:10`.
pub const TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S";

/// Lower bound (inclusive) of generated prices.
const PRICE_MIN: f64 = 10.0;
/// Upper bound (exclusive) of generated prices.
const PRICE_MAX: f64 = 1010.0;

/// Source of full dataset snapshots, fetched once per refresh cycle.
pub trait SnapshotSource {
    /// Produces the next full snapshot, or an error if the refresh failed.
    fn fetch(&mut self) -> Result<Dataset>;
}

/// Snapshot source backed by the random generator below.
#[derive(Debug, Default)]
pub struct MockSource;

impl SnapshotSource for MockSource {
    fn fetch(&mut self) -> Result<Dataset> {
        Ok(mock_snapshot())
    }
}

/// Generate a snapshot covering every supported symbol.
///
/// Prices are sampled uniformly from `[10, 1010)` and rounded to two
/// decimals; all records in one snapshot share the same timestamp.
pub fn mock_snapshot() -> Dataset {
    let mut rng = rand::rng();
    let time = Local::now().format(TIME_FORMAT).to_string();

    Ticker::ALL
        .iter()
        .map(|ticker| {
            let price: f64 = rng.random_range(PRICE_MIN..PRICE_MAX);
            let record = TickerRecord {
                price: (price * 100.0).round() / 100.0,
                time: time.clone(),
            };
            (*ticker, record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_covers_every_symbol() {
        let snapshot = mock_snapshot();
        assert_eq!(snapshot.len(), Ticker::ALL.len());
        for ticker in Ticker::ALL {
            assert!(snapshot.contains_key(&ticker), "missing {ticker}");
        }
    }

    #[test]
    fn prices_are_bounded_with_two_decimals() {
        let snapshot = mock_snapshot();
        for (ticker, record) in &snapshot {
            assert!(
                record.price >= PRICE_MIN && record.price < PRICE_MAX,
                "{ticker} out of range: {}",
                record.price
            );
            let cents = record.price * 100.0;
            assert!((cents - cents.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn records_share_one_timestamp() {
        let snapshot = mock_snapshot();
        let mut times = snapshot.values().map(|r| r.time.as_str());
        let first = times.next().unwrap();
        assert!(times.all(|t| t == first));
    }
}
