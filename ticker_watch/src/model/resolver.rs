//! Selection resolution for a settled query against the current dataset.
//!
//! The resolver is a pure function over `(settled query, dataset, loading,
//! staleness)` plus the injected store. While a refresh is in flight it
//! either hides the selection (query went stale) or serves the persisted
//! previous one; otherwise it intersects the query's tokens with the dataset
//! and keeps the store in sync: a non-empty selection is persisted under
//! `"prevSearchRes"`, anything else clears that key.

use log::warn;

use ticker_common::Result;
use ticker_common::record::{Dataset, Selection};
use ticker_common::store::{KeyValueStore, PREV_SELECTION_KEY};
use ticker_common::tickers::{QueryParser, Ticker};

/// Computes the selection to show for `settled_query`.
///
/// Steps, in order:
/// 1. in-flight refresh + stale query — nothing to show, the caller renders
///    its loading indicator;
/// 2. in-flight refresh + unchanged query — serve the persisted previous
///    selection if one parses (a corrupt value counts as absent);
/// 3. non-empty query — intersect the parsed tokens with the dataset,
///    persist and return the matches, or clear the key when nothing matched;
/// 4. empty query — clear the key.
///
/// Matched records are cloned into a fresh map; the dataset is never mutated.
pub fn resolve<S: KeyValueStore>(
    settled_query: &str,
    dataset: &Dataset,
    loading: bool,
    stale_during_load: bool,
    store: &mut S,
) -> Result<Option<Selection>> {
    if loading {
        if stale_during_load {
            return Ok(None);
        }

        if let Some(stored) = store.get(PREV_SELECTION_KEY) {
            match serde_json::from_str::<Selection>(&stored) {
                Ok(selection) => return Ok(Some(selection)),
                Err(e) => warn!("Discarding unreadable stored selection: {e}"),
            }
        }
    }

    if settled_query.is_empty() {
        store.remove(PREV_SELECTION_KEY)?;
        return Ok(None);
    }

    let mut selection = Selection::new();
    for ticker in Ticker::parse_query(settled_query) {
        if let Some(record) = dataset.get(&ticker) {
            selection.insert(ticker, record.clone());
        }
    }

    if selection.is_empty() {
        store.remove(PREV_SELECTION_KEY)?;
        return Ok(None);
    }

    store.set(PREV_SELECTION_KEY, &serde_json::to_string(&selection)?)?;
    Ok(Some(selection))
}
