//! Tracks whether the query changed while a dataset refresh was in flight.
//!
//! Two states, two transitions:
//! - `Fresh → Stale` on a raw-query edit arriving while a refresh is in flight.
//! - `Stale → Fresh` when the refresh completes, regardless of intervening edits.
//!
//! While stale, the resolver must not fall back to the persisted previous
//! selection: it belongs to a query the user has already abandoned.

/// Relation between the current query and the dataset in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Staleness {
    /// The in-flight dataset still corresponds to the current query.
    #[default]
    Fresh,
    /// The query was edited after the refresh began.
    Stale,
}

impl Staleness {
    /// Records a raw-query edit; marks the state stale iff a refresh is in flight.
    pub fn note_edit(&mut self, loading: bool) {
        if loading {
            *self = Staleness::Stale;
        }
    }

    /// Records a completed refresh, returning to `Fresh` unconditionally.
    pub fn note_refresh_complete(&mut self) {
        *self = Staleness::Fresh;
    }

    /// Whether the current query no longer matches the data in flight.
    pub fn is_stale(&self) -> bool {
        matches!(self, Staleness::Stale)
    }
}
