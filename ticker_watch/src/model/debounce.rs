//! Trailing-edge query debouncer with a durable settled value.
//!
//! Every keystroke replaces the raw value and restarts the idle deadline;
//! only when the deadline passes with no further edit does the raw value
//! become the settled one, at which point it is written to the store under
//! `"prevQuery"`. There is no leading-edge emission: a burst of edits spaced
//! closer than the window collapses to a single settle equal to the last
//! edit in the burst.
//!
//! The deadline is exposed so the event loop can feed it into `select!`;
//! the debouncer itself never sleeps and cannot fail, only be superseded.

use std::time::{Duration, Instant};

use ticker_common::Result;
use ticker_common::store::{KeyValueStore, PREV_QUERY_KEY};

/// Debounces raw keyboard input into a settled search query.
pub struct QueryDebouncer {
    window: Duration,
    raw: String,
    settled: String,
    deadline: Option<Instant>,
}

impl QueryDebouncer {
    /// Creates a debouncer seeded with the previously settled query.
    ///
    /// The stored value (empty if absent) becomes the raw query and one
    /// initial deadline is scheduled, so the restored query reaches the
    /// settled state through the normal settle path one window after startup.
    pub fn seeded<S: KeyValueStore>(window: Duration, store: &S, now: Instant) -> Self {
        let raw = store.get(PREV_QUERY_KEY).unwrap_or_default();
        Self {
            window,
            raw,
            settled: String::new(),
            deadline: Some(now + window),
        }
    }

    /// Current raw value, updated on every keystroke.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Last settled value.
    pub fn settled(&self) -> &str {
        &self.settled
    }

    /// Instant at which the pending raw value settles, if an emission is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Replaces the raw value and restarts the idle deadline.
    pub fn edit(&mut self, raw: String, now: Instant) {
        self.raw = raw;
        self.deadline = Some(now + self.window);
    }

    /// Settles the raw value if its deadline has passed.
    ///
    /// Returns `Ok(None)` while no emission is due, and `Ok(Some(changed))`
    /// after one, where `changed` says whether the settled value differs
    /// from the previous one. Every settle writes the value to the store.
    pub fn try_settle<S: KeyValueStore>(
        &mut self,
        now: Instant,
        store: &mut S,
    ) -> Result<Option<bool>> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                let changed = self.settled != self.raw;
                self.settled = self.raw.clone();
                store.set(PREV_QUERY_KEY, &self.settled)?;
                Ok(Some(changed))
            }
            _ => Ok(None),
        }
    }
}
