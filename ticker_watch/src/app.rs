//! Application state and the event loop.
//!
//! One logical thread of control: the loop multiplexes keyboard events, feed
//! events, and the debounce deadline with crossbeam `select!`, so every state
//! transition observes a consistent snapshot of `(dataset, loading,
//! staleness, settled query)`. The loading flag is derived from the feed's
//! started/finished pairing, and the selection is recomputed exactly when the
//! settled query or the loading flag changes.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, after, never, select};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::error;
use ratatui::Terminal;
use ratatui::backend::Backend;

use ticker_common::record::{Dataset, Selection};
use ticker_common::{Result, WatchError};
use ticker_common::store::KeyValueStore;
use ticker_feed::{FeedEvent, PollerHandle};

use crate::model::debounce::QueryDebouncer;
use crate::model::resolver;
use crate::model::staleness::Staleness;
use crate::ui;

/// UI shell state, generic over the injected durable store.
pub struct App<S: KeyValueStore> {
    debouncer: QueryDebouncer,
    staleness: Staleness,
    store: S,
    dataset: Dataset,
    selection: Option<Selection>,
    loading: bool,
    feed_error: Option<String>,
    should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Creates the app with the query seeded from `store`.
    ///
    /// Starts in the loading state: the first feed cycle is in flight until
    /// the initial snapshot arrives.
    pub fn new(store: S, debounce_window: Duration, now: Instant) -> Self {
        let debouncer = QueryDebouncer::seeded(debounce_window, &store, now);
        Self {
            debouncer,
            staleness: Staleness::default(),
            store,
            dataset: Dataset::new(),
            selection: None,
            loading: true,
            feed_error: None,
            should_quit: false,
        }
    }

    /// Whether the event loop should exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Raw query as currently typed.
    pub fn raw_query(&self) -> &str {
        self.debouncer.raw()
    }

    /// Selection for the settled query, if one is active.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Latest full snapshot.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Whether a refresh is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Terminal feed failure, if the poller gave up.
    pub fn feed_error(&self) -> Option<&str> {
        self.feed_error.as_deref()
    }

    /// Pending debounce deadline for the select loop.
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Applies one key press.
    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char(c) => {
                let mut raw = self.debouncer.raw().to_string();
                raw.push(c);
                self.edit(raw, now);
            }
            KeyCode::Backspace => {
                let mut raw = self.debouncer.raw().to_string();
                raw.pop();
                self.edit(raw, now);
            }
            _ => {}
        }
    }

    fn edit(&mut self, raw: String, now: Instant) {
        self.staleness.note_edit(self.loading);
        self.debouncer.edit(raw, now);
    }

    /// Applies one feed lifecycle event.
    pub fn on_feed_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::RefreshStarted => self.set_loading(true),
            FeedEvent::Snapshot(dataset) => {
                self.dataset = dataset;
                self.set_loading(false);
            }
            FeedEvent::Failed(reason) => {
                self.feed_error = Some(reason);
                self.set_loading(false);
            }
        }
    }

    /// Settles the pending query once its deadline has passed.
    pub fn on_debounce_deadline(&mut self, now: Instant) {
        match self.debouncer.try_settle(now, &mut self.store) {
            Ok(Some(true)) => self.recompute(),
            Ok(_) => {}
            Err(e) => error!("Failed to persist settled query: {e}"),
        }
    }

    fn set_loading(&mut self, loading: bool) {
        if self.loading == loading {
            return;
        }
        self.loading = loading;
        if !loading {
            self.staleness.note_refresh_complete();
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        match resolver::resolve(
            self.debouncer.settled(),
            &self.dataset,
            self.loading,
            self.staleness.is_stale(),
            &mut self.store,
        ) {
            Ok(selection) => self.selection = selection,
            Err(e) => error!("Failed to persist selection: {e}"),
        }
    }
}

/// Drives the app until the user quits.
///
/// All waits are cancellable: the debounce deadline is re-armed from the
/// debouncer on every iteration (`never` when no emission is pending), and a
/// closed feed channel is retired instead of being polled again.
pub fn run<S: KeyValueStore, B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
    input_rx: &Receiver<KeyEvent>,
    feed: &PollerHandle,
) -> Result<()>
where
    WatchError: From<<B as Backend>::Error>,
{
    let mut feed_open = true;

    while !app.should_quit() {
        terminal.draw(|frame| ui::render(frame, app))?;

        let debounce_rx = match app.debounce_deadline() {
            Some(deadline) => after(deadline.saturating_duration_since(Instant::now())),
            None => never(),
        };
        // The poller exits after a terminal failure; once its channel closes
        // it is retired instead of being polled again.
        let feed_rx = if feed_open {
            feed.events().clone()
        } else {
            never()
        };

        select! {
            recv(input_rx) -> key => match key {
                Ok(key) => app.on_key(key, Instant::now()),
                // The reader thread only exits early on a read error.
                Err(e) => return Err(WatchError::ChannelRecv(format!("input events: {e}"))),
            },
            recv(feed_rx) -> event => match event {
                Ok(event) => app.on_feed_event(event),
                Err(_) => feed_open = false,
            },
            recv(debounce_rx) -> _ => app.on_debounce_deadline(Instant::now()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticker_common::TickerRecord;
    use ticker_common::store::{MemoryStore, PREV_SELECTION_KEY};
    use ticker_common::tickers::Ticker;

    const WINDOW: Duration = Duration::from_millis(50);

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn snapshot() -> Dataset {
        let mut dataset = Dataset::new();
        for ticker in [Ticker::AAPL, Ticker::MSFT, Ticker::KO] {
            dataset.insert(
                ticker,
                TickerRecord {
                    price: 100.0,
                    time: "Tue Aug 04 2026 13:45:10".to_string(),
                },
            );
        }
        dataset
    }

    /// App with one completed refresh cycle behind it.
    fn idle_app(now: Instant) -> App<MemoryStore> {
        let mut app = App::new(MemoryStore::new(), WINDOW, now);
        app.on_debounce_deadline(now + WINDOW);
        app.on_feed_event(FeedEvent::RefreshStarted);
        app.on_feed_event(FeedEvent::Snapshot(snapshot()));
        assert!(!app.loading());
        app
    }

    #[test]
    fn typed_query_settles_into_a_selection() {
        let t0 = Instant::now();
        let mut app = idle_app(t0);
        let t1 = t0 + WINDOW;

        for (i, c) in "aapl".chars().enumerate() {
            app.on_key(key(c), t1 + Duration::from_millis(i as u64));
        }
        assert_eq!(app.raw_query(), "aapl");
        assert!(app.selection().is_none());

        app.on_debounce_deadline(t1 + Duration::from_millis(3) + WINDOW);
        let selection = app.selection().expect("selection");
        assert_eq!(selection.len(), 1);
        assert!(selection.contains_key(&Ticker::AAPL));
    }

    #[test]
    fn edit_during_refresh_hides_selection_until_it_completes() {
        let t0 = Instant::now();
        let mut app = idle_app(t0);
        let t1 = t0 + WINDOW;

        app.on_key(key('k'), t1);
        app.on_key(key('o'), t1 + Duration::from_millis(1));
        app.on_debounce_deadline(t1 + Duration::from_millis(1) + WINDOW);
        assert!(app.selection().is_some());

        // Refresh begins, then the user keeps typing: the old selection must
        // not be shown for the abandoned query.
        app.on_feed_event(FeedEvent::RefreshStarted);
        app.on_key(key(','), t1 + Duration::from_millis(60));
        let settle_at = t1 + Duration::from_millis(60) + WINDOW;
        app.on_key(key('a'), t1 + Duration::from_millis(61));
        app.on_debounce_deadline(settle_at + Duration::from_millis(1));
        assert!(app.selection().is_none());

        // Completion clears the staleness and resolves against fresh data.
        app.on_feed_event(FeedEvent::Snapshot(snapshot()));
        let selection = app.selection().expect("selection after refresh");
        assert!(selection.contains_key(&Ticker::KO));
    }

    #[test]
    fn unchanged_query_keeps_showing_the_previous_selection_while_refreshing() {
        let t0 = Instant::now();
        let mut app = idle_app(t0);
        let t1 = t0 + WINDOW;

        app.on_key(key('m'), t1);
        app.on_key(key('s'), t1 + Duration::from_millis(1));
        app.on_key(key('f'), t1 + Duration::from_millis(2));
        app.on_key(key('t'), t1 + Duration::from_millis(3));
        app.on_debounce_deadline(t1 + Duration::from_millis(3) + WINDOW);
        assert!(app.selection().is_some());

        app.on_feed_event(FeedEvent::RefreshStarted);
        assert!(app.loading());
        let selection = app.selection().expect("preserved selection");
        assert!(selection.contains_key(&Ticker::MSFT));
    }

    #[test]
    fn feed_failure_surfaces_and_ends_loading() {
        let t0 = Instant::now();
        let mut app = App::new(MemoryStore::new(), WINDOW, t0);
        assert!(app.loading());

        app.on_feed_event(FeedEvent::RefreshStarted);
        app.on_feed_event(FeedEvent::Failed("source down".to_string()));
        assert!(!app.loading());
        assert_eq!(app.feed_error(), Some("source down"));
    }

    #[test]
    fn clearing_the_query_drops_the_stored_selection() {
        let t0 = Instant::now();
        let mut app = idle_app(t0);
        let t1 = t0 + WINDOW;

        app.on_key(key('k'), t1);
        app.on_key(key('o'), t1 + Duration::from_millis(1));
        app.on_debounce_deadline(t1 + Duration::from_millis(1) + WINDOW);
        assert!(app.store.get(PREV_SELECTION_KEY).is_some());

        let t2 = t1 + Duration::from_millis(200);
        app.on_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE), t2);
        app.on_key(
            KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            t2 + Duration::from_millis(1),
        );
        app.on_debounce_deadline(t2 + Duration::from_millis(1) + WINDOW);
        assert!(app.selection().is_none());
        assert!(app.store.get(PREV_SELECTION_KEY).is_none());
    }

    #[test]
    fn esc_and_ctrl_c_quit() {
        let t0 = Instant::now();
        let mut app = idle_app(t0);
        app.on_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), t0);
        assert!(app.should_quit());

        let mut app = idle_app(t0);
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), t0);
        assert!(app.should_quit());
    }
}
