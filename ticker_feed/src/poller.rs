//! Background dataset poller and event broadcasting.
//!
//! `DatasetPoller::start` spawns a thread that runs refresh cycles on a fixed
//! interval and pushes `FeedEvent`s to the returned handle. Each cycle:
//!
//! 1. idles for one refresh interval,
//! 2. emits `RefreshStarted` and waits the simulated fetch latency,
//! 3. fetches from the `SnapshotSource` and emits `Snapshot` on success.
//!
//! Keeping the idle period apart from the in-flight window means the loading
//! flag is true only while a refresh is actually pending, so consumers see a
//! distinct started/finished transition on every cycle.
//!
//! A failing fetch is retried with exponential backoff; once `RetryPolicy`
//! is exhausted the poller emits `Failed` and stops. All waits multiplex the
//! stop signal via crossbeam `select!`, so teardown never blocks on a timer:
//! dropping the handle (or calling `stop`) wakes the thread and no event is
//! delivered afterwards.

use crossbeam_channel::{Receiver, Sender, after, select, unbounded};
use log::{error, info, warn};
use std::thread;
use std::time::Duration;

use ticker_common::record::Dataset;

use crate::generator::SnapshotSource;

/// Message broadcast by the poller to its consumer.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A refresh cycle began; the dataset is now in flight.
    RefreshStarted,
    /// A refresh cycle completed with a full replacement snapshot.
    Snapshot(Dataset),
    /// The source failed past the retry limit; no further events follow.
    Failed(String),
}

/// Bounded exponential-backoff policy applied to failing fetches.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries allowed after the initial attempt before giving up.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent one.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy allowing `max_retries` retries starting at `base_delay`.
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Backoff delay before retry number `attempt` (zero-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500))
    }
}

/// Consumer-side handle to a running poller thread.
pub struct PollerHandle {
    events: Receiver<FeedEvent>,
    stop_tx: Sender<()>,
}

impl PollerHandle {
    /// Event stream produced by the poller thread.
    pub fn events(&self) -> &Receiver<FeedEvent> {
        &self.events
    }

    /// Asks the poller thread to exit at its next wait point.
    ///
    /// Dropping the handle has the same effect: the thread observes the
    /// closed stop channel and terminates.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(());
    }
}

/// Timer-driven dataset refresher.
pub struct DatasetPoller;

impl DatasetPoller {
    /// Start the poller thread and return the handle for consuming events.
    ///
    /// `interval` is the idle period between refresh cycles; `latency` is the
    /// simulated fetch duration during which the dataset counts as in flight.
    pub fn start<S>(
        source: S,
        interval: Duration,
        latency: Duration,
        retry: RetryPolicy,
    ) -> PollerHandle
    where
        S: SnapshotSource + Send + 'static,
    {
        let (event_tx, event_rx) = unbounded::<FeedEvent>();
        let (stop_tx, stop_rx) = unbounded::<()>();

        thread::spawn(move || {
            run(source, interval, latency, retry, event_tx, stop_rx);
            info!("Dataset poller stopped");
        });

        PollerHandle {
            events: event_rx,
            stop_tx,
        }
    }
}

fn run<S: SnapshotSource>(
    mut source: S,
    interval: Duration,
    latency: Duration,
    retry: RetryPolicy,
    event_tx: Sender<FeedEvent>,
    stop_rx: Receiver<()>,
) {
    loop {
        select! {
            recv(stop_rx) -> _ => return,
            recv(after(interval)) -> _ => {}
        }

        if event_tx.send(FeedEvent::RefreshStarted).is_err() {
            return;
        }

        // Simulated fetch latency; the dataset is in flight until it elapses.
        select! {
            recv(stop_rx) -> _ => return,
            recv(after(latency)) -> _ => {}
        }

        let mut attempt = 0;
        let snapshot = loop {
            match source.fetch() {
                Ok(snapshot) => break snapshot,
                Err(e) if attempt < retry.max_retries => {
                    let delay = retry.delay_for(attempt);
                    attempt += 1;
                    warn!(
                        "Snapshot fetch failed (attempt {attempt}/{}): {e}; retrying in {delay:?}",
                        retry.max_retries
                    );
                    select! {
                        recv(stop_rx) -> _ => return,
                        recv(after(delay)) -> _ => {}
                    }
                }
                Err(e) => {
                    error!("Snapshot fetch failed after {} retries: {e}", retry.max_retries);
                    let _ = event_tx.send(FeedEvent::Failed(e.to_string()));
                    return;
                }
            }
        };

        info!("Snapshot refreshed: {} symbols", snapshot.len());
        if event_tx.send(FeedEvent::Snapshot(snapshot)).is_err() {
            return;
        }
    }
}
