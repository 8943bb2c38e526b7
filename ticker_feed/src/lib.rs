//!
//! Timer-driven mock dataset source for the ticker watch UI.
//!
//! There is no backend: a "fetch" is one tick of a background thread that
//! regenerates random prices for the whole symbol universe. The thread
//! broadcasts its lifecycle over a crossbeam channel so the consumer can
//! derive a loading flag from the started/finished pairing:
//!
//! - `FeedEvent::RefreshStarted` — a refresh cycle began (loading).
//! - `FeedEvent::Snapshot(Dataset)` — the cycle completed with a full snapshot.
//! - `FeedEvent::Failed(reason)` — the source kept failing past the retry
//!   limit; the poller stops after emitting this.
//!
//! Failures are retried with exponential backoff governed by `RetryPolicy`
//! before the poller gives up.
#![warn(missing_docs)]
pub mod generator;
pub mod poller;

pub use generator::{MockSource, SnapshotSource, mock_snapshot};
pub use poller::{DatasetPoller, FeedEvent, PollerHandle, RetryPolicy};
