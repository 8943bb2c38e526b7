//!
//! Common types and utilities shared by the ticker feed and the watch UI.
//!
//! This crate aggregates:
//! - `error` — unified error type `WatchError` used across the workspace.
//! - `result` — handy `Result<T, WatchError>` alias.
//! - `tickers` — ticker symbols and query parsing helpers.
//! - `record` — the price/time snapshot model (`TickerRecord`, `Dataset`, `Selection`).
//! - `store` — durable key-value store port with file-backed and in-memory impls.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod tickers;
pub mod record;
pub mod store;

pub use error::WatchError;
pub use result::Result;
pub use record::{Dataset, Selection, TickerRecord};
pub use store::KeyValueStore;
pub use tickers::Ticker;
