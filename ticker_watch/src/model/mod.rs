//! Core state machinery behind the watch UI.
//!
//! This module groups the three pieces with non-trivial state transitions:
//! - `debounce` — trailing-edge query debouncer with durable settled values.
//! - `staleness` — tracks whether the query changed while a refresh was in flight.
//! - `resolver` — computes the selection shown for a settled query.

pub mod debounce;
pub mod resolver;
pub mod staleness;
