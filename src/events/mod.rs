//! Outbound event contract.
//!
//! Events are plain data queued by the engine and taken with
//! `Match::drain_events`. See `event` for the variants.

pub mod event;

pub use event::{EventKind, GameEvent};
