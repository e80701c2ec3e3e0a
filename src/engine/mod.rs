//! Match engine: phases, turns and move resolution.
//!
//! - `machine`: the `Match` type and every intent it accepts
//! - `pending`: the locked sub-states and the intents that resolve them

pub mod machine;
pub mod pending;

pub use machine::Match;
