//! # rust-asude
//!
//! Rule engine for a two-player, turn-based strategy game on a fixed 13×13
//! board with zone-based movement, elimination scoring and hidden
//! safety-line traps.
//!
//! ## Design Principles
//!
//! 1. **Snapshot Transitions**: Every intent builds the next `GameState`
//!    from a clone of the current one and replaces it only on success.
//!    Rejected intents never leave partial changes behind.
//!
//! 2. **Declarative Rules**: Movement is a table of named rules
//!    (`rules::MOVE_RULES`) evaluated uniformly, so each rule can be
//!    tested on its own.
//!
//! 3. **Injected Time**: The delayed safety-line rollback is judged against
//!    a `Clock`. Tests drive it with `ManualClock` instead of sleeping.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot cloning via `im-rs`.
//!
//! - **Events Out**: The engine never calls into rendering or input code.
//!   It queues `GameEvent`s that the caller drains after each intent.
//!
//! ## Modules
//!
//! - `core`: Cells, coins, players, state, configuration, errors, clocks
//! - `zones`: Static board geometry
//! - `coins`: Coin registry and setup placement
//! - `rules`: Move generation, destination validation, safety lines
//! - `engine`: The `Match` state machine
//! - `events`: Outbound event contract

pub mod coins;
pub mod core;
pub mod engine;
pub mod events;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Cell, Clock, Coin, CoinId, GameState, ManualClock, MatchConfig, MoveOutcome, MoveRecord,
    PendingAction, Phase, PhaseKind, PlacementMode, PlayerId, PlayerMap, Result, RuleConfig,
    RuleError, SystemClock,
};

pub use crate::coins::{CoinRegistry, PlacementStatus};

pub use crate::engine::Match;

pub use crate::events::{EventKind, GameEvent};

pub use crate::zones::Zone;
