//! Core engine types: cells, coins, players, state, configuration, errors.
//!
//! This module holds the data the rest of the engine operates on. Nothing
//! here knows the movement rules; see `rules` and `engine` for those.

pub mod action;
pub mod cell;
pub mod clock;
pub mod coin;
pub mod config;
pub mod error;
pub mod player;
pub mod state;

pub use action::{MoveOutcome, MoveRecord};
pub use cell::{Cell, BOARD_SIZE};
pub use clock::{Clock, ManualClock, SystemClock};
pub use coin::{Coin, CoinId, PlacementMode};
pub use config::{MatchConfig, RuleConfig, DEFAULT_COINS_PER_PLAYER, DEFAULT_SAFETY_LINE_DELAY_MS};
pub use error::{Result, RuleError};
pub use player::{PlayerId, PlayerMap};
pub use state::{
    Destinations, GameState, PendingAction, PendingRollback, Phase, PhaseKind, Selection,
};
