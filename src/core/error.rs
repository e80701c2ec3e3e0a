//! Rule violations and ignored inputs.
//!
//! Nothing in the engine is fatal. Every error leaves the previous snapshot
//! untouched; the variants only differ in whether the collaborator layer is
//! told about them (`MoveRejected`) or the input is dropped silently.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cell::Cell;
use super::coin::{CoinId, PlacementMode};
use super::player::PlayerId;
use super::state::PhaseKind;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Cell R{row}C{col} is outside the board")]
    OutOfBounds { row: u8, col: u8 },
    #[error("Unknown player number {0}")]
    UnknownPlayer(u8),
    #[error("{player} cannot place a {mode} coin at {cell}: {expected}")]
    InvalidPlacement {
        player: PlayerId,
        mode: PlacementMode,
        cell: Cell,
        expected: String,
    },
    #[error("Coin {coin} cannot move to {destination}")]
    InvalidMove { coin: CoinId, destination: Cell },
    #[error("Coin {coin} from {origin_side}'s side cannot score in {target_owner}'s target zone")]
    InvalidElimination {
        coin: CoinId,
        origin_side: PlayerId,
        target_owner: PlayerId,
    },
    #[error("No coin is selected")]
    NoSelection,
    #[error("It is not {0}'s turn")]
    WrongTurn(PlayerId),
    #[error("The game is over, no new moves are accepted")]
    GameOver,
    #[error("Input is locked until the pending action is resolved")]
    InputLocked,
    #[error("{player} has no coin {coin} on the board")]
    UnknownCoin { player: PlayerId, coin: CoinId },
    #[error("Operation requires the {expected:?} phase, game is in {actual:?}")]
    WrongPhase {
        expected: PhaseKind,
        actual: PhaseKind,
    },
    #[error("No matching action is pending")]
    NothingPending,
    #[error("The safety-line rollback is not ready yet")]
    RollbackNotReady,
}

impl RuleError {
    /// Errors that the engine drops without telling the collaborator layer.
    ///
    /// Everything else is reported through `GameEvent::MoveRejected` so the
    /// player can be re-prompted.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            RuleError::NoSelection
                | RuleError::WrongTurn(_)
                | RuleError::GameOver
                | RuleError::InputLocked
                | RuleError::UnknownCoin { .. }
                | RuleError::WrongPhase { .. }
                | RuleError::NothingPending
                | RuleError::RollbackNotReady
        )
    }
}

pub type Result<T> = core::result::Result<T, RuleError>;
