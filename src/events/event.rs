//! Outbound game events.
//!
//! The engine queues an event for every observable change. The collaborator
//! layer (rendering, sound, leaderboard) drains the queue after each intent
//! and reacts; the engine never calls out.
//!
//! ## Ordering
//!
//! Within one intent, events are queued in the order the changes happened,
//! and `StateChanged` always comes last, carrying the new snapshot.

use serde::{Deserialize, Serialize};

use crate::core::{Cell, CoinId, GameState, PhaseKind, PlacementMode, PlayerId, PlayerMap, RuleError};

/// Something the collaborator layer may want to react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new snapshot was committed.
    StateChanged(Box<GameState>),

    /// A recoverable rule violation. The snapshot is unchanged.
    MoveRejected(RuleError),

    /// A coin was placed during setup.
    CoinPlaced {
        player: PlayerId,
        coin: CoinId,
        cell: Cell,
        mode: PlacementMode,
    },

    /// The match moved to another phase.
    PhaseChanged { from: PhaseKind, to: PhaseKind },

    /// A coin left the board on a Target cell.
    EliminationOccurred {
        player: PlayerId,
        coin: CoinId,
        new_score: u8,
    },

    /// A legal elimination is waiting for confirmation.
    EliminationOffered {
        player: PlayerId,
        coin: CoinId,
        target: Cell,
    },

    /// A safety-line delay elapsed; the rollback can now be confirmed.
    SafetyLineTriggered {
        hit_player: PlayerId,
        owner: PlayerId,
        origin: Cell,
        destination: Cell,
    },

    /// A coin tried to score in the Target of its own origin side.
    WrongTargetZone {
        player: PlayerId,
        coin: CoinId,
        target_owner: PlayerId,
    },

    /// The game is over.
    GameWon {
        winner: PlayerId,
        final_scores: PlayerMap<u8>,
    },
}

/// Event discriminant, for filtering without matching payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    StateChanged,
    MoveRejected,
    CoinPlaced,
    PhaseChanged,
    EliminationOccurred,
    EliminationOffered,
    SafetyLineTriggered,
    WrongTargetZone,
    GameWon,
}

impl GameEvent {
    /// Snapshot event.
    #[must_use]
    pub fn state_changed(state: &GameState) -> Self {
        GameEvent::StateChanged(Box::new(state.clone()))
    }

    /// Get the event kind.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::StateChanged(_) => EventKind::StateChanged,
            GameEvent::MoveRejected(_) => EventKind::MoveRejected,
            GameEvent::CoinPlaced { .. } => EventKind::CoinPlaced,
            GameEvent::PhaseChanged { .. } => EventKind::PhaseChanged,
            GameEvent::EliminationOccurred { .. } => EventKind::EliminationOccurred,
            GameEvent::EliminationOffered { .. } => EventKind::EliminationOffered,
            GameEvent::SafetyLineTriggered { .. } => EventKind::SafetyLineTriggered,
            GameEvent::WrongTargetZone { .. } => EventKind::WrongTargetZone,
            GameEvent::GameWon { .. } => EventKind::GameWon,
        }
    }

    /// The snapshot carried by a `StateChanged` event.
    #[must_use]
    pub fn snapshot(&self) -> Option<&GameState> {
        match self {
            GameEvent::StateChanged(state) => Some(state),
            _ => None,
        }
    }

    /// The player this event is about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::CoinPlaced { player, .. }
            | GameEvent::EliminationOccurred { player, .. }
            | GameEvent::EliminationOffered { player, .. }
            | GameEvent::WrongTargetZone { player, .. } => Some(*player),
            GameEvent::SafetyLineTriggered { hit_player, .. } => Some(*hit_player),
            GameEvent::GameWon { winner, .. } => Some(*winner),
            GameEvent::StateChanged(_)
            | GameEvent::MoveRejected(_)
            | GameEvent::PhaseChanged { .. } => None,
        }
    }
}
