//! Game state snapshot.
//!
//! ## GameState
//!
//! Everything the engine knows about a match:
//! - Phase, turn and turn number
//! - Coin registry and setup progress
//! - Scores and per-player safety lines
//! - Pending action and current selection
//! - Move history
//!
//! Uses `im` persistent data structures, so the engine can clone the current
//! snapshot, apply an intent to the clone and swap it in only on success.

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::MoveRecord;
use super::cell::Cell;
use super::coin::CoinId;
use super::player::{PlayerId, PlayerMap};
use crate::coins::{CoinRegistry, SetupProgress};
use crate::rules::safety;

/// Match phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Collecting player names and coin count.
    Config,
    /// Sequential coin placement.
    Setup,
    /// Turn-based movement.
    Playing,
    /// Game over. Absorbing.
    Terminal { winner: PlayerId },
}

impl Phase {
    /// The phase without its payload.
    #[must_use]
    pub fn kind(self) -> PhaseKind {
        match self {
            Phase::Config => PhaseKind::Config,
            Phase::Setup => PhaseKind::Setup,
            Phase::Playing => PhaseKind::Playing,
            Phase::Terminal { .. } => PhaseKind::Terminal,
        }
    }
}

/// Phase discriminant, used in errors and comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Config,
    Setup,
    Playing,
    Terminal,
}

/// A safety-line hit waiting to be rolled back.
///
/// The hit is applied tentatively: the coin sits on `destination` until the
/// rollback is confirmed, at which point it returns to `origin` and `owner`
/// scores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRollback {
    /// The player whose move hit the trap.
    pub hit_player: PlayerId,

    /// The player whose safety line was hit.
    pub owner: PlayerId,

    /// The coin that moved.
    pub coin: CoinId,

    /// Cell the coin returns to.
    pub origin: Cell,

    /// Trap cell the coin currently occupies.
    pub destination: Cell,

    /// Scores once the rollback is applied.
    pub resulting_scores: PlayerMap<u8>,

    /// Clock time (ms) after which the rollback can be confirmed.
    pub ready_at_ms: u64,

    /// Whether `SafetyLineTriggered` has been emitted.
    pub announced: bool,
}

impl PendingRollback {
    /// Whether the delay has elapsed at `now_ms`.
    #[must_use]
    pub fn is_ready(&self, now_ms: u64) -> bool {
        now_ms >= self.ready_at_ms
    }
}

/// Sub-state of `Phase::Playing` that locks normal input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    /// Nothing pending; `select` and `move_to` are accepted.
    #[default]
    None,

    /// A legal elimination waiting for confirmation.
    AwaitingEliminationConfirm {
        player: PlayerId,
        coin: CoinId,
        target: Cell,
    },

    /// A safety-line hit waiting for its rollback.
    AwaitingSafetyLineConfirm(PendingRollback),

    /// A coin tried to score in its own side's Target; the notice must be
    /// dismissed before the same player moves again.
    AwaitingWrongZoneDismiss {
        player: PlayerId,
        coin: CoinId,
        target_owner: PlayerId,
    },
}

impl PendingAction {
    /// Whether normal input is locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        !matches!(self, PendingAction::None)
    }

    /// The pending rollback, if one is waiting.
    #[must_use]
    pub fn rollback(&self) -> Option<&PendingRollback> {
        match self {
            PendingAction::AwaitingSafetyLineConfirm(rollback) => Some(rollback),
            _ => None,
        }
    }
}

/// Destinations of a selected coin, in first-occurrence order.
pub type Destinations = SmallVec<[Cell; 16]>;

/// The coin chosen for the next move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// The player who selected.
    pub player: PlayerId,

    /// The selected coin.
    pub coin: CoinId,

    /// Legal destinations computed at selection time.
    pub destinations: Destinations,
}

impl Selection {
    /// Whether `cell` is among the legal destinations.
    #[must_use]
    pub fn allows(&self, cell: Cell) -> bool {
        self.destinations.contains(&cell)
    }
}

/// Complete match snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase.
    pub phase: Phase,

    /// Player to move. Player 1 places and moves first.
    pub turn: PlayerId,

    /// Starts at 1, incremented every time the turn passes.
    pub turn_number: u32,

    /// Coins on the board.
    pub registry: CoinRegistry,

    /// Eliminations and rollbacks scored per player.
    pub scores: PlayerMap<u8>,

    /// Trap cells per player. Rebuilt after every registry change.
    pub safety_lines: PlayerMap<OrdSet<Cell>>,

    /// Input lock, if any.
    pub pending: PendingAction,

    /// Selected coin and its legal destinations.
    pub selection: Option<Selection>,

    /// Setup placement progress.
    pub setup: SetupProgress,

    /// Resolved moves in order.
    pub history: Vector<MoveRecord>,

    coins_per_player: u8,
}

impl GameState {
    /// Create a snapshot in the `Config` phase.
    #[must_use]
    pub fn new(coins_per_player: u8) -> Self {
        Self {
            phase: Phase::Config,
            turn: PlayerId::ONE,
            turn_number: 1,
            registry: CoinRegistry::new(),
            scores: PlayerMap::with_value(0),
            safety_lines: PlayerMap::with_value(OrdSet::new()),
            pending: PendingAction::None,
            selection: None,
            setup: SetupProgress::new(coins_per_player),
            history: Vector::new(),
            coins_per_player,
        }
    }

    /// Coins per player (N) for this match.
    #[must_use]
    pub fn coins_per_player(&self) -> u8 {
        self.coins_per_player
    }

    /// Current phase kind.
    #[must_use]
    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    /// The winner, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::Terminal { winner } => Some(winner),
            _ => None,
        }
    }

    /// Get a player's score.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> u8 {
        self.scores[player]
    }

    /// Whether `select` and `move_to` are currently locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.pending.is_locked()
    }

    /// Recompute both players' safety lines from the registry.
    pub fn rebuild_safety_lines(&mut self) {
        self.safety_lines = safety::rebuild_safety_lines(&self.registry);
    }

    /// Whether `cell` is on `player`'s safety line.
    #[must_use]
    pub fn is_safety_line(&self, player: PlayerId, cell: Cell) -> bool {
        self.safety_lines[player].contains(&cell)
    }

    /// The player who has won on the current board, if any.
    ///
    /// A score reaching N wins. A player with no coins left also wins.
    /// Player 1 is checked first.
    #[must_use]
    pub fn find_winner(&self) -> Option<PlayerId> {
        let n = self.coins_per_player;
        PlayerId::BOTH
            .into_iter()
            .find(|&p| self.scores[p] >= n)
            .or_else(|| {
                PlayerId::BOTH
                    .into_iter()
                    .find(|&p| self.registry.count(p) == 0)
            })
    }

    /// Hand the turn to the other player.
    pub fn pass_turn(&mut self) {
        self.turn = self.turn.opponent();
        self.turn_number += 1;
        self.selection = None;
    }

    /// Hand the turn to a specific player.
    pub fn pass_turn_to(&mut self, player: PlayerId) {
        self.turn = player;
        self.turn_number += 1;
        self.selection = None;
    }

    /// Record a resolved move.
    pub fn record_move(&mut self, record: MoveRecord) {
        self.history.push_back(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coin, PlacementMode};

    fn coin(id: u16, owner: PlayerId, row: u8, col: u8) -> Coin {
        Coin::placed(CoinId::new(id), owner, Cell::at(row, col), PlacementMode::Home)
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(8);
        assert_eq!(state.phase, Phase::Config);
        assert_eq!(state.phase_kind(), PhaseKind::Config);
        assert_eq!(state.turn, PlayerId::ONE);
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.score(PlayerId::ONE), 0);
        assert!(!state.is_locked());
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_pass_turn_clears_selection() {
        let mut state = GameState::new(8);
        state.selection = Some(Selection {
            player: PlayerId::ONE,
            coin: CoinId::new(1),
            destinations: SmallVec::new(),
        });

        state.pass_turn();
        assert_eq!(state.turn, PlayerId::TWO);
        assert_eq!(state.turn_number, 2);
        assert!(state.selection.is_none());

        state.pass_turn_to(PlayerId::TWO);
        assert_eq!(state.turn, PlayerId::TWO);
        assert_eq!(state.turn_number, 3);
    }

    #[test]
    fn test_find_winner_by_score() {
        let mut state = GameState::new(2);
        state.registry.insert(coin(1, PlayerId::ONE, 1, 1));
        state.registry.insert(coin(3, PlayerId::TWO, 13, 1));
        assert_eq!(state.find_winner(), None);

        state.scores[PlayerId::TWO] = 2;
        assert_eq!(state.find_winner(), Some(PlayerId::TWO));
    }

    #[test]
    fn test_find_winner_by_empty_side() {
        let mut state = GameState::new(4);
        state.registry.insert(coin(5, PlayerId::TWO, 13, 1));
        assert_eq!(state.find_winner(), Some(PlayerId::ONE));
    }

    #[test]
    fn test_pending_lock() {
        let rollback = PendingRollback {
            hit_player: PlayerId::TWO,
            owner: PlayerId::ONE,
            coin: CoinId::new(9),
            origin: Cell::at(6, 3),
            destination: Cell::at(5, 3),
            resulting_scores: PlayerMap::with_value(0),
            ready_at_ms: 100,
            announced: false,
        };
        assert!(!rollback.is_ready(99));
        assert!(rollback.is_ready(100));

        let pending = PendingAction::AwaitingSafetyLineConfirm(rollback);
        assert!(pending.is_locked());
        assert!(pending.rollback().is_some());
        assert!(!PendingAction::None.is_locked());
    }

    #[test]
    fn test_snapshot_serde() {
        let mut state = GameState::new(2);
        state.registry.insert(coin(1, PlayerId::ONE, 1, 1));
        state.rebuild_safety_lines();
        state.phase = Phase::Terminal {
            winner: PlayerId::ONE,
        };

        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
