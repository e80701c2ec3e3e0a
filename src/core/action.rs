//! Move records for history tracking.
//!
//! Every move that resolves (a relocation, an elimination or a safety-line
//! rollback) is recorded once, in the order it resolved. Rejected intents
//! and wrong-zone attempts never produce a record.
//!
//! ```
//! use rust_asude::core::{Cell, CoinId, MoveOutcome, MoveRecord, PlayerId};
//!
//! let record = MoveRecord::new(
//!     1,
//!     PlayerId::ONE,
//!     CoinId::new(5),
//!     Cell::new(2, 3).unwrap(),
//!     Cell::new(3, 4).unwrap(),
//!     MoveOutcome::Relocated,
//! );
//! assert!(!record.outcome.scored());
//! ```

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::coin::CoinId;
use super::player::PlayerId;

/// How a move resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Plain relocation.
    Relocated,

    /// Relocation onto the mover's own Observer, granting observer power.
    ObserverPowerGained,

    /// The coin left the board on a Target cell and the mover scored.
    Eliminated { new_score: u8 },

    /// Elimination was offered and declined; the coin now sits on the Target.
    EliminationDeclined,

    /// The move landed on an opponent trap cell and was rolled back. The
    /// trap's owner scored.
    SafetyLineRollback { owner: PlayerId, new_score: u8 },
}

impl MoveOutcome {
    /// Whether this outcome changed a score.
    #[must_use]
    pub fn scored(&self) -> bool {
        matches!(
            self,
            MoveOutcome::Eliminated { .. } | MoveOutcome::SafetyLineRollback { .. }
        )
    }
}

/// A resolved move with metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Turn number the move was made on.
    pub turn_number: u32,

    /// The player who moved.
    pub player: PlayerId,

    /// The coin that moved.
    pub coin: CoinId,

    /// Cell the coin left.
    pub from: Cell,

    /// Cell the coin was sent to. For a rollback this is the trap cell.
    pub to: Cell,

    /// Resolution.
    pub outcome: MoveOutcome,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub fn new(
        turn_number: u32,
        player: PlayerId,
        coin: CoinId,
        from: Cell,
        to: Cell,
        outcome: MoveOutcome,
    ) -> Self {
        Self {
            turn_number,
            player,
            coin,
            from,
            to,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scored_outcomes() {
        assert!(!MoveOutcome::Relocated.scored());
        assert!(!MoveOutcome::ObserverPowerGained.scored());
        assert!(!MoveOutcome::EliminationDeclined.scored());
        assert!(MoveOutcome::Eliminated { new_score: 1 }.scored());
        assert!(MoveOutcome::SafetyLineRollback {
            owner: PlayerId::TWO,
            new_score: 3
        }
        .scored());
    }

    #[test]
    fn test_move_record_serde() {
        let record = MoveRecord::new(
            4,
            PlayerId::TWO,
            CoinId::new(12),
            Cell::at(12, 3),
            Cell::at(11, 4),
            MoveOutcome::Relocated,
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: MoveRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
