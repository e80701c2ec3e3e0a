//! Pending sub-states of `Playing`.
//!
//! ## Safety-line rollback
//!
//! A move onto an opponent trap cell is applied tentatively and a
//! `PendingRollback` is stored with the clock time it becomes ready:
//!
//! 1. `move_to` relocates the coin and sets `AwaitingSafetyLineConfirm`
//! 2. Once the clock passes `ready_at_ms`, the next poll emits
//!    `SafetyLineTriggered`
//! 3. `confirm_safety_line` returns the coin to its origin, scores one for
//!    the trap owner and passes the turn to the owner
//!
//! No cancellation exists; the rollback always completes once confirmed.
//!
//! ## Wrong-zone notice
//!
//! `dismiss_wrong_zone` clears the lock. The turn does not pass.
//!
//! ## Elimination confirmation
//!
//! Only entered with `RuleConfig::confirm_eliminations`. Confirming scores
//! as an immediate elimination would; declining leaves the coin on the
//! Target. Both pass the turn.

use super::machine::Step;
use crate::core::{
    Cell, CoinId, MoveOutcome, MoveRecord, PendingAction, PendingRollback, PlayerId, Result,
    RuleError,
};
use crate::events::GameEvent;

impl Step<'_> {
    /// Tentatively apply a safety-line hit and lock input.
    pub(super) fn begin_rollback(
        &mut self,
        hit_player: PlayerId,
        coin: CoinId,
        origin: Cell,
        destination: Cell,
    ) -> Result<()> {
        let owner = hit_player.opponent();
        self.state
            .registry
            .relocate(coin, destination)
            .ok_or(RuleError::UnknownCoin {
                player: hit_player,
                coin,
            })?;
        self.state.rebuild_safety_lines();

        let mut resulting_scores = self.state.scores.clone();
        resulting_scores[owner] = resulting_scores[owner].saturating_add(1);
        let ready_at_ms = self.now_ms.saturating_add(self.rules.safety_line_delay_ms);

        log::debug!(
            "{} hit {}'s safety line at {destination}, rollback ready at {ready_at_ms}ms",
            self.name(hit_player),
            self.name(owner)
        );
        self.state.selection = None;
        self.state.pending = PendingAction::AwaitingSafetyLineConfirm(PendingRollback {
            hit_player,
            owner,
            coin,
            origin,
            destination,
            resulting_scores,
            ready_at_ms,
            announced: false,
        });
        Ok(())
    }

    /// Emit `SafetyLineTriggered` once the delay has elapsed.
    ///
    /// Returns whether anything changed.
    pub(super) fn announce_rollback(&mut self) -> bool {
        let now_ms = self.now_ms;
        let PendingAction::AwaitingSafetyLineConfirm(rollback) = &mut self.state.pending else {
            return false;
        };
        if rollback.announced || !rollback.is_ready(now_ms) {
            return false;
        }
        rollback.announced = true;
        let event = GameEvent::SafetyLineTriggered {
            hit_player: rollback.hit_player,
            owner: rollback.owner,
            origin: rollback.origin,
            destination: rollback.destination,
        };
        log::debug!("safety line triggered at {now_ms}ms");
        self.emit(event);
        true
    }

    /// Undo a safety-line hit and score it for the trap owner.
    pub(super) fn apply_rollback(&mut self) -> Result<()> {
        let rollback = self
            .state
            .pending
            .rollback()
            .cloned()
            .ok_or(RuleError::NothingPending)?;
        if !rollback.is_ready(self.now_ms) {
            return Err(RuleError::RollbackNotReady);
        }

        self.state
            .registry
            .relocate(rollback.coin, rollback.origin)
            .ok_or(RuleError::UnknownCoin {
                player: rollback.hit_player,
                coin: rollback.coin,
            })?;
        self.state.rebuild_safety_lines();
        self.state.scores = rollback.resulting_scores.clone();
        self.state.pending = PendingAction::None;

        let new_score = self.state.scores[rollback.owner];
        self.state.record_move(MoveRecord::new(
            self.state.turn_number,
            rollback.hit_player,
            rollback.coin,
            rollback.origin,
            rollback.destination,
            MoveOutcome::SafetyLineRollback {
                owner: rollback.owner,
                new_score,
            },
        ));
        log::debug!(
            "coin {} rolled back to {}, {} scores {new_score}",
            rollback.coin,
            rollback.origin,
            self.name(rollback.owner)
        );

        if !self.check_winner() {
            self.state.pass_turn_to(rollback.hit_player.opponent());
        }
        Ok(())
    }

    /// Clear a wrong-zone notice. The same player keeps the turn.
    pub(super) fn dismiss_wrong_zone(&mut self) -> Result<()> {
        let PendingAction::AwaitingWrongZoneDismiss { player, .. } = self.state.pending else {
            return Err(RuleError::NothingPending);
        };
        log::debug!("{} dismissed wrong-zone notice", self.name(player));
        self.state.pending = PendingAction::None;
        self.state.selection = None;
        Ok(())
    }

    /// Accept a pending elimination.
    pub(super) fn confirm_elimination(&mut self) -> Result<()> {
        let PendingAction::AwaitingEliminationConfirm {
            player,
            coin,
            target,
        } = self.state.pending
        else {
            return Err(RuleError::NothingPending);
        };
        self.state.pending = PendingAction::None;
        self.eliminate(player, coin, target)
    }

    /// Decline a pending elimination, leaving the coin on the Target.
    pub(super) fn decline_elimination(&mut self) -> Result<()> {
        let PendingAction::AwaitingEliminationConfirm {
            player,
            coin,
            target,
        } = self.state.pending
        else {
            return Err(RuleError::NothingPending);
        };
        let before = self
            .state
            .registry
            .relocate(coin, target)
            .ok_or(RuleError::UnknownCoin { player, coin })?;
        self.state.pending = PendingAction::None;
        self.state.rebuild_safety_lines();
        self.state.record_move(MoveRecord::new(
            self.state.turn_number,
            player,
            coin,
            before.position,
            target,
            MoveOutcome::EliminationDeclined,
        ));
        log::debug!("{} declined elimination, coin {coin} rests on {target}", self.name(player));
        self.state.pass_turn();
        Ok(())
    }
}
