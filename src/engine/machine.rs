//! Turn and phase state machine.
//!
//! `Match` owns the current `GameState` snapshot and is the only way to
//! change it. Every intent follows the same steps:
//!
//! 1. Poll the clock, so an elapsed safety-line delay is observed first
//! 2. Clone the snapshot (O(1) with persistent structures)
//! 3. Apply the intent to the clone, collecting events
//! 4. On success swap the clone in and queue its events, followed by
//!    `StateChanged`; on failure keep the old snapshot and, unless the
//!    error is silent, queue `MoveRejected`
//!
//! ## Phases
//!
//! ```text
//! Config --start_game--> Setup --2N placements--> Playing --win--> Terminal
//! ```
//!
//! `Playing` is locked while a `PendingAction` is set. See `pending` for
//! the confirm/dismiss intents that unlock it.
//!
//! ## Example
//!
//! ```
//! use rust_asude::core::{ManualClock, PhaseKind, PlayerId};
//! use rust_asude::engine::Match;
//!
//! let mut game = Match::new().with_clock(ManualClock::new());
//! game.configure(["Asude", "Deniz"], 2).unwrap();
//! game.start_game().unwrap();
//!
//! // Player 1: one coin onto Player 2's Target, one at home
//! game.move_to(13, 7).unwrap();
//! game.move_to(1, 1).unwrap();
//! // Player 2: mirror image
//! game.move_to(1, 7).unwrap();
//! game.move_to(13, 13).unwrap();
//!
//! assert_eq!(game.snapshot().phase_kind(), PhaseKind::Playing);
//! assert_eq!(game.snapshot().turn, PlayerId::ONE);
//! ```

use crate::coins::PlacementStatus;
use crate::core::{
    Cell, Clock, CoinId, Destinations, GameState, MatchConfig, MoveOutcome, MoveRecord,
    PendingAction, Phase, PhaseKind, PlayerId, PlayerMap, Result, RuleConfig, RuleError,
    Selection, SystemClock,
};
use crate::events::GameEvent;
use crate::rules;
use crate::zones;

/// One intent being applied to a cloned snapshot.
pub(super) struct Step<'a> {
    pub(super) state: GameState,
    pub(super) rules: &'a RuleConfig,
    pub(super) names: &'a PlayerMap<String>,
    pub(super) now_ms: u64,
    pub(super) events: Vec<GameEvent>,
}

impl Step<'_> {
    pub(super) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(super) fn name(&self, player: PlayerId) -> &str {
        &self.names[player]
    }

    pub(super) fn set_phase(&mut self, phase: Phase) {
        let from = self.state.phase.kind();
        self.state.phase = phase;
        log::info!("phase {from:?} -> {:?}", phase.kind());
        self.emit(GameEvent::PhaseChanged {
            from,
            to: phase.kind(),
        });
    }

    /// Enter `Terminal` if someone has won. Returns whether the game ended.
    pub(super) fn check_winner(&mut self) -> bool {
        let Some(winner) = self.state.find_winner() else {
            return false;
        };
        self.state.pending = PendingAction::None;
        self.state.selection = None;
        self.set_phase(Phase::Terminal { winner });
        log::info!(
            "{} wins {}-{}",
            self.name(winner),
            self.state.scores[PlayerId::ONE],
            self.state.scores[PlayerId::TWO]
        );
        let final_scores = self.state.scores.clone();
        self.emit(GameEvent::GameWon {
            winner,
            final_scores,
        });
        true
    }

    /// Remove a coin on a Target cell and score it for `player`.
    pub(super) fn eliminate(&mut self, player: PlayerId, coin: CoinId, target: Cell) -> Result<()> {
        let removed = self
            .state
            .registry
            .remove(coin)
            .ok_or(RuleError::UnknownCoin { player, coin })?;
        self.state.scores[player] = self.state.scores[player].saturating_add(1);
        let new_score = self.state.scores[player];
        self.state.rebuild_safety_lines();
        self.state.record_move(MoveRecord::new(
            self.state.turn_number,
            player,
            coin,
            removed.position,
            target,
            MoveOutcome::Eliminated { new_score },
        ));
        log::debug!("{} eliminates coin {coin} on {target}, score {new_score}", self.name(player));
        self.emit(GameEvent::EliminationOccurred {
            player,
            coin,
            new_score,
        });
        if !self.check_winner() {
            self.state.pass_turn();
        }
        Ok(())
    }
}

/// A single match.
#[derive(Debug)]
pub struct Match {
    config: MatchConfig,
    state: GameState,
    clock: Box<dyn Clock>,
    events: Vec<GameEvent>,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    /// Create a match with the default configuration and the system clock.
    #[must_use]
    pub fn new() -> Self {
        let config = MatchConfig::default();
        let state = GameState::new(config.rules.coins_per_player);
        Self {
            config,
            state,
            clock: Box::new(SystemClock::new()),
            events: Vec::new(),
        }
    }

    /// Create a match from a pre-built configuration.
    pub fn with_config(config: MatchConfig) -> Result<Self> {
        config.rules.validate()?;
        let state = GameState::new(config.rules.coins_per_player);
        Ok(Self {
            config,
            state,
            clock: Box::new(SystemClock::new()),
            events: Vec::new(),
        })
    }

    /// Resume a match from a snapshot.
    ///
    /// The snapshot must have been produced for the same coin count, its
    /// board must satisfy the layout invariants, and a `Playing` snapshot
    /// must not already hold a winner.
    pub fn from_snapshot(config: MatchConfig, state: GameState) -> Result<Self> {
        config.rules.validate()?;
        let n = config.rules.coins_per_player;
        if state.coins_per_player() != n || state.setup.coins_per_player() != n {
            return Err(RuleError::InvalidConfig(format!(
                "snapshot has {} coins per player ({} in setup), configuration has {n}",
                state.coins_per_player(),
                state.setup.coins_per_player()
            )));
        }
        if let Some((cell, problem)) = state.registry.layout_violation() {
            return Err(RuleError::InvalidConfig(format!("snapshot {problem} at {cell}")));
        }
        if let Some((player, score)) = state.scores.iter().find(|(_, score)| **score > n) {
            return Err(RuleError::InvalidConfig(format!(
                "snapshot score {score} for {player} exceeds {n}"
            )));
        }
        if state.phase == Phase::Playing {
            if let Some(winner) = state.find_winner() {
                return Err(RuleError::InvalidConfig(format!(
                    "snapshot is still playing but {winner} has already won"
                )));
            }
        }
        let mut state = state;
        state.rebuild_safety_lines();
        Ok(Self {
            config,
            state,
            clock: Box::new(SystemClock::new()),
            events: Vec::new(),
        })
    }

    /// Replace the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // === Queries ===

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> &GameState {
        &self.state
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The next setup placement, while in `Setup`.
    #[must_use]
    pub fn placement_status(&self) -> Option<PlacementStatus> {
        match self.state.phase {
            Phase::Setup => self.state.setup.status(),
            _ => None,
        }
    }

    /// Legal destinations of any coin on the board.
    #[must_use]
    pub fn legal_destinations(&self, coin: CoinId) -> Option<Destinations> {
        let coin = self.state.registry.get(coin)?;
        Some(rules::legal_destinations(coin, &self.state.registry))
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Configuration ===

    /// Set player names and coin count. Only allowed before `start_game`.
    pub fn configure<S: Into<String>>(&mut self, names: [S; 2], coins_per_player: u8) -> Result<()> {
        let [one, two] = names;
        let config = self
            .config
            .clone()
            .with_player_name(PlayerId::ONE, one)
            .with_player_name(PlayerId::TWO, two)
            .with_rules(self.config.rules.clone().with_coins_per_player(coins_per_player));
        self.configure_match(config)
    }

    /// Replace the whole configuration. Only allowed before `start_game`.
    pub fn configure_match(&mut self, config: MatchConfig) -> Result<()> {
        let result = self.require_phase(PhaseKind::Config).and_then(|()| config.rules.validate());
        if let Err(err) = result {
            self.reject("configure", &err);
            return Err(err);
        }
        log::info!(
            "configured {} vs {}, {} coins each",
            config.player_name(PlayerId::ONE),
            config.player_name(PlayerId::TWO),
            config.rules.coins_per_player
        );
        self.state = GameState::new(config.rules.coins_per_player);
        self.config = config;
        self.events.push(GameEvent::state_changed(&self.state));
        Ok(())
    }

    // === Intents ===

    /// Leave `Config` and begin setup placement.
    pub fn start_game(&mut self) -> Result<()> {
        self.run("start_game", |step| {
            match step.state.phase {
                Phase::Config => {}
                Phase::Terminal { .. } => return Err(RuleError::GameOver),
                other => {
                    return Err(RuleError::WrongPhase {
                        expected: PhaseKind::Config,
                        actual: other.kind(),
                    })
                }
            }
            step.state = GameState::new(step.rules.coins_per_player);
            step.set_phase(Phase::Setup);
            Ok(())
        })
    }

    /// Select one of the current player's coins.
    pub fn select(&mut self, player: PlayerId, coin: CoinId) -> Result<()> {
        self.run("select", |step| {
            require_unlocked_play(&step.state)?;
            if player != step.state.turn {
                return Err(RuleError::WrongTurn(player));
            }
            let selected = *step
                .state
                .registry
                .get_owned(player, coin)
                .ok_or(RuleError::UnknownCoin { player, coin })?;
            let destinations = rules::legal_destinations(&selected, &step.state.registry);
            log::debug!(
                "{} selects coin {coin} at {}: {} destinations",
                step.name(player),
                selected.position,
                destinations.len()
            );
            step.state.selection = Some(Selection {
                player,
                coin,
                destinations,
            });
            Ok(())
        })
    }

    /// Act on a cell: a placement during setup, a move during play.
    pub fn move_to(&mut self, row: u8, col: u8) -> Result<()> {
        self.run("move_to", |step| match step.state.phase {
            Phase::Setup => {
                let cell = Cell::checked(row, col)?;
                place(step, cell)
            }
            Phase::Playing => {
                require_unlocked_play(&step.state)?;
                let cell = Cell::checked(row, col)?;
                resolve_move(step, cell)
            }
            Phase::Terminal { .. } => Err(RuleError::GameOver),
            Phase::Config => Err(RuleError::WrongPhase {
                expected: PhaseKind::Setup,
                actual: PhaseKind::Config,
            }),
        })
    }

    /// Confirm an elapsed safety-line rollback.
    pub fn confirm_safety_line(&mut self) -> Result<()> {
        self.run("confirm_safety_line", |step| {
            require_play(&step.state)?;
            step.apply_rollback()
        })
    }

    /// Dismiss a wrong-zone notice. The same player moves again.
    pub fn dismiss_wrong_zone(&mut self) -> Result<()> {
        self.run("dismiss_wrong_zone", |step| {
            require_play(&step.state)?;
            step.dismiss_wrong_zone()
        })
    }

    /// Accept a pending elimination.
    pub fn confirm_elimination(&mut self) -> Result<()> {
        self.run("confirm_elimination", |step| {
            require_play(&step.state)?;
            step.confirm_elimination()
        })
    }

    /// Decline a pending elimination; the coin stays on the Target.
    pub fn decline_elimination(&mut self) -> Result<()> {
        self.run("decline_elimination", |step| {
            require_play(&step.state)?;
            step.decline_elimination()
        })
    }

    /// Observe the clock. Emits `SafetyLineTriggered` once a pending
    /// rollback's delay has elapsed. Returns whether anything changed.
    pub fn poll(&mut self) -> bool {
        let now_ms = self.clock.now_ms();
        let mut step = Step {
            state: self.state.clone(),
            rules: &self.config.rules,
            names: &self.config.player_names,
            now_ms,
            events: Vec::new(),
        };
        if !step.announce_rollback() {
            return false;
        }
        let Step { state, events, .. } = step;
        self.commit(state, events);
        true
    }

    // === Internals ===

    fn run(
        &mut self,
        intent: &'static str,
        apply: impl FnOnce(&mut Step<'_>) -> Result<()>,
    ) -> Result<()> {
        self.poll();
        let mut step = Step {
            state: self.state.clone(),
            rules: &self.config.rules,
            names: &self.config.player_names,
            now_ms: self.clock.now_ms(),
            events: Vec::new(),
        };
        let outcome = apply(&mut step);
        let Step { state, events, .. } = step;
        match outcome {
            Ok(()) => {
                self.commit(state, events);
                // A zero delay is ready immediately
                self.poll();
                Ok(())
            }
            Err(err) => {
                self.reject(intent, &err);
                Err(err)
            }
        }
    }

    fn commit(&mut self, state: GameState, events: Vec<GameEvent>) {
        self.state = state;
        self.events.extend(events);
        self.events.push(GameEvent::state_changed(&self.state));
    }

    fn reject(&mut self, intent: &str, err: &RuleError) {
        if err.is_silent() {
            log::debug!("{intent} ignored: {err}");
        } else {
            log::warn!("{intent} rejected: {err}");
            self.events.push(GameEvent::MoveRejected(err.clone()));
        }
    }

    fn require_phase(&self, expected: PhaseKind) -> Result<()> {
        match self.state.phase_kind() {
            PhaseKind::Terminal => Err(RuleError::GameOver),
            actual if actual != expected => Err(RuleError::WrongPhase { expected, actual }),
            _ => Ok(()),
        }
    }
}

fn require_play(state: &GameState) -> Result<()> {
    match state.phase {
        Phase::Playing => Ok(()),
        Phase::Terminal { .. } => Err(RuleError::GameOver),
        other => Err(RuleError::WrongPhase {
            expected: PhaseKind::Playing,
            actual: other.kind(),
        }),
    }
}

fn require_unlocked_play(state: &GameState) -> Result<()> {
    require_play(state)?;
    if state.is_locked() {
        return Err(RuleError::InputLocked);
    }
    Ok(())
}

/// Place the next setup coin.
fn place(step: &mut Step<'_>, cell: Cell) -> Result<()> {
    let mode = step.state.setup.status().ok_or(RuleError::GameOver)?.mode;
    let coin = step.state.setup.place(&mut step.state.registry, cell)?;
    log::debug!(
        "{} places coin {} ({mode}) on {cell}, {}/{}",
        step.name(coin.owner),
        coin.id,
        step.state.setup.total_placed(),
        step.state.setup.total_required()
    );
    step.emit(GameEvent::CoinPlaced {
        player: coin.owner,
        coin: coin.id,
        cell,
        mode,
    });

    if step.state.setup.is_complete() {
        step.state.turn = PlayerId::ONE;
        step.state.rebuild_safety_lines();
        step.set_phase(Phase::Playing);
    } else if let Some(status) = step.state.setup.status() {
        step.state.turn = status.player;
    }
    Ok(())
}

/// Resolve a move of the selected coin onto `cell`.
fn resolve_move(step: &mut Step<'_>, cell: Cell) -> Result<()> {
    let selection = step.state.selection.clone().ok_or(RuleError::NoSelection)?;
    let player = selection.player;
    let coin = *step
        .state
        .registry
        .get_owned(player, selection.coin)
        .ok_or(RuleError::UnknownCoin {
            player,
            coin: selection.coin,
        })?;

    if !selection.allows(cell) {
        if rules::is_wrong_zone_attempt(&coin, cell, &step.state.registry) {
            return resolve_target(step, player, coin.id, cell);
        }
        return Err(RuleError::InvalidMove {
            coin: coin.id,
            destination: cell,
        });
    }

    if zones::is_any_target(cell) {
        return resolve_target(step, player, coin.id, cell);
    }

    let opponent = player.opponent();
    if step.state.is_safety_line(opponent, cell) && !zones::is_boundary_area(cell) {
        return step.begin_rollback(player, coin.id, coin.position, cell);
    }

    let mut moved = coin.moved_to(cell);
    let outcome = if zones::is_observer(cell, player) && !coin.observer_power {
        moved = moved.with_observer_power();
        MoveOutcome::ObserverPowerGained
    } else {
        MoveOutcome::Relocated
    };
    step.state.registry.update(moved);
    step.state.rebuild_safety_lines();
    step.state.record_move(MoveRecord::new(
        step.state.turn_number,
        player,
        coin.id,
        coin.position,
        cell,
        outcome,
    ));
    log::debug!(
        "{} moves coin {} {} -> {cell} ({outcome:?})",
        step.name(player),
        coin.id,
        coin.position
    );
    step.state.pass_turn();
    Ok(())
}

/// A move onto a Target cell: elimination, offer or wrong-zone notice.
fn resolve_target(step: &mut Step<'_>, player: PlayerId, coin: CoinId, target: Cell) -> Result<()> {
    let Some(target_owner) = zones::target_owner(target) else {
        return Err(RuleError::InvalidMove {
            coin,
            destination: target,
        });
    };
    let scoring = *step
        .state
        .registry
        .get_owned(player, coin)
        .ok_or(RuleError::UnknownCoin { player, coin })?;

    if !scoring.can_score_in(target_owner) {
        let err = RuleError::InvalidElimination {
            coin,
            origin_side: scoring.origin_side,
            target_owner,
        };
        log::warn!("move_to rejected: {err}");
        step.state.selection = None;
        step.state.pending = PendingAction::AwaitingWrongZoneDismiss {
            player,
            coin,
            target_owner,
        };
        step.emit(GameEvent::MoveRejected(err));
        step.emit(GameEvent::WrongTargetZone {
            player,
            coin,
            target_owner,
        });
        return Ok(());
    }

    step.state.selection = None;
    if step.rules.confirm_eliminations {
        log::debug!("{} offered elimination of coin {coin}", step.name(player));
        step.state.pending = PendingAction::AwaitingEliminationConfirm {
            player,
            coin,
            target,
        };
        step.emit(GameEvent::EliminationOffered {
            player,
            coin,
            target,
        });
        return Ok(());
    }
    step.eliminate(player, coin, target)
}
