//! Snapshot persistence and resumption tests.

mod common;

use common::{complete_setup, home_coin};
use rust_asude::core::{
    CoinId, GameState, ManualClock, MatchConfig, Phase, PlayerId, RuleConfig, RuleError,
};
use rust_asude::coins::SetupProgress;
use rust_asude::engine::Match;

/// A mid-game snapshot survives a JSON round trip and play continues from it.
#[test]
fn test_resume_from_serialized_snapshot() {
    let mut game = Match::new().with_clock(ManualClock::new());
    game.configure(["Asude", "Deniz"], 4).unwrap();
    game.start_game().unwrap();
    complete_setup(&mut game, 4);
    game.select(PlayerId::ONE, CoinId::new(3)).unwrap();
    game.move_to(2, 2).unwrap();

    let json = serde_json::to_string(game.snapshot()).unwrap();
    let state: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(&state, game.snapshot());

    let mut resumed = Match::from_snapshot(game.config().clone(), state)
        .unwrap()
        .with_clock(ManualClock::new());
    assert_eq!(resumed.snapshot().turn, PlayerId::TWO);
    assert_eq!(resumed.snapshot().history.len(), 1);

    resumed.select(PlayerId::TWO, CoinId::new(7)).unwrap();
    resumed.move_to(12, 2).unwrap();
    assert_eq!(resumed.snapshot().turn, PlayerId::ONE);
}

/// Snapshots built for another coin count are refused.
#[test]
fn test_coin_count_mismatch() {
    let state = GameState::new(6);
    let config = MatchConfig::new().with_rules(RuleConfig::new().with_coins_per_player(4));
    assert!(matches!(
        Match::from_snapshot(config, state),
        Err(RuleError::InvalidConfig(_))
    ));
}

/// Snapshots breaking the board layout are refused.
#[test]
fn test_layout_violations_refused() {
    let config = MatchConfig::new();

    let mut state = GameState::new(8);
    state.phase = Phase::Playing;
    state.registry.insert(home_coin(1, PlayerId::ONE, 7, 7));
    assert!(Match::from_snapshot(config.clone(), state).is_err());

    let mut state = GameState::new(8);
    state.phase = Phase::Playing;
    state.registry.insert(home_coin(1, PlayerId::ONE, 13, 7));
    state.registry.insert(home_coin(9, PlayerId::TWO, 13, 7));
    assert!(Match::from_snapshot(config.clone(), state).is_err());

    let mut state = GameState::new(8);
    state.phase = Phase::Playing;
    state.registry.insert(home_coin(1, PlayerId::ONE, 4, 4));
    state.registry.insert(home_coin(2, PlayerId::ONE, 4, 4));
    assert!(Match::from_snapshot(config, state).is_err());
}

/// Stale safety lines in a snapshot are recomputed on resume.
#[test]
fn test_safety_lines_rebuilt_on_resume() {
    let mut state = GameState::new(8);
    state.phase = Phase::Playing;
    state.registry.insert(home_coin(1, PlayerId::ONE, 5, 3));
    state.registry.insert(home_coin(9, PlayerId::TWO, 13, 1));
    assert!(state.safety_lines[PlayerId::ONE].is_empty());

    let game = Match::from_snapshot(MatchConfig::new(), state).unwrap();
    assert_eq!(game.snapshot().safety_lines[PlayerId::ONE].len(), 5);
}

/// A snapshot still marked `Playing` after someone has won is refused.
#[test]
fn test_decided_playing_snapshot_refused() {
    let playing = || {
        let mut state = GameState::new(2);
        state.phase = Phase::Playing;
        state.registry.insert(home_coin(1, PlayerId::ONE, 1, 1));
        state.registry.insert(home_coin(3, PlayerId::TWO, 13, 1));
        state
    };
    let config = MatchConfig::new().with_rules(RuleConfig::new().with_coins_per_player(2));
    assert!(Match::from_snapshot(config.clone(), playing()).is_ok());

    // Score already at N
    let mut state = playing();
    state.scores[PlayerId::TWO] = 2;
    assert!(matches!(
        Match::from_snapshot(config.clone(), state),
        Err(RuleError::InvalidConfig(_))
    ));

    // Player 1 has no coins left
    let mut state = playing();
    state.registry.remove(CoinId::new(1));
    assert!(Match::from_snapshot(config.clone(), state).is_err());

    // Score beyond N, even once the game is over
    let mut state = playing();
    state.scores[PlayerId::ONE] = 3;
    state.phase = Phase::Terminal {
        winner: PlayerId::ONE,
    };
    assert!(Match::from_snapshot(config.clone(), state).is_err());

    // A finished game resumes as finished
    let mut state = playing();
    state.scores[PlayerId::ONE] = 2;
    state.phase = Phase::Terminal {
        winner: PlayerId::ONE,
    };
    let game = Match::from_snapshot(config, state).unwrap();
    assert_eq!(game.snapshot().winner(), Some(PlayerId::ONE));
}

/// The setup counter must agree with the configured coin count.
#[test]
fn test_setup_coin_count_mismatch() {
    let mut state = GameState::new(4);
    state.setup = SetupProgress::new(6);
    let config = MatchConfig::new().with_rules(RuleConfig::new().with_coins_per_player(4));
    assert!(matches!(
        Match::from_snapshot(config, state),
        Err(RuleError::InvalidConfig(_))
    ));
}
