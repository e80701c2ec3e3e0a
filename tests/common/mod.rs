//! Shared fixtures for integration tests.

#![allow(dead_code)]

use rust_asude::core::{
    Cell, Coin, CoinId, GameState, ManualClock, MatchConfig, Phase, PlacementMode, PlayerId,
    RuleConfig,
};
use rust_asude::engine::Match;
use rust_asude::events::{EventKind, GameEvent};

pub fn cell(row: u8, col: u8) -> Cell {
    Cell::new(row, col).unwrap()
}

/// A coin as placed during setup.
pub fn coin(id: u16, owner: PlayerId, row: u8, col: u8, mode: PlacementMode) -> Coin {
    Coin::placed(CoinId::new(id), owner, cell(row, col), mode)
}

/// A coin placed in its owner's Home (origin side = owner).
pub fn home_coin(id: u16, owner: PlayerId, row: u8, col: u8) -> Coin {
    coin(id, owner, row, col, PlacementMode::Home)
}

/// A `Playing` match with exactly these coins, Player 1 to move.
pub fn playing_with(rules: RuleConfig, coins: &[Coin], clock: &ManualClock) -> Match {
    let mut state = GameState::new(rules.coins_per_player);
    state.phase = Phase::Playing;
    for &c in coins {
        assert!(state.registry.insert(c));
    }
    let config = MatchConfig::new().with_rules(rules);
    Match::from_snapshot(config, state)
        .unwrap()
        .with_clock(clock.clone())
}

/// Run the full setup for `n` coins each with the simplest legal layout.
pub fn complete_setup(game: &mut Match, n: u8) {
    let home_cols = [1u8, 3, 5, 9, 11, 13];
    for player in PlayerId::BOTH {
        let opponent_target = if player == PlayerId::ONE { (13, 7) } else { (1, 7) };
        let home_rows = if player == PlayerId::ONE { [1u8, 2] } else { [13, 12] };
        for _ in 0..n / 2 {
            game.move_to(opponent_target.0, opponent_target.1).unwrap();
        }
        let homes = home_rows
            .iter()
            .flat_map(|&r| home_cols.iter().map(move |&c| (r, c)));
        for (r, c) in homes.take(usize::from(n / 2)) {
            game.move_to(r, c).unwrap();
        }
    }
}

pub fn kinds(events: &[GameEvent]) -> Vec<EventKind> {
    events.iter().map(GameEvent::kind).collect()
}

pub fn count_kind(events: &[GameEvent], kind: EventKind) -> usize {
    events.iter().filter(|e| e.kind() == kind).count()
}
