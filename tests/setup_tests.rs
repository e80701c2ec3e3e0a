//! Setup placement tests.
//!
//! These tests drive the placement protocol through the public `Match`
//! API: mode switching, rejections and the single SETUP -> PLAYING
//! transition.

mod common;

use common::{cell, complete_setup, count_kind, kinds};
use rust_asude::core::{
    CoinId, ManualClock, MatchConfig, PhaseKind, PlacementMode, PlayerId, RuleError,
};
use rust_asude::engine::Match;
use rust_asude::events::{EventKind, GameEvent};

fn new_match(n: u8) -> Match {
    let mut game = Match::new().with_clock(ManualClock::new());
    game.configure(["Asude", "Deniz"], n).unwrap();
    game.start_game().unwrap();
    game.drain_events();
    game
}

/// Player 1 places 4 Target coins then 4 Home coins; the ninth placement
/// belongs to Player 2 in Target mode.
#[test]
fn test_mode_switches_after_player_one() {
    let mut game = new_match(8);

    for i in 0..4 {
        let status = game.placement_status().unwrap();
        assert_eq!(status.player, PlayerId::ONE);
        assert_eq!(status.mode, PlacementMode::Target);
        assert_eq!(status.remaining_in_mode, 4 - i);
        game.move_to(13, 7).unwrap();
    }
    for (i, col) in [1, 3, 5, 9].into_iter().enumerate() {
        let status = game.placement_status().unwrap();
        assert_eq!(status.player, PlayerId::ONE);
        assert_eq!(status.mode, PlacementMode::Home);
        assert_eq!(usize::from(status.remaining_in_mode), 4 - i);
        game.move_to(1, col).unwrap();
    }

    let status = game.placement_status().unwrap();
    assert_eq!(status.player, PlayerId::TWO);
    assert_eq!(status.mode, PlacementMode::Target);
    assert_eq!(status.total_placed, 8);
    assert_eq!(game.snapshot().turn, PlayerId::TWO);

    // Four Target-mode coins stack on one cell
    let stacked = game.snapshot().registry.coins_at(cell(13, 7)).count();
    assert_eq!(stacked, 4);
}

/// Coin IDs follow placement order per player.
#[test]
fn test_coin_ids_follow_placement_order() {
    let mut game = new_match(4);
    complete_setup(&mut game, 4);

    let registry = &game.snapshot().registry;
    let p1: Vec<_> = registry.coins_of(PlayerId::ONE).map(|c| c.id).collect();
    let p2: Vec<_> = registry.coins_of(PlayerId::TWO).map(|c| c.id).collect();
    assert_eq!(p1, (1..=4).map(CoinId::new).collect::<Vec<_>>());
    assert_eq!(p2, (5..=8).map(CoinId::new).collect::<Vec<_>>());

    // Target-mode coins represent the opponent's side
    assert_eq!(registry.get(CoinId::new(1)).unwrap().origin_side, PlayerId::TWO);
    assert_eq!(registry.get(CoinId::new(3)).unwrap().origin_side, PlayerId::ONE);
    assert_eq!(registry.get(CoinId::new(5)).unwrap().origin_side, PlayerId::ONE);
    assert_eq!(registry.get(CoinId::new(7)).unwrap().origin_side, PlayerId::TWO);
}

/// A rejected placement is reported and changes nothing.
#[test]
fn test_invalid_placement_reported() {
    let mut game = new_match(4);
    let before = game.snapshot().clone();

    let err = game.move_to(1, 7).unwrap_err();
    assert!(matches!(
        err,
        RuleError::InvalidPlacement {
            player: PlayerId::ONE,
            mode: PlacementMode::Target,
            ..
        }
    ));
    assert_eq!(game.snapshot(), &before);

    let events = game.drain_events();
    assert_eq!(kinds(&events), vec![EventKind::MoveRejected]);
}

/// Home placements need an empty cell of the player's own Home zone.
#[test]
fn test_home_placement_rules() {
    let mut game = new_match(4);
    game.move_to(13, 7).unwrap();
    game.move_to(13, 7).unwrap();
    game.move_to(2, 11).unwrap();

    // Occupied
    assert!(game.move_to(2, 11).is_err());
    // Opponent home
    assert!(game.move_to(12, 11).is_err());
    // Not a home cell
    assert!(game.move_to(2, 12).is_err());
    // Forbidden
    assert!(game.move_to(7, 7).is_err());

    assert_eq!(game.placement_status().unwrap().total_placed, 3);
    game.move_to(1, 13).unwrap();
    assert_eq!(game.placement_status().unwrap().player, PlayerId::TWO);
}

/// SETUP -> PLAYING fires once, on the last placement.
#[test]
fn test_single_transition_to_playing() {
    let mut game = new_match(4);
    complete_setup(&mut game, 4);

    let events = game.drain_events();
    assert_eq!(count_kind(&events, EventKind::CoinPlaced), 8);
    assert_eq!(count_kind(&events, EventKind::PhaseChanged), 1);
    assert!(events.contains(&GameEvent::PhaseChanged {
        from: PhaseKind::Setup,
        to: PhaseKind::Playing
    }));

    // The phase change follows the last placement
    let placed = events
        .iter()
        .rposition(|e| e.kind() == EventKind::CoinPlaced)
        .unwrap();
    let changed = events
        .iter()
        .position(|e| e.kind() == EventKind::PhaseChanged)
        .unwrap();
    assert!(changed > placed);

    let state = game.snapshot();
    assert_eq!(state.phase_kind(), PhaseKind::Playing);
    assert_eq!(state.turn, PlayerId::ONE);
    assert!(game.placement_status().is_none());
}

/// Every accepted placement is followed by a snapshot event.
#[test]
fn test_placement_events() {
    let mut game = new_match(2);
    game.move_to(13, 7).unwrap();

    let events = game.drain_events();
    assert_eq!(
        events[0],
        GameEvent::CoinPlaced {
            player: PlayerId::ONE,
            coin: CoinId::new(1),
            cell: cell(13, 7),
            mode: PlacementMode::Target,
        }
    );
    let snapshot = events[1].snapshot().unwrap();
    assert_eq!(snapshot.setup.total_placed(), 1);
}

/// Configuration can come from TOML.
#[test]
fn test_configure_from_toml() {
    let config = MatchConfig::from_toml_str(
        r#"
        player_names = ["Asude", "Deniz"]

        [rules]
        coins_per_player = 6
        safety_line_delay_ms = 0
        "#,
    )
    .unwrap();

    let mut game = Match::with_config(config).unwrap();
    game.start_game().unwrap();
    complete_setup(&mut game, 6);
    assert_eq!(game.snapshot().registry.len(), 12);
    assert_eq!(game.config().player_name(PlayerId::TWO), "Deniz");
}

/// Odd coin counts are refused before setup starts.
#[test]
fn test_invalid_coin_count() {
    let mut game = Match::new();
    assert!(matches!(
        game.configure(["A", "B"], 5),
        Err(RuleError::InvalidConfig(_))
    ));
    assert_eq!(game.snapshot().coins_per_player(), 8);
}
