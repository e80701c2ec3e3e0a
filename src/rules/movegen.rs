//! Move generator.
//!
//! Movement is described by a declarative table, `MOVE_RULES`. Each entry
//! pairs a predicate on the mover's cell with a generator of raw candidate
//! destinations. Every applicable entry contributes; order does not matter
//! for legality, only for the order destinations are reported in.
//!
//! ## Pipeline
//!
//! 1. Collect raw candidates from every applicable rule
//! 2. Drop candidates the destination validator rejects
//! 3. Remove duplicates, keeping first occurrence
//! 4. Apply the coin-type filter
//!
//! `reachable_destinations` stops after step 3. `legal_destinations` runs
//! the full pipeline.
//!
//! Step 2 applies to every rule, including the jumps onto a Target
//! (observer-exit, crossing-capture, direct-access). An opponent's
//! setup stack on a Target therefore blocks those jumps until it has
//! left. Earlier versions of the game let these three jumps skip the
//! occupancy check; this is intentional and must stay uniform.
//!
//! ## Coin-type filter
//!
//! - A coin placed on the opponent's side (`origin_side != owner`) may never
//!   enter its owner's Home zone.
//! - A coin without observer power may not enter the Target of its own
//!   `origin_side`.

use smallvec::SmallVec;

use super::validator::validate_destination;
use crate::coins::{CoinRegistry, Occupancy};
use crate::core::{Cell, Coin, Destinations, PlayerId};
use crate::zones;

/// Raw candidates produced by one rule.
pub type Candidates = SmallVec<[Cell; 8]>;

/// Per-rule raw output, for applicable rules only.
pub type RuleCandidates = SmallVec<[(&'static str, Candidates); 8]>;

/// One entry of the movement rule catalog.
#[derive(Clone, Copy)]
pub struct MoveRule {
    /// Stable rule name.
    pub name: &'static str,

    /// Whether the rule applies to a coin of `player` on `cell`.
    pub applies: fn(Cell, PlayerId, &Occupancy) -> bool,

    /// Raw destinations offered when the rule applies.
    pub destinations: fn(Cell, PlayerId) -> Candidates,
}

impl std::fmt::Debug for MoveRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveRule").field("name", &self.name).finish()
    }
}

const DIAGONALS: [(i8, i8); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];

/// The movement rule catalog.
pub static MOVE_RULES: [MoveRule; 8] = [
    MoveRule {
        name: "diagonal-step",
        applies: |_, _, _| true,
        destinations: diagonal_steps,
    },
    MoveRule {
        name: "observer-reach",
        applies: |cell, player, _| {
            !zones::is_corner(cell)
                && matches!(
                    cell.diagonal_distance(zones::observer_cell(player)),
                    Some(1 | 2)
                )
        },
        destinations: |_, player| Candidates::from_slice(&[zones::observer_cell(player)]),
    },
    MoveRule {
        name: "observer-exit",
        applies: |cell, player, _| zones::is_observer(cell, player),
        destinations: |cell, player| {
            let mut out = Candidates::new();
            out.push(zones::target_cell(player));
            out.extend(cell.offset(-player.forward(), 0));
            out
        },
    },
    MoveRule {
        name: "directional-hint",
        applies: |cell, _, _| !zones::is_corner(cell) && zones::is_directional_hint(cell),
        destinations: |cell, _| {
            zones::geometry::directional_hint_target(cell)
                .map(zones::target_cell)
                .into_iter()
                .collect()
        },
    },
    MoveRule {
        name: "crossing-capture",
        applies: |cell, player, occupancy| {
            cell.orthogonal_between(zones::target_cell(player))
                .any(|between| occupancy.has_opponent_of(player, between))
        },
        destinations: |_, player| Candidates::from_slice(&[zones::target_cell(player)]),
    },
    MoveRule {
        name: "direct-access",
        applies: |cell, player, _| zones::direct_access_cells(player).contains(&cell),
        destinations: |_, player| Candidates::from_slice(&[zones::target_cell(player)]),
    },
    MoveRule {
        name: "special-gateway",
        applies: |cell, _, _| zones::is_special_gateway(cell),
        destinations: |_, _| {
            Candidates::from_slice(&[
                zones::observer_cell(PlayerId::ONE),
                zones::observer_cell(PlayerId::TWO),
                zones::target_cell(PlayerId::ONE),
                zones::target_cell(PlayerId::TWO),
            ])
        },
    },
    MoveRule {
        name: "target-reach",
        applies: |_, _, _| true,
        destinations: |cell, _| {
            PlayerId::BOTH
                .into_iter()
                .map(zones::target_cell)
                .filter(|&target| matches!(cell.diagonal_distance(target), Some(1 | 2)))
                .collect()
        },
    },
];

fn diagonal_steps(cell: Cell, _: PlayerId) -> Candidates {
    (1..=2i8)
        .flat_map(|steps| {
            DIAGONALS
                .into_iter()
                .map(move |(d_row, d_col)| (d_row * steps, d_col * steps))
        })
        .filter_map(|(d_row, d_col)| cell.offset(d_row, d_col))
        .collect()
}

/// Look up a rule by name.
#[must_use]
pub fn rule(name: &str) -> Option<&'static MoveRule> {
    MOVE_RULES.iter().find(|rule| rule.name == name)
}

/// Raw candidates from each applicable rule, before validation.
#[must_use]
pub fn candidates_by_rule(coin: &Coin, occupancy: &Occupancy) -> RuleCandidates {
    MOVE_RULES
        .iter()
        .filter(|rule| (rule.applies)(coin.position, coin.owner, occupancy))
        .map(|rule| (rule.name, (rule.destinations)(coin.position, coin.owner)))
        .collect()
}

/// Validated, deduplicated destinations before the coin-type filter.
#[must_use]
pub fn reachable_destinations(coin: &Coin, registry: &CoinRegistry) -> Destinations {
    let occupancy = registry.occupancy();
    let mut out = Destinations::new();
    for (name, candidates) in candidates_by_rule(coin, &occupancy) {
        log::trace!("coin {} at {}: {name} offers {candidates:?}", coin.id, coin.position);
        for cell in candidates {
            if !out.contains(&cell) && validate_destination(cell, coin.owner, &occupancy) {
                out.push(cell);
            }
        }
    }
    out
}

/// Whether the coin-type filter lets `coin` end a move on `cell`.
#[must_use]
pub fn passes_coin_filter(coin: &Coin, cell: Cell) -> bool {
    if coin.is_target_coin() && zones::is_home(cell, coin.owner) {
        return false;
    }
    if !coin.observer_power && zones::is_target(cell, coin.origin_side) {
        return false;
    }
    true
}

/// Destinations `coin` may legally move to.
///
/// ```
/// use rust_asude::coins::CoinRegistry;
/// use rust_asude::core::{Cell, Coin, CoinId, PlacementMode, PlayerId};
/// use rust_asude::rules::legal_destinations;
///
/// let coin = Coin::placed(
///     CoinId::new(5),
///     PlayerId::ONE,
///     Cell::new(2, 3).unwrap(),
///     PlacementMode::Home,
/// );
/// let mut registry = CoinRegistry::new();
/// registry.insert(coin);
///
/// let moves = legal_destinations(&coin, &registry);
/// assert!(moves.contains(&Cell::new(3, 4).unwrap()));
/// assert!(moves.contains(&Cell::new(4, 5).unwrap()));
/// ```
#[must_use]
pub fn legal_destinations(coin: &Coin, registry: &CoinRegistry) -> Destinations {
    let mut out = reachable_destinations(coin, registry);
    out.retain(|cell| passes_coin_filter(coin, *cell));
    out
}

/// Whether `cell` is a Target the coin can reach but may not score in.
///
/// Such attempts surface a wrong-zone notice instead of a plain rejection.
#[must_use]
pub fn is_wrong_zone_attempt(coin: &Coin, cell: Cell, registry: &CoinRegistry) -> bool {
    zones::is_any_target(cell)
        && !passes_coin_filter(coin, cell)
        && reachable_destinations(coin, registry).contains(&cell)
}
