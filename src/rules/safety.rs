//! Safety-line calculator.
//!
//! A coin that has crossed out of its owner's Home and the BoundaryArea
//! projects a trap pattern relative to its owner's forward direction `f`:
//!
//! ```text
//!   (f,-1)  (f,0)  (f,+1)
//!   (0,-1)  coin   (0,+1)
//! ```
//!
//! Pattern cells off the board or inside the BoundaryArea are dropped. A
//! player's safety line is the union over all their crossed coins. An
//! opponent coin landing on one of these cells is rolled back and the
//! line's owner scores.
//!
//! The lines are always rebuilt from scratch, so the result depends only on
//! the registry contents.

use im::OrdSet;

use crate::coins::CoinRegistry;
use crate::core::{Cell, PlayerId, PlayerMap};
use crate::zones;

/// Offsets of the trap pattern as `(row_steps_forward, col)`.
const PATTERN: [(i8, i8); 5] = [(1, 0), (0, -1), (0, 1), (1, -1), (1, 1)];

/// Trap cells projected by one coin of `owner` standing on `cell`.
///
/// Empty when the coin has not crossed the boundary.
pub fn trap_cells(cell: Cell, owner: PlayerId) -> impl Iterator<Item = Cell> {
    let crossed = zones::has_crossed_boundary(cell, owner);
    let forward = owner.forward();
    PATTERN
        .into_iter()
        .filter(move |_| crossed)
        .filter_map(move |(d_row, d_col)| cell.offset(d_row * forward, d_col))
        .filter(|&c| !zones::is_boundary_area(c))
}

/// Rebuild both players' safety lines.
#[must_use]
pub fn rebuild_safety_lines(registry: &CoinRegistry) -> PlayerMap<OrdSet<Cell>> {
    let mut lines: PlayerMap<OrdSet<Cell>> = PlayerMap::with_value(OrdSet::new());
    for coin in registry.iter() {
        for cell in trap_cells(coin.position, coin.owner) {
            lines[coin.owner].insert(cell);
        }
    }
    for (player, cells) in lines.iter() {
        log::trace!("{player} safety line: {} cells", cells.len());
    }
    lines
}
