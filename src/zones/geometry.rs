//! Static board geometry.
//!
//! Every named region of the 13×13 board is a fixed table of cells. All
//! predicates here are pure and stateless.
//!
//! ```text
//!      1  2  3  4  5  6  7  8  9 10 11 12 13
//!  1   H  .  H  .  H  d  T  d  H  .  H  .  H     H = Home(1), T = Target(1)
//!  2   H  .  H  .  H  d  O  d  H  .  H  .  H     O = Observer(1), d = hint
//!  3   .  .  .  .  a  .  G  .  a  .  .  .  .     a = direct access, G = gateway
//!  ...
//!  6-8                X  X  X                    X = Forbidden
//!  ...
//! 11   .  .  .  .  a  .  G  .  a  .  .  .  .
//! 12   H  .  H  .  H  d  O  d  H  .  H  .  H     Home(2), Observer(2)
//! 13   H  .  H  .  H  d  T  d  H  .  H  .  H     Target(2)
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Cell, PlayerId};

/// Columns holding Home cells, identical for both players.
const HOME_COLUMNS: [u8; 6] = [1, 3, 5, 9, 11, 13];

/// Home cells each player owns.
pub const HOME_CELLS_PER_PLAYER: usize = HOME_COLUMNS.len() * 2;

const PLAYER_ONE_HOME_ROWS: [u8; 2] = [1, 2];
const PLAYER_TWO_HOME_ROWS: [u8; 2] = [12, 13];

/// Rows exempt from safety lines regardless of zone.
const BOUNDARY_ROWS: [u8; 4] = [1, 2, 12, 13];

const TARGET_CELLS: [Cell; 2] = [Cell::at(1, 7), Cell::at(13, 7)];
const OBSERVER_CELLS: [Cell; 2] = [Cell::at(2, 7), Cell::at(12, 7)];

const DIRECT_ACCESS_CELLS: [[Cell; 2]; 2] = [
    [Cell::at(3, 5), Cell::at(3, 9)],
    [Cell::at(11, 5), Cell::at(11, 9)],
];

/// Cells granting reach to every Observer and Target.
pub const SPECIAL_GATEWAY_CELLS: [Cell; 2] = [Cell::at(3, 7), Cell::at(11, 7)];

/// The eight corner cells. Corners only ever move diagonally.
pub const CORNER_CELLS: [Cell; 8] = [
    Cell::at(1, 1),
    Cell::at(2, 1),
    Cell::at(1, 13),
    Cell::at(2, 13),
    Cell::at(12, 1),
    Cell::at(13, 1),
    Cell::at(12, 13),
    Cell::at(13, 13),
];

/// Cells flanking a Target, paired with the Target owner they lead to.
pub const DIRECTIONAL_HINT_CELLS: [(Cell, PlayerId); 8] = [
    (Cell::at(2, 6), PlayerId::ONE),
    (Cell::at(2, 8), PlayerId::ONE),
    (Cell::at(1, 6), PlayerId::ONE),
    (Cell::at(1, 8), PlayerId::ONE),
    (Cell::at(12, 6), PlayerId::TWO),
    (Cell::at(12, 8), PlayerId::TWO),
    (Cell::at(13, 6), PlayerId::TWO),
    (Cell::at(13, 8), PlayerId::TWO),
];

const FORBIDDEN_ROWS: std::ops::RangeInclusive<u8> = 6..=8;
const FORBIDDEN_COLS: std::ops::RangeInclusive<u8> = 6..=8;

/// A named board region.
///
/// Regions overlap: every Corner is also a Home cell, and every Home,
/// Target, Observer and Forbidden cell is part of the BoundaryArea.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Home(PlayerId),
    Target(PlayerId),
    Observer(PlayerId),
    Forbidden,
    SpecialGateway,
    DirectionalHint,
    Corner,
    BoundaryArea,
}

impl Zone {
    /// Whether `cell` belongs to this region.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        match self {
            Zone::Home(p) => is_home(cell, p),
            Zone::Target(p) => is_target(cell, p),
            Zone::Observer(p) => is_observer(cell, p),
            Zone::Forbidden => is_forbidden(cell),
            Zone::SpecialGateway => is_special_gateway(cell),
            Zone::DirectionalHint => is_directional_hint(cell),
            Zone::Corner => is_corner(cell),
            Zone::BoundaryArea => is_boundary_area(cell),
        }
    }
}

/// The most specific region a cell belongs to, or `None` for open field.
///
/// Priority: Forbidden, Target, Observer, Home, SpecialGateway,
/// DirectionalHint. Corner and BoundaryArea are never returned here since
/// they only ever overlay other regions; use `zones_of` for every membership.
#[must_use]
pub fn zone_of(cell: Cell) -> Option<Zone> {
    if is_forbidden(cell) {
        return Some(Zone::Forbidden);
    }
    if let Some(owner) = target_owner(cell) {
        return Some(Zone::Target(owner));
    }
    if let Some(owner) = observer_owner(cell) {
        return Some(Zone::Observer(owner));
    }
    if let Some(owner) = home_owner(cell) {
        return Some(Zone::Home(owner));
    }
    if is_special_gateway(cell) {
        return Some(Zone::SpecialGateway);
    }
    if is_directional_hint(cell) {
        return Some(Zone::DirectionalHint);
    }
    None
}

/// Every region a cell belongs to.
#[must_use]
pub fn zones_of(cell: Cell) -> SmallVec<[Zone; 4]> {
    let mut zones = SmallVec::new();
    zones.extend(zone_of(cell));
    if is_corner(cell) {
        zones.push(Zone::Corner);
    }
    if is_boundary_area(cell) {
        zones.push(Zone::BoundaryArea);
    }
    zones
}

#[must_use]
pub fn is_forbidden(cell: Cell) -> bool {
    FORBIDDEN_ROWS.contains(&cell.row()) && FORBIDDEN_COLS.contains(&cell.col())
}

/// The owner of the Home cell at `cell`, if any.
#[must_use]
pub fn home_owner(cell: Cell) -> Option<PlayerId> {
    if !HOME_COLUMNS.contains(&cell.col()) {
        return None;
    }
    if PLAYER_ONE_HOME_ROWS.contains(&cell.row()) {
        Some(PlayerId::ONE)
    } else if PLAYER_TWO_HOME_ROWS.contains(&cell.row()) {
        Some(PlayerId::TWO)
    } else {
        None
    }
}

#[must_use]
pub fn is_home(cell: Cell, player: PlayerId) -> bool {
    home_owner(cell) == Some(player)
}

/// A player's Home cells, row-major.
pub fn home_cells(player: PlayerId) -> impl Iterator<Item = Cell> {
    let rows = if player == PlayerId::ONE {
        PLAYER_ONE_HOME_ROWS
    } else {
        PLAYER_TWO_HOME_ROWS
    };
    rows.into_iter()
        .flat_map(|row| HOME_COLUMNS.into_iter().map(move |col| Cell::at(row, col)))
}

#[must_use]
pub fn target_cell(player: PlayerId) -> Cell {
    TARGET_CELLS[player.index()]
}

/// The owner of the Target cell at `cell`, if any.
#[must_use]
pub fn target_owner(cell: Cell) -> Option<PlayerId> {
    PlayerId::BOTH.into_iter().find(|&p| target_cell(p) == cell)
}

#[must_use]
pub fn is_target(cell: Cell, player: PlayerId) -> bool {
    target_cell(player) == cell
}

#[must_use]
pub fn is_any_target(cell: Cell) -> bool {
    TARGET_CELLS.contains(&cell)
}

#[must_use]
pub fn observer_cell(player: PlayerId) -> Cell {
    OBSERVER_CELLS[player.index()]
}

/// The owner of the Observer cell at `cell`, if any.
#[must_use]
pub fn observer_owner(cell: Cell) -> Option<PlayerId> {
    PlayerId::BOTH.into_iter().find(|&p| observer_cell(p) == cell)
}

#[must_use]
pub fn is_observer(cell: Cell, player: PlayerId) -> bool {
    observer_cell(player) == cell
}

#[must_use]
pub fn is_any_observer(cell: Cell) -> bool {
    OBSERVER_CELLS.contains(&cell)
}

/// The two cells from which a player may jump straight to their own Target.
#[must_use]
pub fn direct_access_cells(player: PlayerId) -> [Cell; 2] {
    DIRECT_ACCESS_CELLS[player.index()]
}

#[must_use]
pub fn is_special_gateway(cell: Cell) -> bool {
    SPECIAL_GATEWAY_CELLS.contains(&cell)
}

#[must_use]
pub fn is_corner(cell: Cell) -> bool {
    CORNER_CELLS.contains(&cell)
}

#[must_use]
pub fn is_directional_hint(cell: Cell) -> bool {
    directional_hint_target(cell).is_some()
}

/// The Target owner a Directional-Hint cell leads to.
#[must_use]
pub fn directional_hint_target(cell: Cell) -> Option<PlayerId> {
    DIRECTIONAL_HINT_CELLS
        .iter()
        .find(|(hint, _)| *hint == cell)
        .map(|&(_, owner)| owner)
}

/// Cells where safety lines never apply.
///
/// Rows 1, 2, 12 and 13 plus every Home, Target, Observer and Forbidden cell.
#[must_use]
pub fn is_boundary_area(cell: Cell) -> bool {
    BOUNDARY_ROWS.contains(&cell.row())
        || home_owner(cell).is_some()
        || is_any_target(cell)
        || is_any_observer(cell)
        || is_forbidden(cell)
}

/// Whether a coin of `player` at `cell` has advanced into open territory.
#[must_use]
pub fn has_crossed_boundary(cell: Cell, player: PlayerId) -> bool {
    !is_home(cell, player) && !is_boundary_area(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_cells() {
        for player in PlayerId::BOTH {
            let cells: Vec<_> = home_cells(player).collect();
            assert_eq!(cells.len(), HOME_CELLS_PER_PLAYER);
            assert!(cells.iter().all(|&c| is_home(c, player)));
            assert!(cells.iter().all(|&c| !is_home(c, player.opponent())));
        }
        assert_eq!(home_owner(Cell::at(1, 7)), None);
        assert_eq!(home_owner(Cell::at(13, 11)), Some(PlayerId::TWO));
    }

    #[test]
    fn test_forbidden_block() {
        let forbidden: Vec<_> = Cell::all().filter(|&c| is_forbidden(c)).collect();
        assert_eq!(forbidden.len(), 9);
        assert!(is_forbidden(Cell::at(7, 7)));
        assert!(!is_forbidden(Cell::at(5, 7)));
    }

    #[test]
    fn test_targets_and_observers() {
        assert_eq!(target_cell(PlayerId::ONE), Cell::at(1, 7));
        assert_eq!(target_cell(PlayerId::TWO), Cell::at(13, 7));
        assert_eq!(observer_cell(PlayerId::ONE), Cell::at(2, 7));
        assert_eq!(observer_cell(PlayerId::TWO), Cell::at(12, 7));
        assert_eq!(target_owner(Cell::at(13, 7)), Some(PlayerId::TWO));
        assert_eq!(observer_owner(Cell::at(13, 7)), None);
    }

    #[test]
    fn test_zone_of_priorities() {
        assert_eq!(zone_of(Cell::at(7, 7)), Some(Zone::Forbidden));
        assert_eq!(zone_of(Cell::at(1, 7)), Some(Zone::Target(PlayerId::ONE)));
        assert_eq!(zone_of(Cell::at(12, 7)), Some(Zone::Observer(PlayerId::TWO)));
        assert_eq!(zone_of(Cell::at(1, 1)), Some(Zone::Home(PlayerId::ONE)));
        assert_eq!(zone_of(Cell::at(11, 7)), Some(Zone::SpecialGateway));
        assert_eq!(zone_of(Cell::at(12, 8)), Some(Zone::DirectionalHint));
        assert_eq!(zone_of(Cell::at(5, 4)), None);
    }

    #[test]
    fn test_zones_of_overlaps() {
        let corner = zones_of(Cell::at(13, 13));
        assert!(corner.contains(&Zone::Home(PlayerId::TWO)));
        assert!(corner.contains(&Zone::Corner));
        assert!(corner.contains(&Zone::BoundaryArea));

        for cell in Cell::all() {
            for zone in zones_of(cell) {
                assert!(zone.contains(cell), "{zone:?} should contain {cell}");
            }
        }
    }

    #[test]
    fn test_corners_are_home_cells() {
        for corner in CORNER_CELLS {
            assert!(home_owner(corner).is_some());
        }
    }

    #[test]
    fn test_boundary_area() {
        assert!(is_boundary_area(Cell::at(2, 4)));
        assert!(is_boundary_area(Cell::at(12, 10)));
        assert!(is_boundary_area(Cell::at(7, 6)));
        assert!(!is_boundary_area(Cell::at(3, 7)));
        assert!(!is_boundary_area(Cell::at(5, 5)));
        assert!(!is_boundary_area(Cell::at(11, 1)));
    }

    #[test]
    fn test_has_crossed_boundary_never_in_home_or_boundary() {
        for player in PlayerId::BOTH {
            for cell in Cell::all() {
                if is_home(cell, player) || is_boundary_area(cell) {
                    assert!(!has_crossed_boundary(cell, player));
                }
            }
        }
        assert!(has_crossed_boundary(Cell::at(4, 4), PlayerId::ONE));
        assert!(has_crossed_boundary(Cell::at(4, 4), PlayerId::TWO));
    }

    #[test]
    fn test_directional_hints() {
        assert_eq!(directional_hint_target(Cell::at(2, 6)), Some(PlayerId::ONE));
        assert_eq!(directional_hint_target(Cell::at(13, 8)), Some(PlayerId::TWO));
        assert_eq!(directional_hint_target(Cell::at(3, 6)), None);
        assert!(DIRECTIONAL_HINT_CELLS.iter().all(|(c, _)| !is_corner(*c)));
    }

    #[test]
    fn test_direct_access_cells() {
        assert_eq!(direct_access_cells(PlayerId::ONE), [Cell::at(3, 5), Cell::at(3, 9)]);
        assert_eq!(direct_access_cells(PlayerId::TWO), [Cell::at(11, 5), Cell::at(11, 9)]);
    }
}
