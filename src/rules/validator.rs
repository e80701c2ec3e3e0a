//! Destination validator.
//!
//! Stateless occupancy check applied to every raw move candidate:
//!
//! | Destination | Accepted when |
//! |---|---|
//! | Forbidden | never |
//! | Observer or Target | no opposing coin is there (own coins may stack) |
//! | anything else | the cell is empty |

use crate::coins::Occupancy;
use crate::core::{Cell, PlayerId};
use crate::zones;

/// Whether a coin of `mover` may end its move on `cell`.
///
/// ```
/// use rust_asude::coins::CoinRegistry;
/// use rust_asude::core::{Cell, PlayerId};
/// use rust_asude::rules::validate_destination;
///
/// let occupancy = CoinRegistry::new().occupancy();
/// assert!(validate_destination(Cell::new(4, 4).unwrap(), PlayerId::ONE, &occupancy));
/// assert!(!validate_destination(Cell::new(7, 7).unwrap(), PlayerId::ONE, &occupancy));
/// ```
#[must_use]
pub fn validate_destination(cell: Cell, mover: PlayerId, occupancy: &Occupancy) -> bool {
    if zones::is_forbidden(cell) {
        return false;
    }
    if zones::is_any_observer(cell) || zones::is_any_target(cell) {
        return !occupancy.has_opponent_of(mover, cell);
    }
    occupancy.is_vacant(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coins::CoinRegistry;
    use crate::core::{Coin, CoinId, PlacementMode};

    fn registry_with(coins: &[(u16, PlayerId, u8, u8)]) -> CoinRegistry {
        let mut registry = CoinRegistry::new();
        for &(id, owner, row, col) in coins {
            registry.insert(Coin::placed(
                CoinId::new(id),
                owner,
                Cell::at(row, col),
                PlacementMode::Home,
            ));
        }
        registry
    }

    #[test]
    fn test_forbidden_always_rejected() {
        let occupancy = CoinRegistry::new().occupancy();
        for row in 6..=8 {
            for col in 6..=8 {
                assert!(!validate_destination(Cell::at(row, col), PlayerId::ONE, &occupancy));
                assert!(!validate_destination(Cell::at(row, col), PlayerId::TWO, &occupancy));
            }
        }
    }

    #[test]
    fn test_target_and_observer_stack_for_owner_only() {
        let occupancy = registry_with(&[(1, PlayerId::ONE, 13, 7), (2, PlayerId::ONE, 2, 7)])
            .occupancy();

        assert!(validate_destination(Cell::at(13, 7), PlayerId::ONE, &occupancy));
        assert!(!validate_destination(Cell::at(13, 7), PlayerId::TWO, &occupancy));
        assert!(validate_destination(Cell::at(2, 7), PlayerId::ONE, &occupancy));
        assert!(!validate_destination(Cell::at(2, 7), PlayerId::TWO, &occupancy));
        assert!(validate_destination(Cell::at(1, 7), PlayerId::TWO, &occupancy));
    }

    #[test]
    fn test_other_cells_must_be_empty() {
        let occupancy = registry_with(&[(1, PlayerId::ONE, 1, 3), (9, PlayerId::TWO, 5, 5)])
            .occupancy();

        // Own occupied Home cell
        assert!(!validate_destination(Cell::at(1, 3), PlayerId::ONE, &occupancy));
        // Empty Home cell
        assert!(validate_destination(Cell::at(1, 5), PlayerId::ONE, &occupancy));
        // Open field
        assert!(!validate_destination(Cell::at(5, 5), PlayerId::ONE, &occupancy));
        assert!(!validate_destination(Cell::at(5, 5), PlayerId::TWO, &occupancy));
        assert!(validate_destination(Cell::at(4, 4), PlayerId::TWO, &occupancy));
    }
}
