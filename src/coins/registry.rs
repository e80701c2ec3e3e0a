//! Coin registry: every coin currently on the board.
//!
//! Backed by `im::OrdMap` so that cloning a registry into the next snapshot
//! is O(1) and iteration follows coin-ID order, which is also each player's
//! placement order.

use im::OrdMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Cell, Coin, CoinId, PlayerId};
use crate::zones;

/// Owners of the coins stacked on one cell.
pub type Occupants = SmallVec<[PlayerId; 4]>;

/// Registry of coins on the board.
///
/// ## Example
///
/// ```
/// use rust_asude::coins::CoinRegistry;
/// use rust_asude::core::{Cell, Coin, CoinId, PlacementMode, PlayerId};
///
/// let mut registry = CoinRegistry::new();
/// let cell = Cell::new(13, 7).unwrap();
/// registry.insert(Coin::placed(CoinId::new(1), PlayerId::ONE, cell, PlacementMode::Target));
///
/// assert_eq!(registry.coins_at(cell).count(), 1);
/// assert_eq!(registry.count(PlayerId::ONE), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRegistry {
    coins: OrdMap<CoinId, Coin>,
}

impl CoinRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a coin. Returns `false` and leaves the registry unchanged when
    /// the ID is already present.
    pub fn insert(&mut self, coin: Coin) -> bool {
        if self.coins.contains_key(&coin.id) {
            return false;
        }
        self.coins.insert(coin.id, coin);
        true
    }

    /// Get a coin by ID.
    #[must_use]
    pub fn get(&self, id: CoinId) -> Option<&Coin> {
        self.coins.get(&id)
    }

    /// Get a coin by ID, only if `player` owns it.
    #[must_use]
    pub fn get_owned(&self, player: PlayerId, id: CoinId) -> Option<&Coin> {
        self.get(id).filter(|coin| coin.owner == player)
    }

    /// Replace a coin's stored data. Returns the previous value.
    pub fn update(&mut self, coin: Coin) -> Option<Coin> {
        if !self.coins.contains_key(&coin.id) {
            return None;
        }
        self.coins.insert(coin.id, coin)
    }

    /// Move a coin to `cell`. Returns the coin as it was before the move.
    pub fn relocate(&mut self, id: CoinId, cell: Cell) -> Option<Coin> {
        let coin = *self.coins.get(&id)?;
        self.coins.insert(id, coin.moved_to(cell));
        Some(coin)
    }

    /// Remove a coin from the board entirely.
    pub fn remove(&mut self, id: CoinId) -> Option<Coin> {
        self.coins.remove(&id)
    }

    /// All coins in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.coins.values()
    }

    /// A player's coins in ID order.
    pub fn coins_of(&self, player: PlayerId) -> impl Iterator<Item = &Coin> {
        self.coins.values().filter(move |coin| coin.owner == player)
    }

    /// Coins on `cell`, any owner.
    pub fn coins_at(&self, cell: Cell) -> impl Iterator<Item = &Coin> {
        self.coins.values().filter(move |coin| coin.position == cell)
    }

    /// Whether no coin occupies `cell`.
    #[must_use]
    pub fn is_vacant(&self, cell: Cell) -> bool {
        self.coins_at(cell).next().is_none()
    }

    /// Whether `player` has a coin on `cell`.
    #[must_use]
    pub fn has_coin_of(&self, player: PlayerId, cell: Cell) -> bool {
        self.coins_at(cell).any(|coin| coin.owner == player)
    }

    /// Number of coins a player still has on the board.
    #[must_use]
    pub fn count(&self, player: PlayerId) -> usize {
        self.coins_of(player).count()
    }

    /// Total number of coins on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coins.len()
    }

    /// Whether the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Build a cell → owners index for repeated occupancy lookups.
    #[must_use]
    pub fn occupancy(&self) -> Occupancy {
        let mut cells: FxHashMap<Cell, Occupants> = FxHashMap::default();
        for coin in self.coins.values() {
            cells.entry(coin.position).or_default().push(coin.owner);
        }
        Occupancy { cells }
    }

    /// First violation of the board-layout invariants, if any.
    ///
    /// - no coin on a Forbidden cell
    /// - at most one coin per Home cell
    /// - outside Target/Observer cells, at most one coin per cell
    /// - no cell holds coins of both players
    #[must_use]
    pub fn layout_violation(&self) -> Option<(Cell, &'static str)> {
        let occupancy = self.occupancy();
        let mut cells: Vec<_> = occupancy.cells.iter().collect();
        cells.sort_by_key(|(cell, _)| **cell);

        for (&cell, owners) in cells {
            if zones::is_forbidden(cell) {
                return Some((cell, "coin on a forbidden cell"));
            }
            if owners.iter().any(|&o| o != owners[0]) {
                return Some((cell, "coins of both players share a cell"));
            }
            let stackable = zones::is_any_target(cell) || zones::is_any_observer(cell);
            if !stackable && owners.len() > 1 {
                return Some((cell, "stacked coins outside target and observer cells"));
            }
        }
        None
    }
}

/// Cell → owners index built from a registry.
#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    cells: FxHashMap<Cell, Occupants>,
}

impl Occupancy {
    /// Owners of the coins on `cell`; empty when vacant.
    #[must_use]
    pub fn owners_at(&self, cell: Cell) -> &[PlayerId] {
        self.cells.get(&cell).map_or(&[], |owners| owners.as_slice())
    }

    /// Whether no coin occupies `cell`.
    #[must_use]
    pub fn is_vacant(&self, cell: Cell) -> bool {
        self.owners_at(cell).is_empty()
    }

    /// Whether a coin not owned by `player` occupies `cell`.
    #[must_use]
    pub fn has_opponent_of(&self, player: PlayerId, cell: Cell) -> bool {
        self.owners_at(cell).iter().any(|&owner| owner != player)
    }
}
