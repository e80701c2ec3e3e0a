//! Coin identification and per-coin data.
//!
//! ## ID Layout
//!
//! Coin IDs are allocated once per game from the configured coin count `N`:
//! - `1..=N`: Player 1's coins
//! - `N+1..=2N`: Player 2's coins
//!
//! IDs are never reused. An eliminated coin leaves the registry entirely.
//!
//! ```
//! use rust_asude::core::{CoinId, PlayerId};
//!
//! let coins_per_player = 8;
//! assert_eq!(CoinId::owner_of(CoinId::new(8), coins_per_player), Some(PlayerId::ONE));
//! assert_eq!(CoinId::owner_of(CoinId::new(9), coins_per_player), Some(PlayerId::TWO));
//! assert_eq!(CoinId::owner_of(CoinId::new(17), coins_per_player), None);
//! ```

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::player::PlayerId;

/// Unique identifier for a coin within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoinId(pub u16);

impl CoinId {
    /// Create a coin ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// The ID of a player's `index`-th coin (0-based).
    #[must_use]
    pub const fn nth(player: PlayerId, index: u8, coins_per_player: u8) -> Self {
        let base = if player.number() == 1 { 0 } else { coins_per_player as u16 };
        Self(base + index as u16 + 1)
    }

    /// The player an ID was allocated to, given the per-player coin count.
    #[must_use]
    pub const fn owner_of(id: CoinId, coins_per_player: u8) -> Option<PlayerId> {
        let n = coins_per_player as u16;
        if id.0 >= 1 && id.0 <= n {
            Some(PlayerId::ONE)
        } else if id.0 > n && id.0 <= 2 * n {
            Some(PlayerId::TWO)
        } else {
            None
        }
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which kind of setup placement a coin went through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementMode {
    /// Placed on the opponent's Target cell. Stacking allowed.
    Target,
    /// Placed on an empty cell of the owner's Home zone.
    Home,
}

impl PlacementMode {
    /// The side a coin placed in this mode represents.
    ///
    /// Target-mode coins start on the opponent's side of the board.
    #[must_use]
    pub const fn origin_side(self, owner: PlayerId) -> PlayerId {
        match self {
            PlacementMode::Target => owner.opponent(),
            PlacementMode::Home => owner,
        }
    }
}

impl std::fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementMode::Target => write!(f, "target"),
            PlacementMode::Home => write!(f, "home"),
        }
    }
}

/// A coin on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Unique identifier.
    pub id: CoinId,

    /// The player who moves this coin and scores with it.
    pub owner: PlayerId,

    /// Current cell.
    pub position: Cell,

    /// The side this coin was placed to represent. Fixed at placement.
    pub origin_side: PlayerId,

    /// Set on entering the owner's Observer cell. Never cleared.
    pub observer_power: bool,
}

impl Coin {
    /// Create a freshly placed coin.
    #[must_use]
    pub fn placed(id: CoinId, owner: PlayerId, position: Cell, mode: PlacementMode) -> Self {
        Self {
            id,
            owner,
            position,
            origin_side: mode.origin_side(owner),
            observer_power: false,
        }
    }

    /// Whether this coin was placed on the opponent's side during setup.
    #[must_use]
    pub fn is_target_coin(&self) -> bool {
        self.origin_side != self.owner
    }

    /// Whether this coin may be eliminated on the Target of `target_owner`.
    ///
    /// Observer power lifts the side restriction entirely.
    #[must_use]
    pub fn can_score_in(&self, target_owner: PlayerId) -> bool {
        self.observer_power || self.origin_side != target_owner
    }

    /// Copy of this coin at a new cell.
    #[must_use]
    pub fn moved_to(self, position: Cell) -> Self {
        Self { position, ..self }
    }

    /// Copy of this coin with observer power granted.
    #[must_use]
    pub fn with_observer_power(self) -> Self {
        Self {
            observer_power: true,
            ..self
        }
    }
}
