//! Setup placement protocol.
//!
//! A single counter `total_placed` runs from 0 to 2N. The first N placements
//! belong to Player 1 and the next N to Player 2. Within one player's N
//! placements:
//!
//! 1. The first N/2 are **Target mode**: the coin goes onto the opponent's
//!    Target cell. Stacking is allowed and never checked.
//! 2. The remaining N/2 are **Home mode**: the coin goes onto an empty cell
//!    of the player's own Home zone.
//!
//! ```
//! use rust_asude::coins::{CoinRegistry, SetupProgress};
//! use rust_asude::core::{Cell, PlacementMode, PlayerId};
//!
//! let mut setup = SetupProgress::new(4);
//! let mut registry = CoinRegistry::new();
//!
//! let status = setup.status().unwrap();
//! assert_eq!(status.player, PlayerId::ONE);
//! assert_eq!(status.mode, PlacementMode::Target);
//!
//! // Player 1's Target-mode coins go onto Player 2's Target
//! setup.place(&mut registry, Cell::new(13, 7).unwrap()).unwrap();
//! assert!(setup.place(&mut registry, Cell::new(1, 7).unwrap()).is_err());
//! assert_eq!(setup.total_placed(), 1);
//! ```

use serde::{Deserialize, Serialize};

use super::registry::CoinRegistry;
use crate::core::{Cell, Coin, CoinId, PlacementMode, PlayerId, Result, RuleError};
use crate::zones;

/// What the next placement must look like.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementStatus {
    /// The player who places next.
    pub player: PlayerId,

    /// Current placement mode for that player.
    pub mode: PlacementMode,

    /// Placements left in this mode, including the next one.
    pub remaining_in_mode: u8,

    /// Placements made so far by both players.
    pub total_placed: u16,
}

/// Progress through the setup placements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupProgress {
    coins_per_player: u8,
    total_placed: u16,
}

impl SetupProgress {
    /// Start a fresh setup for `coins_per_player` coins each.
    #[must_use]
    pub fn new(coins_per_player: u8) -> Self {
        Self {
            coins_per_player,
            total_placed: 0,
        }
    }

    /// Coins per player this setup was built for.
    #[must_use]
    pub fn coins_per_player(&self) -> u8 {
        self.coins_per_player
    }

    /// Placements made so far.
    #[must_use]
    pub fn total_placed(&self) -> u16 {
        self.total_placed
    }

    /// Total placements before play starts (2N).
    #[must_use]
    pub fn total_required(&self) -> u16 {
        u16::from(self.coins_per_player) * 2
    }

    /// Whether all 2N placements have been made.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_placed >= self.total_required()
    }

    /// The upcoming placement, or `None` once setup is complete.
    #[must_use]
    pub fn status(&self) -> Option<PlacementStatus> {
        let (player, within) = self.position()?;
        let per_mode = self.coins_per_player / 2;
        let (mode, remaining_in_mode) = if within < per_mode {
            (PlacementMode::Target, per_mode - within)
        } else {
            (PlacementMode::Home, self.coins_per_player - within)
        };
        Some(PlacementStatus {
            player,
            mode,
            remaining_in_mode,
            total_placed: self.total_placed,
        })
    }

    /// The ID the next placed coin will get.
    #[must_use]
    pub fn next_coin_id(&self) -> Option<CoinId> {
        let (player, within) = self.position()?;
        Some(CoinId::nth(player, within, self.coins_per_player))
    }

    /// Check a placement without performing it.
    ///
    /// Returns the coin that would be placed.
    pub fn check(&self, registry: &CoinRegistry, cell: Cell) -> Result<Coin> {
        let (status, id) = match (self.status(), self.next_coin_id()) {
            (Some(status), Some(id)) => (status, id),
            _ => return Err(RuleError::GameOver),
        };
        let player = status.player;

        let allowed = match status.mode {
            PlacementMode::Target => zones::is_target(cell, player.opponent()),
            PlacementMode::Home => zones::is_home(cell, player) && registry.is_vacant(cell),
        };
        if !allowed {
            return Err(RuleError::InvalidPlacement {
                player,
                mode: status.mode,
                cell,
                expected: expected_region(player, status.mode),
            });
        }

        Ok(Coin::placed(id, player, cell, status.mode))
    }

    /// Place the next coin on `cell`.
    ///
    /// On error nothing changes.
    pub fn place(&mut self, registry: &mut CoinRegistry, cell: Cell) -> Result<Coin> {
        let coin = self.check(registry, cell)?;
        if !registry.insert(coin) {
            return Err(RuleError::InvalidPlacement {
                player: coin.owner,
                mode: self.status().map_or(PlacementMode::Home, |s| s.mode),
                cell,
                expected: format!("coin {} is already on the board", coin.id),
            });
        }
        self.total_placed += 1;
        Ok(coin)
    }

    /// Placing player and their 0-based placement index.
    fn position(&self) -> Option<(PlayerId, u8)> {
        if self.is_complete() || self.coins_per_player == 0 {
            return None;
        }
        let n = u16::from(self.coins_per_player);
        let player = if self.total_placed < n {
            PlayerId::ONE
        } else {
            PlayerId::TWO
        };
        let within = u8::try_from(self.total_placed % n).ok()?;
        Some((player, within))
    }
}

/// Human-readable description of the region a placement must land in.
#[must_use]
pub fn expected_region(player: PlayerId, mode: PlacementMode) -> String {
    match mode {
        PlacementMode::Target => {
            let opponent = player.opponent();
            format!(
                "expected {opponent}'s target zone at {}",
                zones::target_cell(opponent)
            )
        }
        PlacementMode::Home => format!("expected an empty cell in {player}'s home zone"),
    }
}
