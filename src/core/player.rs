//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! The game is strictly two-player. `PlayerId::ONE` starts at the top of the
//! board (rows 1-2) and moves toward increasing rows; `PlayerId::TWO` starts
//! at the bottom (rows 12-13) and moves toward decreasing rows.
//!
//! ## PlayerMap
//!
//! Fixed two-entry storage indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::RuleError;

/// Player identifier. Only the values 1 and 2 exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player seated at the top of the board.
    pub const ONE: Self = Self(1);
    /// The player seated at the bottom of the board.
    pub const TWO: Self = Self(2);

    /// Both players in turn order.
    pub const BOTH: [Self; 2] = [Self::ONE, Self::TWO];

    /// Create a player ID from its 1-based number.
    ///
    /// ```
    /// use rust_asude::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(1), Some(PlayerId::ONE));
    /// assert_eq!(PlayerId::new(3), None);
    /// ```
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::ONE),
            2 => Some(Self::TWO),
            _ => None,
        }
    }

    /// The 1-based player number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// The 0-based storage index.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        if self.0 == 1 {
            Self::TWO
        } else {
            Self::ONE
        }
    }

    /// Row delta of one step "forward" for this player.
    ///
    /// Player 1 advances toward row 13, player 2 toward row 1.
    #[must_use]
    pub const fn forward(self) -> i8 {
        if self.0 == 1 {
            1
        } else {
            -1
        }
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = RuleError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number).ok_or(RuleError::UnknownPlayer(number))
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data with O(1) access.
///
/// ```
/// use rust_asude::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<u8> = PlayerMap::with_value(0);
/// scores[PlayerId::TWO] += 1;
/// assert_eq!(scores[PlayerId::ONE], 0);
/// assert_eq!(scores[PlayerId::TWO], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::BOTH.into_iter().zip(self.data.iter())
    }

    /// Map every entry into a new `PlayerMap`.
    pub fn map<U>(&self, f: impl Fn(PlayerId, &T) -> U) -> PlayerMap<U> {
        PlayerMap::new(|player| f(player, self.get(player)))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
