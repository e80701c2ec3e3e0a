//! Game configuration types.
//!
//! - `RuleConfig`: tunable rule parameters (coin count, rollback delay,
//!   elimination confirmation)
//! - `MatchConfig`: rule parameters plus player names
//!
//! Both deserialize with defaults, so a partial TOML document is enough:
//!
//! ```
//! use rust_asude::core::RuleConfig;
//!
//! let config = RuleConfig::from_toml_str("safety_line_delay_ms = 250").unwrap();
//! assert_eq!(config.coins_per_player, 8);
//! assert_eq!(config.safety_line_delay_ms, 250);
//! ```

use serde::{Deserialize, Serialize};

use super::error::{Result, RuleError};
use super::player::{PlayerId, PlayerMap};
use crate::zones::geometry::HOME_CELLS_PER_PLAYER;

/// Default number of coins each player places.
pub const DEFAULT_COINS_PER_PLAYER: u8 = 8;

/// Default delay between a safety-line hit and the rollback prompt.
pub const DEFAULT_SAFETY_LINE_DELAY_MS: u64 = 5_000;

/// Rule parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Coins per player (N). Half go to the opponent's Target, half home.
    pub coins_per_player: u8,

    /// Milliseconds a safety-line hit stays tentatively applied before the
    /// rollback can be confirmed.
    pub safety_line_delay_ms: u64,

    /// Ask for confirmation before eliminating a coin on a Target cell.
    pub confirm_eliminations: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            coins_per_player: DEFAULT_COINS_PER_PLAYER,
            safety_line_delay_ms: DEFAULT_SAFETY_LINE_DELAY_MS,
            confirm_eliminations: false,
        }
    }
}

impl RuleConfig {
    /// Create the default rule configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML and validate.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| RuleError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the per-player coin count.
    #[must_use]
    pub fn with_coins_per_player(mut self, coins: u8) -> Self {
        self.coins_per_player = coins;
        self
    }

    /// Set the safety-line rollback delay.
    #[must_use]
    pub fn with_safety_line_delay_ms(mut self, delay_ms: u64) -> Self {
        self.safety_line_delay_ms = delay_ms;
        self
    }

    /// Require confirmation before eliminations resolve.
    #[must_use]
    pub fn with_elimination_confirmation(mut self) -> Self {
        self.confirm_eliminations = true;
        self
    }

    /// Placements per player in each of the two setup modes.
    #[must_use]
    pub fn coins_per_mode(&self) -> u8 {
        self.coins_per_player / 2
    }

    /// Total placements before play starts (2N).
    #[must_use]
    pub fn total_placements(&self) -> u16 {
        u16::from(self.coins_per_player) * 2
    }

    /// Check the coin count fits the setup protocol.
    ///
    /// N must be even and at least 2, and the Home half must fit into the
    /// player's Home zone without stacking.
    pub fn validate(&self) -> Result<()> {
        let n = self.coins_per_player;
        if n < 2 || n % 2 != 0 {
            return Err(RuleError::InvalidConfig(format!(
                "coins_per_player must be an even number of at least 2, got {n}"
            )));
        }
        if usize::from(n / 2) > HOME_CELLS_PER_PLAYER {
            return Err(RuleError::InvalidConfig(format!(
                "coins_per_player {n} needs more than {HOME_CELLS_PER_PLAYER} home cells"
            )));
        }
        Ok(())
    }
}

/// Configuration collected before a match starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Display names, used only in log output and events.
    pub player_names: PlayerMap<String>,

    /// Rule parameters.
    pub rules: RuleConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_names: PlayerMap::new(|p| p.to_string()),
            rules: RuleConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Create the default match configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML and validate.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| RuleError::InvalidConfig(e.to_string()))?;
        config.rules.validate()?;
        Ok(config)
    }

    /// Set a player's display name.
    #[must_use]
    pub fn with_player_name(mut self, player: PlayerId, name: impl Into<String>) -> Self {
        self.player_names[player] = name.into();
        self
    }

    /// Replace the rule parameters.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Get a player's display name.
    #[must_use]
    pub fn player_name(&self, player: PlayerId) -> &str {
        &self.player_names[player]
    }
}
