//! Coins on the board and how they get there.
//!
//! - `CoinRegistry`: all coins currently on the board
//! - `SetupProgress`: the sequential placement protocol that fills it

pub mod registry;
pub mod setup;

pub use registry::{CoinRegistry, Occupancy, Occupants};
pub use setup::{expected_region, PlacementStatus, SetupProgress};
