//! Movement rules.
//!
//! - `movegen`: the rule catalog and the candidate pipeline
//! - `validator`: occupancy legality of a single destination
//! - `safety`: per-player trap cells derived from advanced coins
//!
//! Everything here is a pure function of the coin registry. The engine
//! calls into these modules but never reimplements their checks.

pub mod movegen;
pub mod safety;
pub mod validator;

pub use movegen::{
    candidates_by_rule, is_wrong_zone_attempt, legal_destinations, passes_coin_filter,
    reachable_destinations, rule, Candidates, MoveRule, RuleCandidates, MOVE_RULES,
};
pub use safety::{rebuild_safety_lines, trap_cells};
pub use validator::validate_destination;
