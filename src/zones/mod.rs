//! Zone geometry for the 13×13 board.
//!
//! The board layout is fixed: Home, Target and Observer regions per player,
//! a Forbidden centre block, gateway, hint and direct-access cells. Nothing
//! here holds state; see `geometry` for the tables.

pub mod geometry;

pub use geometry::{
    direct_access_cells, has_crossed_boundary, home_cells, home_owner, is_any_observer,
    is_any_target, is_boundary_area, is_corner, is_directional_hint, is_forbidden, is_home,
    is_observer, is_special_gateway, is_target, observer_cell, observer_owner, target_cell,
    target_owner, zone_of, zones_of, Zone,
};
