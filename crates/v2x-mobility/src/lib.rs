//! `v2x-mobility` — vehicle movement along horizontal lanes.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`lane`]    | `Lane` — start/end x and the fixed y of a horizontal lane          |
//! | [`vehicle`] | `Vehicle` — id, position, lane, direction, speed; `advance`       |
//! | [`fleet`]   | `Fleet` — all vehicles, id lookup, whole-fleet advance and reset  |
//! | [`spawn`]   | `spawn_fleet` — seeded random fleet on a set of lanes             |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>`                              |
//!
//! # Movement model (wrap-around lanes)
//!
//! Every tick each vehicle moves `speed` units in its direction.  When it
//! reaches or passes the lane's end it reappears at the lane's start: a
//! wrap, never a bounce.  The y coordinate never changes.
//!
//! Positions are only ever written here.  The connectivity crates receive
//! `&Fleet` and read positions after the whole fleet has been advanced.

pub mod error;
pub mod fleet;
pub mod lane;
pub mod spawn;
pub mod vehicle;


pub use error::{MobilityError, MobilityResult};
pub use fleet::Fleet;
pub use lane::Lane;
pub use spawn::spawn_fleet;
pub use vehicle::Vehicle;
