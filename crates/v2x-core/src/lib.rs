//! `v2x-core` — foundational types for the v2x connectivity engine.
//!
//! This crate is a dependency of every other `v2x-*` crate.  It has no
//! `v2x-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `LinkId` (canonical, order-independent)     |
//! | [`geo`]         | `Point`, Euclidean distance                           |
//! | [`station`]     | `BaseStation` — the fixed node                        |
//! | [`direction`]   | `Direction` (lane travel sense, ±1)                   |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by scene loading in `v2x-sim`.                    |

pub mod direction;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod station;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{LinkId, NodeId};
pub use rng::SimRng;
pub use station::BaseStation;
pub use time::{SimClock, SimConfig, Tick};
