//! `v2x-spatial` — line-of-sight geometry and neighbour queries.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`obstacle`]  | `Obstacle` — axis-aligned rectangle (building footprint)    |
//! | [`occlusion`] | `segments_intersect`, `segment_intersects_rect`, `is_occluded` |
//! | [`index`]     | `NeighborIndex` (R-tree) — all pairs within range           |
//! | [`error`]     | `SpatialError`, `SpatialResult<T>`                          |
//!
//! Every function here is pure: same inputs, same answer, no shared state.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Obstacle`.             |

pub mod error;
pub mod index;
pub mod obstacle;
pub mod occlusion;


pub use error::{SpatialError, SpatialResult};
pub use index::NeighborIndex;
pub use obstacle::Obstacle;
pub use occlusion::{is_occluded, segment_intersects_rect, segments_intersect};
