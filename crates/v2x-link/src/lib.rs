//! `v2x-link` — which nodes can talk to each other this tick.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`link`]      | `Link`, `LinkRole`, `LinkClass`                                 |
//! | [`evaluator`] | `evaluate` → `LinkSet` (range + occlusion for every candidate)  |
//! | [`relay`]     | `RelayPath`, two-hop search around a blocked direct link        |
//! | [`registry`]  | `LinkRegistry` — create/update/remove diff across ticks         |
//! | [`error`]     | `LinkError`, `LinkResult<T>`                                    |
//!
//! # Per-tick pipeline
//!
//! ```text
//! fleet positions ──► evaluate() ──► LinkSet ──► relay search (if blocked)
//!                                        │              │
//!                                        └── mark_relay_hops ◄┘
//!                                        ▼
//!                               LinkRegistry::apply ──► RegistryDiff
//! ```
//!
//! `evaluate` and the relay search are pure functions of positions, the
//! obstacle and the range.  The registry is the only state carried from one
//! tick to the next, and it only records *which ids were present*.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs vehicle↔vehicle occlusion tests on Rayon.         |
//! | `fx-hash`  | FxHash for the registry map.                           |

pub mod error;
pub mod evaluator;
pub mod link;
pub mod registry;
pub mod relay;


pub use error::{LinkError, LinkResult};
pub use evaluator::{EvalParams, LinkSet, evaluate};
pub use link::{Link, LinkClass, LinkRole};
pub use registry::{LinkRegistry, RegistryDiff};
pub use relay::{RelayPath, find_relay_paths, relay_paths_for_all_blocked, relay_paths_if_blocked};
