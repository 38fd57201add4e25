//! `v2x-sim` — tick orchestration for the v2x connectivity engine.
//!
//! # Tick pipeline
//!
//! ```text
//! for each tick pulled from the TickSource:
//!   ① Motion    — every vehicle advances (and wraps) before anything is
//!                 measured, so no test ever sees half-updated positions.
//!   ② Evaluate  — range + occlusion for every candidate pair → LinkSet.
//!   ③ Relay     — if the distinguished vehicle's station link is blocked,
//!                 search two-hop alternatives (all blocked vehicles with
//!                 `relay_all_blocked`).
//!   ④ Registry  — relay hops re-tagged, registry diff computed.
//!   ⑤ Observe   — on_tick_end, and on_snapshot every output interval.
//! ```
//!
//! # Lifecycle
//!
//! ```text
//!            start              stop
//!   Idle ───────────► Running ───────► Stopped
//!    ▲                  ▲                 │
//!    │                  └──── start ──────┘
//!    └──────────── reset (from any state) ─┘
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use v2x_sim::{NoopObserver, SimBuilder, scene};
//!
//! let scene = scene::load_scene("corner.json")?;
//! let mut sim = SimBuilder::from_scene(scene).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod scene;
pub mod sim;
pub mod state;
pub mod tick_source;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SceneError, SceneResult, SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use scene::{Scene, load_scene, load_scene_str};
pub use sim::{Sim, TickOutput};
pub use state::SimState;
pub use tick_source::{FixedTicks, TickSource, Unbounded};
