//! Simulation time model and run configuration.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one frame
//! of the external pacing signal; the engine never looks at wall-clock time,
//! so the same scene and config always replay identically.

use std::fmt;

use crate::{CoreError, CoreResult, NodeId};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick.  Cheap to copy; holds no heap data.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SimClock {
    /// The tick that the next `step` will process.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Rewind to tick 0.
    #[inline]
    pub fn reset(&mut self) {
        self.current_tick = Tick::ZERO;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_tick)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically embedded in a scene file and loaded once at startup.  Call
/// [`SimConfig::validate`] before handing it to the engine; the engine itself
/// never re-checks it mid-run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Communication range in plane units.  A pair is in range iff its
    /// distance is strictly below this value.
    pub range: f64,

    /// When `true`, vehicle↔base-station pairs beyond `range` are omitted
    /// like vehicle↔vehicle pairs.  When `false` every vehicle always has a
    /// base-station link in the output.
    pub gate_base_station_links: bool,

    /// Vehicle whose blocked base-station link triggers a relay search.
    pub distinguished: Option<NodeId>,

    /// Run the relay search for *every* vehicle whose base-station link is
    /// blocked, not only the distinguished one.
    pub relay_all_blocked: bool,

    /// Total ticks for a full `Sim::run`.
    pub total_ticks: u64,

    /// Call snapshot observers every N ticks.  `0` disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            range:                   300.0,
            gate_base_station_links: false,
            distinguished:           None,
            relay_all_blocked:       false,
            total_ticks:             600,
            output_interval_ticks:   1,
        }
    }
}

impl SimConfig {
    /// The tick at which a full run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.range.is_finite() || self.range < 0.0 {
            return Err(CoreError::Config(format!(
                "range must be a finite non-negative number, got {}",
                self.range
            )));
        }
        if let Some(id) = &self.distinguished {
            if id.as_str().is_empty() {
                return Err(CoreError::Config("distinguished node id is empty".into()));
            }
        }
        Ok(())
    }
}
