//! Fluent builder for constructing a [`Sim`].

use v2x_core::{BaseStation, SimClock, SimConfig};
use v2x_link::LinkRegistry;
use v2x_mobility::Fleet;
use v2x_spatial::Obstacle;

use crate::{Scene, Sim, SimError, SimResult, SimState};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: range, gating flag, distinguished vehicle, tick counts
/// - [`Fleet`]: the vehicles, in the order links will be reported
/// - [`BaseStation`]
///
/// # Optional inputs
///
/// | Method          | Default                      |
/// |-----------------|------------------------------|
/// | `.obstacle(o)`  | none (nothing is ever blocked) |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, fleet, station)
///     .obstacle(Obstacle::new(300.0, 250.0, 200.0, 100.0))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:   SimConfig,
    fleet:    Fleet,
    station:  BaseStation,
    obstacle: Option<Obstacle>,
}

impl SimBuilder {
    pub fn new(config: SimConfig, fleet: Fleet, station: BaseStation) -> Self {
        Self { config, fleet, station, obstacle: None }
    }

    /// Start from an already-validated [`Scene`].
    pub fn from_scene(scene: Scene) -> Self {
        Self {
            config:   scene.config,
            fleet:    scene.fleet,
            station:  scene.station,
            obstacle: scene.obstacle,
        }
    }

    pub fn obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacle = Some(obstacle);
        self
    }

    /// Validate inputs and return an `Idle` [`Sim`].
    ///
    /// A distinguished vehicle that is not in the fleet is *not* an error
    /// here: each tick reports it through `TickOutput::relay_error`.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        if let Some(obstacle) = &self.obstacle {
            obstacle.validate()?;
        }
        if self.fleet.contains(&self.station.id) {
            return Err(SimError::StationIdClash(self.station.id));
        }
        if let Some(id) = &self.config.distinguished {
            if !self.fleet.contains(id) {
                log::warn!("distinguished vehicle {id} is not in the fleet");
            }
        }
        if self.obstacle.is_none() {
            log::debug!("no obstacle configured; every link is line-of-sight");
        }

        log::info!(
            "built sim: {} vehicles, range {}, {} ticks",
            self.fleet.len(),
            self.config.range,
            self.config.total_ticks,
        );

        Ok(Sim {
            config:         self.config,
            clock:          SimClock::new(),
            station:        self.station,
            obstacle:       self.obstacle,
            fleet:          self.fleet,
            registry:       LinkRegistry::new(),
            state:          SimState::Idle,
            last:           None,
            warned_unknown: false,
        })
    }
}
