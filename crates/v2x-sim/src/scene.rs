//! Scene loading, parsing, and validation.
//!
//! A scene is a JSON document describing the static world and the initial
//! fleet:
//!
//! ```json
//! {
//!   "config":       { "range": 300, "distinguished": "car1" },
//!   "base_station": { "id": "base", "x": 400, "y": 450 },
//!   "obstacle":     { "x": 300, "y": 250, "width": 200, "height": 100 },
//!   "vehicles": [
//!     { "id": "car1", "lane": { "start_x": 1200, "end_x": 50, "y": 180 },
//!       "direction": "left", "speed": 2 }
//!   ]
//! }
//! ```
//!
//! `config` fields default individually.  `obstacle` may be omitted or
//! `null`.  A vehicle's `direction` defaults to the lane's natural direction
//! and `x` to the lane start.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use v2x_core::{BaseStation, Direction, NodeId, Point, SimConfig};
use v2x_mobility::{Fleet, Lane, Vehicle};
use v2x_spatial::Obstacle;

use crate::{SceneError, SceneResult};

// ── File format ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct SceneFile {
    #[serde(default)]
    config:       SimConfig,
    base_station: StationSpec,
    #[serde(default)]
    obstacle:     Option<Obstacle>,
    #[serde(default)]
    vehicles:     Vec<VehicleSpec>,
}

#[derive(Deserialize, Debug)]
struct StationSpec {
    id: NodeId,
    x:  f64,
    y:  f64,
}

#[derive(Deserialize, Debug)]
struct VehicleSpec {
    id:        NodeId,
    lane:      Lane,
    #[serde(default)]
    direction: Option<Direction>,
    speed:     f64,
    /// Starting x; defaults to `lane.start_x`.
    #[serde(default)]
    x:         Option<f64>,
}

// ── Validated scene ───────────────────────────────────────────────────────────

/// A parsed and validated scene, ready for
/// [`SimBuilder::from_scene`][crate::SimBuilder::from_scene].
#[derive(Clone, Debug)]
pub struct Scene {
    pub config:   SimConfig,
    pub station:  BaseStation,
    pub obstacle: Option<Obstacle>,
    pub fleet:    Fleet,
}

/// Load and validate a scene from a JSON file.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<Scene> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("loading scene from {}", path.display());
    load_scene_str(&data)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_str(json: &str) -> SceneResult<Scene> {
    let file: SceneFile = serde_json::from_str(json)?;
    validate(file)
}

fn validate(file: SceneFile) -> SceneResult<Scene> {
    file.config.validate()?;

    let station_pos = Point::new(file.base_station.x, file.base_station.y);
    if !station_pos.is_finite() {
        return Err(SceneError::Invalid(format!(
            "base station {} has a non-finite position",
            file.base_station.id
        )));
    }
    let station = BaseStation::new(file.base_station.id, station_pos);

    match &file.obstacle {
        Some(obstacle) => obstacle.validate()?,
        None => log::warn!("scene has no obstacle; links will never be blocked"),
    }

    let mut seen: HashSet<&NodeId> = HashSet::with_capacity(file.vehicles.len() + 1);
    seen.insert(&station.id);
    for spec in &file.vehicles {
        if !seen.insert(&spec.id) {
            return Err(SceneError::Invalid(format!("duplicate node id {}", spec.id)));
        }
    }

    let vehicles: Vec<Vehicle> = file
        .vehicles
        .into_iter()
        .map(|spec| {
            let direction = spec.direction.unwrap_or_else(|| spec.lane.natural_direction());
            let x = spec.x.unwrap_or(spec.lane.start_x);
            Vehicle::at(spec.id, x, spec.lane, direction, spec.speed)
        })
        .collect();
    let fleet = Fleet::new(vehicles)?;

    if let Some(id) = &file.config.distinguished {
        if !fleet.contains(id) {
            log::warn!("distinguished vehicle {id} is not in the scene");
        }
    }

    log::debug!("scene: {} vehicles, station {}", fleet.len(), station.id);
    Ok(Scene { config: file.config, station, obstacle: file.obstacle, fleet })
}
