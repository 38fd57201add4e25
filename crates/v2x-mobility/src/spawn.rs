//! Seeded random fleet generation.
//!
//! Useful for stress scenes: vehicles are scattered along the given lanes
//! with random speeds, and the same seed always yields the same fleet.

use std::ops::Range;

use v2x_core::SimRng;

use crate::{Fleet, Lane, MobilityError, MobilityResult, Vehicle};

/// Spawn `count` vehicles named `vehicle_1 … vehicle_<count>`.
///
/// Each vehicle picks a lane uniformly, drives in the lane's natural
/// direction, starts at a uniformly random point along it and gets a speed
/// drawn from `speed`.
pub fn spawn_fleet(
    rng:   &mut SimRng,
    count: usize,
    lanes: &[Lane],
    speed: Range<f64>,
) -> MobilityResult<Fleet> {
    if count > 0 && lanes.is_empty() {
        return Err(MobilityError::NoLanes);
    }
    if !(speed.start < speed.end) {
        return Err(MobilityError::EmptySpeedRange { min: speed.start, max: speed.end });
    }

    let vehicles = (0..count)
        .map(|n| {
            let lane = lanes[rng.gen_range(0..lanes.len())];
            let progress: f64 = rng.random();
            let x = lane.start_x + (lane.end_x - lane.start_x) * progress;
            let v = rng.gen_range(speed.clone());
            Vehicle::at(format!("vehicle_{}", n + 1), x, lane, lane.natural_direction(), v)
        })
        .collect();

    Fleet::new(vehicles)
}
