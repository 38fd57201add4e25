//! Plain data row types written by output backends.

use v2x_link::{Link, LinkClass, LinkRole};
use v2x_mobility::Vehicle;

use v2x_sim::TickOutput;

/// One link as it stood at a snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSnapshotRow {
    pub tick:     u64,
    pub link_id:  String,
    /// Lexicographically smaller endpoint.
    pub source:   String,
    pub target:   String,
    pub class:    LinkClass,
    pub role:     LinkRole,
    pub blocked:  bool,
    pub distance: f64,
}

impl LinkSnapshotRow {
    pub fn from_link(tick: u64, link: &Link) -> Self {
        let [source, target] = &link.endpoints;
        Self {
            tick,
            link_id:  link.id.to_string(),
            source:   source.to_string(),
            target:   target.to_string(),
            class:    link.class,
            role:     link.role,
            blocked:  link.blocked,
            distance: link.distance,
        }
    }
}

/// A vehicle position at a snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct VehiclePositionRow {
    pub tick:       u64,
    pub vehicle_id: String,
    pub x:          f64,
    pub y:          f64,
}

impl VehiclePositionRow {
    pub fn from_vehicle(tick: u64, vehicle: &Vehicle) -> Self {
        Self {
            tick,
            vehicle_id: vehicle.id.to_string(),
            x:          vehicle.position.x,
            y:          vehicle.position.y,
        }
    }
}

/// Counts for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:               u64,
    pub links:              u64,
    pub active_connections: u64,
    pub blocked_links:      u64,
    pub relay_paths:        u64,
}

impl From<&TickOutput> for TickSummaryRow {
    fn from(out: &TickOutput) -> Self {
        Self {
            tick:               out.tick.0,
            links:              out.links.len() as u64,
            active_connections: out.links.active_count as u64,
            blocked_links:      out.links.blocked_count() as u64,
            relay_paths:        out.relays.len() as u64,
        }
    }
}
