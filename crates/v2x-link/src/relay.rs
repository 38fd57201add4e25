//! Two-hop relay search around a blocked direct base-station link.

use v2x_core::{BaseStation, LinkId, NodeId};
use v2x_mobility::Fleet;
use v2x_spatial::{NeighborIndex, Obstacle, is_occluded};

use crate::{LinkClass, LinkError, LinkResult, LinkSet};

/// An alternate route `origin → relay → station`.
///
/// Only meaningful for the tick it was computed in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelayPath {
    /// The vehicle whose direct link is blocked.
    pub origin: NodeId,
    /// The intermediate vehicle.
    pub relay:  NodeId,
    /// Canonical id of `origin`–`relay`.
    pub hop1:   LinkId,
    /// Canonical id of `relay`–station.
    pub hop2:   LinkId,
}

/// Every vehicle that can bridge `origin` and `station` this tick.
///
/// A candidate must be strictly within `range` of both ends and have a clear
/// line of sight to both.  Candidates are returned in fleet order.  No
/// ranking is applied.
///
/// # Errors
///
/// [`LinkError::UnknownVehicle`] if `origin` is not in `fleet`.
pub fn find_relay_paths(
    origin:   &NodeId,
    fleet:    &Fleet,
    station:  &BaseStation,
    obstacle: Option<&Obstacle>,
    range:    f64,
) -> LinkResult<Vec<RelayPath>> {
    let from = fleet
        .get(origin)
        .ok_or_else(|| LinkError::UnknownVehicle(origin.clone()))?;
    let p0 = from.position;
    let ps = station.position;

    // Slots strictly within range of the origin, in fleet order.
    let index = NeighborIndex::build(&fleet.positions());
    let vehicles = fleet.as_slice();

    let paths: Vec<RelayPath> = index
        .within(p0, range)
        .into_iter()
        .map(|slot| &vehicles[slot])
        .filter(|v| v.id != *origin && v.id != station.id)
        .filter(|v| v.position.distance(ps) < range)
        .filter(|v| !is_occluded(p0, v.position, obstacle))
        .filter(|v| !is_occluded(v.position, ps, obstacle))
        .map(|v| RelayPath {
            origin: origin.clone(),
            relay:  v.id.clone(),
            hop1:   LinkId::between(origin, &v.id),
            hop2:   LinkId::between(&v.id, &station.id),
        })
        .collect();

    log::debug!("{} relay candidate(s) for {origin}", paths.len());
    Ok(paths)
}

/// Run [`find_relay_paths`] only if `origin`'s direct station link is present
/// in `links` and blocked.  Otherwise returns an empty list.
pub fn relay_paths_if_blocked(
    origin:   &NodeId,
    links:    &LinkSet,
    fleet:    &Fleet,
    station:  &BaseStation,
    obstacle: Option<&Obstacle>,
    range:    f64,
) -> LinkResult<Vec<RelayPath>> {
    if !fleet.contains(origin) {
        return Err(LinkError::UnknownVehicle(origin.clone()));
    }
    match links.between(origin, &station.id) {
        Some(direct) if direct.blocked => {
            find_relay_paths(origin, fleet, station, obstacle, range)
        }
        _ => Ok(Vec::new()),
    }
}

/// Relay search for every vehicle whose direct station link is blocked.
///
/// Paths are grouped by origin in fleet order.
pub fn relay_paths_for_all_blocked(
    links:    &LinkSet,
    fleet:    &Fleet,
    station:  &BaseStation,
    obstacle: Option<&Obstacle>,
    range:    f64,
) -> Vec<RelayPath> {
    let mut out = Vec::new();
    // Station links come first in fleet order, so origins keep that order.
    let blocked_origins = links
        .links
        .iter()
        .filter(|l| l.class == LinkClass::V2I && l.blocked)
        .filter_map(|l| l.other(&station.id));
    for origin in blocked_origins {
        match find_relay_paths(origin, fleet, station, obstacle, range) {
            Ok(paths) => out.extend(paths),
            Err(e) => log::warn!("relay search skipped: {e}"),
        }
    }
    out
}
