//! Connectivity evaluation: every candidate pair, range-checked and
//! occlusion-tested.

use v2x_core::{BaseStation, LinkId, NodeId, SimConfig};
use v2x_mobility::Fleet;
use v2x_spatial::{NeighborIndex, Obstacle};

use crate::{Link, LinkClass, LinkRole, RelayPath};

/// The subset of [`SimConfig`] the evaluator reads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EvalParams {
    /// Strict upper bound on link distance.
    pub range: f64,
    /// Apply the range rule to base-station links too.
    pub gate_base_station_links: bool,
}

impl From<&SimConfig> for EvalParams {
    fn from(cfg: &SimConfig) -> Self {
        Self {
            range:                   cfg.range,
            gate_base_station_links: cfg.gate_base_station_links,
        }
    }
}

/// All links for one tick.
///
/// Ordering: base-station links in fleet order, then vehicle↔vehicle links
/// sorted by `(slot_i, slot_j)`.  The same positions always produce the same
/// sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkSet {
    pub links: Vec<Link>,
    /// Number of links with `blocked == false`.
    pub active_count: usize,
}

impl LinkSet {
    fn from_links(links: Vec<Link>) -> Self {
        let active_count = links.iter().filter(|l| !l.blocked).count();
        Self { links, active_count }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn blocked_count(&self) -> usize {
        self.links.len() - self.active_count
    }

    pub fn get(&self, id: &LinkId) -> Option<&Link> {
        self.links.iter().find(|l| &l.id == id)
    }

    /// The link between `a` and `b`, if it was evaluated this tick.
    pub fn between(&self, a: &NodeId, b: &NodeId) -> Option<&Link> {
        self.get(&LinkId::between(a, b))
    }

    /// Re-tag every link that is a hop of one of `paths` as
    /// [`LinkRole::Relay`].
    pub fn mark_relay_hops(&mut self, paths: &[RelayPath]) {
        if paths.is_empty() {
            return;
        }
        for link in &mut self.links {
            if paths.iter().any(|p| p.hop1 == link.id || p.hop2 == link.id) {
                link.role = LinkRole::Relay;
            }
        }
    }
}

/// Evaluate every relevant node pair for the current positions.
///
/// - vehicle↔base-station: always included unless
///   `gate_base_station_links` is set and the pair is out of range.
/// - vehicle↔vehicle: included iff `distance < range`.
///
/// A missing obstacle never blocks.
pub fn evaluate(
    fleet:    &Fleet,
    station:  &BaseStation,
    obstacle: Option<&Obstacle>,
    params:   EvalParams,
) -> LinkSet {
    let vehicles = fleet.as_slice();
    let mut links = Vec::with_capacity(vehicles.len() * 2);

    // ── Vehicle ↔ base station ────────────────────────────────────────────
    for v in vehicles {
        let link = Link::evaluate(
            (&v.id, v.position),
            (&station.id, station.position),
            LinkClass::V2I,
            obstacle,
        );
        if params.gate_base_station_links && link.distance >= params.range {
            log::trace!("{} out of range ({:.1})", link.id, link.distance);
            continue;
        }
        links.push(link);
    }

    // ── Vehicle ↔ vehicle ─────────────────────────────────────────────────
    let index = NeighborIndex::build(&fleet.positions());
    let pairs = index.pairs_within(params.range);

    let pair_link = |&(i, j): &(usize, usize)| {
        let (a, b) = (&vehicles[i], &vehicles[j]);
        Link::evaluate((&a.id, a.position), (&b.id, b.position), LinkClass::V2V, obstacle)
    };

    #[cfg(not(feature = "parallel"))]
    links.extend(pairs.iter().map(pair_link));

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        let v2v: Vec<Link> = pairs.par_iter().map(pair_link).collect();
        links.extend(v2v);
    }

    let set = LinkSet::from_links(links);
    log::debug!(
        "evaluated {} links ({} active, {} blocked)",
        set.len(),
        set.active_count,
        set.blocked_count(),
    );
    set
}
