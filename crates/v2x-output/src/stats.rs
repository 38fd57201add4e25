//! Per-link occlusion statistics.
//!
//! [`OcclusionStats`] watches every tick and accumulates, for each link id
//! that ever appeared:
//!
//! - how many ticks it was present and how many of those it was blocked,
//! - how often it went from clear to blocked (an *occlusion event*),
//! - the range of endpoint distances it was seen at.
//!
//! An occlusion event is counted when a link is blocked and was clear the
//! previous time it was present.  A link that first appears already blocked
//! does not count as an event.

use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::path::Path;

use v2x_core::{LinkId, Tick};
use v2x_link::{Link, LinkClass};
use v2x_sim::{SimObserver, TickOutput};

use crate::OutputResult;

/// Accumulated statistics for one link id.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkStats {
    pub class:            LinkClass,
    pub ticks_present:    u64,
    pub ticks_blocked:    u64,
    pub occlusion_events: u64,
    pub min_distance:     f64,
    pub max_distance:     f64,
    distance_sum:         f64,
    /// `blocked` the last time this link was present.
    last_blocked:         bool,
}

impl LinkStats {
    fn first(link: &Link) -> Self {
        Self {
            class:            link.class,
            ticks_present:    1,
            ticks_blocked:    link.blocked as u64,
            occlusion_events: 0,
            min_distance:     link.distance,
            max_distance:     link.distance,
            distance_sum:     link.distance,
            last_blocked:     link.blocked,
        }
    }

    fn record(&mut self, link: &Link) {
        self.ticks_present += 1;
        if link.blocked {
            self.ticks_blocked += 1;
            if !self.last_blocked {
                self.occlusion_events += 1;
            }
        }
        self.min_distance = self.min_distance.min(link.distance);
        self.max_distance = self.max_distance.max(link.distance);
        self.distance_sum += link.distance;
        self.last_blocked = link.blocked;
    }

    /// Share of present ticks in which the link was blocked, in `[0, 1]`.
    pub fn blocked_fraction(&self) -> f64 {
        if self.ticks_present == 0 {
            0.0
        } else {
            self.ticks_blocked as f64 / self.ticks_present as f64
        }
    }

    pub fn mean_distance(&self) -> f64 {
        if self.ticks_present == 0 {
            0.0
        } else {
            self.distance_sum / self.ticks_present as f64
        }
    }
}

/// A [`SimObserver`] that accumulates [`LinkStats`] for every link id.
#[derive(Clone, Debug, Default)]
pub struct OcclusionStats {
    links: BTreeMap<LinkId, LinkStats>,
    ticks: u64,
}

impl OcclusionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tick's links into the totals.
    pub fn record(&mut self, output: &TickOutput) {
        self.ticks += 1;
        for link in &output.links.links {
            match self.links.get_mut(&link.id) {
                Some(stats) => stats.record(link),
                None => {
                    self.links.insert(link.id.clone(), LinkStats::first(link));
                }
            }
        }
    }

    /// Number of ticks observed.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn get(&self, id: &LinkId) -> Option<&LinkStats> {
        self.links.get(id)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// All links, sorted by id.
    pub fn iter(&self) -> impl Iterator<Item = (&LinkId, &LinkStats)> {
        self.links.iter()
    }

    /// Total clear→blocked transitions across every link.
    pub fn total_occlusion_events(&self) -> u64 {
        self.links.values().map(|s| s.occlusion_events).sum()
    }

    /// Links that were blocked at least once, most-blocked first.
    pub fn most_blocked(&self, n: usize) -> Vec<(&LinkId, &LinkStats)> {
        let mut out: Vec<_> = self.links.iter().filter(|(_, s)| s.ticks_blocked > 0).collect();
        out.sort_by(|a, b| {
            b.1.blocked_fraction()
                .total_cmp(&a.1.blocked_fraction())
                .then_with(|| a.0.cmp(b.0))
        });
        out.truncate(n);
        out
    }

    /// Write one row per link to `path`:
    /// `link_id,class,ticks_present,ticks_blocked,blocked_fraction,
    /// occlusion_events,min_distance,max_distance,mean_distance`.
    pub fn write_csv(&self, path: &Path) -> OutputResult<()> {
        let mut w = csv::Writer::from_path(path)?;
        w.write_record([
            "link_id",
            "class",
            "ticks_present",
            "ticks_blocked",
            "blocked_fraction",
            "occlusion_events",
            "min_distance",
            "max_distance",
            "mean_distance",
        ])?;
        for (id, s) in &self.links {
            w.write_record(&[
                id.to_string(),
                s.class.as_str().to_owned(),
                s.ticks_present.to_string(),
                s.ticks_blocked.to_string(),
                format!("{:.4}", s.blocked_fraction()),
                s.occlusion_events.to_string(),
                format!("{:.3}", s.min_distance),
                format!("{:.3}", s.max_distance),
                format!("{:.3}", s.mean_distance()),
            ])?;
        }
        w.flush()?;
        Ok(())
    }
}

impl SimObserver for OcclusionStats {
    fn on_tick_end(&mut self, _tick: Tick, output: &TickOutput) -> ControlFlow<()> {
        self.record(output);
        ControlFlow::Continue(())
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        log::debug!(
            "occlusion stats at {final_tick}: {} links, {} occlusion events",
            self.links.len(),
            self.total_occlusion_events(),
        );
    }
}
