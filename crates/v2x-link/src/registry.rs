//! `LinkRegistry` — the only link state that survives from one tick to the
//! next.
//!
//! The registry holds the latest `Link` record for every id present in the
//! most recent tick.  Each `apply` replaces the whole contents and reports
//! the difference as a [`RegistryDiff`], which is what a renderer needs to
//! create, refresh, or hide visual elements by id.

use v2x_core::LinkId;

use crate::{Link, LinkRole, LinkSet, RelayPath};

#[cfg(feature = "fx-hash")]
type LinkMap = rustc_hash::FxHashMap<LinkId, Link>;
#[cfg(not(feature = "fx-hash"))]
type LinkMap = std::collections::HashMap<LinkId, Link>;

/// Ids that changed membership between two consecutive ticks.
///
/// Every list is sorted by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistryDiff {
    /// Present now, absent last tick.
    pub created: Vec<LinkId>,
    /// Present in both ticks.  The record itself may have changed.
    pub updated: Vec<LinkId>,
    /// Present last tick, absent now.  Consumers should drop these.
    pub removed: Vec<LinkId>,
}

impl RegistryDiff {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct LinkRegistry {
    links: LinkMap,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the registry contents with `set`, tagging any link that is a
    /// hop of one of `relays` as [`LinkRole::Relay`].
    pub fn apply(&mut self, set: &LinkSet, relays: &[RelayPath]) -> RegistryDiff {
        let mut next = LinkMap::default();
        next.reserve(set.links.len());
        for link in &set.links {
            let mut link = link.clone();
            if relays.iter().any(|p| p.hop1 == link.id || p.hop2 == link.id) {
                link.role = LinkRole::Relay;
            }
            next.insert(link.id.clone(), link);
        }

        let mut diff = RegistryDiff::default();
        for id in next.keys() {
            if self.links.contains_key(id) {
                diff.updated.push(id.clone());
            } else {
                diff.created.push(id.clone());
            }
        }
        diff.removed = self
            .links
            .keys()
            .filter(|id| !next.contains_key(*id))
            .cloned()
            .collect();

        diff.created.sort_unstable();
        diff.updated.sort_unstable();
        diff.removed.sort_unstable();

        log::trace!(
            "registry: +{} ~{} -{}",
            diff.created.len(),
            diff.updated.len(),
            diff.removed.len(),
        );
        self.links = next;
        diff
    }

    pub fn get(&self, id: &LinkId) -> Option<&Link> {
        self.links.get(id)
    }

    pub fn contains(&self, id: &LinkId) -> bool {
        self.links.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }

    /// All tracked links, sorted by id.
    pub fn sorted(&self) -> Vec<&Link> {
        let mut out: Vec<&Link> = self.links.values().collect();
        out.sort_unstable_by(|a, b| a.id.cmp(&b.id));
        out
    }
}
