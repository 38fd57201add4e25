//! Range queries over vehicle positions.
//!
//! An R-tree (via `rstar`) over the current tick's positions turns the
//! "all pairs within range" scan from O(N²) distance checks into one
//! neighbourhood query per vehicle.  The index is rebuilt every tick; it
//! holds no state across ticks.
//!
//! The R-tree query is only a candidate filter.  Every candidate pair is
//! re-checked with the exact strict rule `distance < range`, so the result
//! is identical to a brute-force scan.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use v2x_core::Point;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// A `[x, y]` point with the caller's slot index.
#[derive(Clone)]
struct SlotEntry {
    point: [f64; 2],
    slot:  usize,
}

impl RTreeObject for SlotEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SlotEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── NeighborIndex ─────────────────────────────────────────────────────────────

/// Spatial index over one tick's positions, addressed by slot (the position's
/// index in the slice passed to [`NeighborIndex::build`]).
pub struct NeighborIndex {
    positions: Vec<Point>,
    tree:      RTree<SlotEntry>,
}

impl NeighborIndex {
    /// Bulk-load an index over `positions`.
    pub fn build(positions: &[Point]) -> Self {
        let entries = positions
            .iter()
            .enumerate()
            .map(|(slot, p)| SlotEntry { point: [p.x, p.y], slot })
            .collect();
        Self {
            positions: positions.to_vec(),
            tree:      RTree::bulk_load(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Squared query radius, padded so float rounding can only add
    /// candidates, never drop one.
    #[inline]
    fn query_radius_sq(range: f64) -> f64 {
        range * range * (1.0 + 1e-9) + 1e-9
    }

    /// All slots strictly within `range` of `center`, ascending.
    pub fn within(&self, center: Point, range: f64) -> Vec<usize> {
        if range <= 0.0 {
            return Vec::new();
        }
        let mut slots: Vec<usize> = self
            .tree
            .locate_within_distance([center.x, center.y], Self::query_radius_sq(range))
            .filter(|e| self.positions[e.slot].distance(center) < range)
            .map(|e| e.slot)
            .collect();
        slots.sort_unstable();
        slots
    }

    /// All unordered slot pairs `(i, j)` with `i < j` and
    /// `distance(i, j) < range`, sorted lexicographically.
    pub fn pairs_within(&self, range: f64) -> Vec<(usize, usize)> {
        if range <= 0.0 {
            return Vec::new();
        }
        let r2 = Self::query_radius_sq(range);
        let mut pairs = Vec::new();
        for (i, &p) in self.positions.iter().enumerate() {
            for entry in self.tree.locate_within_distance([p.x, p.y], r2) {
                let j = entry.slot;
                if j > i && p.distance(self.positions[j]) < range {
                    pairs.push((i, j));
                }
            }
        }
        pairs.sort_unstable();
        pairs
    }
}
