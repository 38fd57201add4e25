//! Line-of-sight tests against the obstacle.
//!
//! A link is *occluded* when the straight segment between its endpoints
//! crosses any of the obstacle's four edges.  Edge crossings are decided by
//! solving the 2×2 parametric system
//!
//! ```text
//! p1 + t·(p2 − p1) = q1 + u·(q2 − q1)
//! ```
//!
//! and accepting iff both `t` and `u` lie in `[0, 1]`.
//!
//! ## Known limitations
//!
//! - Parallel or collinear segments (determinant exactly zero) never count as
//!   intersecting, so a link running exactly along an edge is *not* blocked.
//! - A segment lying entirely inside the rectangle touches no edge and is not
//!   blocked.

use v2x_core::Point;

use crate::Obstacle;

/// 2-D cross product `a × b`.
#[inline]
fn cross(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

/// Parametric segment–segment intersection.
///
/// Returns `false` when the determinant is exactly zero (parallel, collinear,
/// or a zero-length segment).
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let (dx, dy) = (p2.x - p1.x, p2.y - p1.y);
    let (ex, ey) = (q2.x - q1.x, q2.y - q1.y);

    let det = cross(dx, dy, ex, ey);
    if det == 0.0 {
        return false;
    }

    let (wx, wy) = (q1.x - p1.x, q1.y - p1.y);
    let t = cross(wx, wy, ex, ey) / det;
    let u = cross(wx, wy, dx, dy) / det;

    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Both endpoints strictly beyond the same side of the rectangle.
///
/// When this holds no point of the segment can reach an edge, so the
/// detailed test would also return `false`.
#[inline]
fn trivially_outside(p1: Point, p2: Point, rect: &Obstacle) -> bool {
    let (left, right, top, bottom) = rect.bounds();
    (p1.x < left && p2.x < left)
        || (p1.x > right && p2.x > right)
        || (p1.y < top && p2.y < top)
        || (p1.y > bottom && p2.y > bottom)
}

/// `true` iff segment `p1–p2` crosses any of `rect`'s four edges.
///
/// Zero-area rectangles never block.
pub fn segment_intersects_rect(p1: Point, p2: Point, rect: &Obstacle) -> bool {
    if rect.is_degenerate() || trivially_outside(p1, p2, rect) {
        return false;
    }
    rect.edges()
        .iter()
        .any(|&(q1, q2)| segments_intersect(p1, p2, q1, q2))
}

/// Occlusion test with an optional obstacle.  No obstacle never blocks.
#[inline]
pub fn is_occluded(p1: Point, p2: Point, obstacle: Option<&Obstacle>) -> bool {
    obstacle.is_some_and(|rect| segment_intersects_rect(p1, p2, rect))
}
