//! The building footprint that can block line-of-sight links.

use v2x_core::Point;

use crate::{SpatialError, SpatialResult};

/// An axis-aligned rectangle: `(x, y)` is the corner with the smallest
/// coordinates (top-left in screen space), `width`/`height` extend towards
/// +x/+y.
///
/// Negative sizes are accepted and normalised by [`Obstacle::bounds`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub x:      f64,
    pub y:      f64,
    pub width:  f64,
    pub height: f64,
}

impl Obstacle {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Reject NaN/∞ anywhere in the rectangle.
    pub fn validate(&self) -> SpatialResult<()> {
        if [self.x, self.y, self.width, self.height].iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(SpatialError::NonFiniteObstacle(format!("{self:?}")))
        }
    }

    /// Normalised `(left, right, top, bottom)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (x2, y2) = (self.x + self.width, self.y + self.height);
        (self.x.min(x2), self.x.max(x2), self.y.min(y2), self.y.max(y2))
    }

    /// A zero-area rectangle never blocks anything.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// The four edges, clockwise from the top-left corner.
    pub fn edges(&self) -> [(Point, Point); 4] {
        let (left, right, top, bottom) = self.bounds();
        let lt = Point::new(left, top);
        let rt = Point::new(right, top);
        let rb = Point::new(right, bottom);
        let lb = Point::new(left, bottom);
        [(lt, rt), (rt, rb), (rb, lb), (lb, lt)]
    }

    /// Inclusive point-in-rectangle test.
    pub fn contains(&self, p: Point) -> bool {
        let (left, right, top, bottom) = self.bounds();
        p.x >= left && p.x <= right && p.y >= top && p.y <= bottom
    }
}
