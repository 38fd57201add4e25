//! Horizontal lane geometry.

use v2x_core::{Direction, Point};

/// A horizontal lane at height `y`, driven from `start_x` towards `end_x`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lane {
    pub start_x: f64,
    pub end_x:   f64,
    pub y:       f64,
}

impl Lane {
    pub const fn new(start_x: f64, end_x: f64, y: f64) -> Self {
        Self { start_x, end_x, y }
    }

    /// The point where vehicles enter (and re-enter after wrapping).
    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.y)
    }

    /// Direction that takes a vehicle from `start_x` towards `end_x`.
    #[inline]
    pub fn natural_direction(&self) -> Direction {
        Direction::from_sign(self.end_x - self.start_x)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end_x - self.start_x).abs()
    }

    pub fn is_finite(&self) -> bool {
        self.start_x.is_finite() && self.end_x.is_finite() && self.y.is_finite()
    }
}
