//! Per-vehicle state and the one-tick motion step.

use v2x_core::{Direction, NodeId, Point};

use crate::Lane;

/// A moving node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id:        NodeId,
    /// Current position.  `position.y == lane.y` at all times.
    pub position:  Point,
    pub lane:      Lane,
    pub direction: Direction,
    /// Distance covered per tick, in plane units.  Never negative.
    pub speed:     f64,
}

impl Vehicle {
    /// A vehicle sitting at its lane's start.
    pub fn on_lane(id: impl Into<NodeId>, lane: Lane, direction: Direction, speed: f64) -> Self {
        Self {
            id: id.into(),
            position: lane.start(),
            lane,
            direction,
            speed,
        }
    }

    /// Same as [`Vehicle::on_lane`] but starting at `x` instead of the lane start.
    pub fn at(id: impl Into<NodeId>, x: f64, lane: Lane, direction: Direction, speed: f64) -> Self {
        let mut v = Self::on_lane(id, lane, direction, speed);
        v.position.x = x;
        v
    }

    /// Move one tick along the lane, wrapping to the start at the far end.
    ///
    /// Leftward vehicles wrap once `x <= end_x`; rightward ones once
    /// `x >= end_x`.
    pub fn advance(&mut self) {
        let x = self.position.x + self.speed * self.direction.sign();
        let passed_end = match self.direction {
            Direction::Left  => x <= self.lane.end_x,
            Direction::Right => x >= self.lane.end_x,
        };
        self.position = if passed_end {
            log::trace!("{} wrapped to lane start {}", self.id, self.lane.start_x);
            self.lane.start()
        } else {
            Point::new(x, self.lane.y)
        };
    }
}
