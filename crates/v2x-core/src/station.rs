//! The fixed infrastructure node.

use crate::{NodeId, Point};

/// A base station: a node that never moves.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStation {
    pub id:       NodeId,
    pub position: Point,
}

impl BaseStation {
    pub fn new(id: impl Into<NodeId>, position: Point) -> Self {
        Self { id: id.into(), position }
    }
}
