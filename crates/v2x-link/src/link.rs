//! Link records produced each tick.

use v2x_core::{LinkId, NodeId, Point};
use v2x_spatial::{Obstacle, is_occluded};

/// Whether a link is a plain direct link or one hop of a relay path.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum LinkRole {
    #[default]
    Direct,
    Relay,
}

impl LinkRole {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkRole::Direct => "direct",
            LinkRole::Relay  => "relay",
        }
    }
}

impl std::fmt::Display for LinkRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle↔vehicle or vehicle↔infrastructure.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum LinkClass {
    V2V,
    V2I,
}

impl LinkClass {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkClass::V2V => "V2V",
            LinkClass::V2I => "V2I",
        }
    }
}

impl std::fmt::Display for LinkClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate link for the current tick.
///
/// `blocked` depends only on the two endpoint positions and the obstacle at
/// evaluation time.  Nothing is carried over from earlier ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub id:        LinkId,
    /// Endpoints in canonical (lexicographic) order.
    pub endpoints: [NodeId; 2],
    pub blocked:   bool,
    pub role:      LinkRole,
    pub class:     LinkClass,
    /// Endpoint distance this tick.
    pub distance:  f64,
}

impl Link {
    /// Measure and occlusion-test the pair `a`–`b`.
    pub fn evaluate(
        a:        (&NodeId, Point),
        b:        (&NodeId, Point),
        class:    LinkClass,
        obstacle: Option<&Obstacle>,
    ) -> Self {
        let (lo, hi) = LinkId::ordered(a.0, b.0);
        Self {
            id:        LinkId::between(a.0, b.0),
            endpoints: [lo.clone(), hi.clone()],
            blocked:   is_occluded(a.1, b.1, obstacle),
            role:      LinkRole::Direct,
            class,
            distance:  a.1.distance(b.1),
        }
    }

    /// The endpoint that is not `node`, if `node` is an endpoint.
    pub fn other(&self, node: &NodeId) -> Option<&NodeId> {
        match &self.endpoints {
            [a, b] if a == node => Some(b),
            [a, b] if b == node => Some(a),
            _ => None,
        }
    }
}
