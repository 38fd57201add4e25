//! String identifiers for nodes and links.
//!
//! Node ids come from the scene file and are opaque strings (`"car1"`,
//! `"base"`).  A link between two nodes is keyed by a [`LinkId`] whose text
//! is the lexicographically smaller id, a `-`, then the larger one, so
//! `LinkId::between(a, b) == LinkId::between(b, a)` for every pair.

use std::borrow::Borrow;
use std::fmt;

/// Identifier of a vehicle or base station.  Unique within a scene.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Canonical identifier of an unordered node pair.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LinkId(String);

impl LinkId {
    /// Build the canonical id for the pair `{a, b}`.
    pub fn between(a: &NodeId, b: &NodeId) -> Self {
        let (lo, hi) = Self::ordered(a, b);
        LinkId(format!("{lo}-{hi}"))
    }

    /// The pair in canonical (lexicographic) order.
    #[inline]
    pub fn ordered<'a>(a: &'a NodeId, b: &'a NodeId) -> (&'a NodeId, &'a NodeId) {
        if a <= b { (a, b) } else { (b, a) }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LinkId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
