//! The `Fleet` — every vehicle in the scene plus the positions to restore on
//! reset.

use std::collections::HashMap;

use v2x_core::{NodeId, Point};

use crate::{MobilityError, MobilityResult, Vehicle};

/// Owns all vehicles.
///
/// Vehicles keep the order they were supplied in; that order (the *slot*) is
/// what the connectivity evaluator iterates in, so output ordering is stable
/// across ticks.
#[derive(Clone, Debug)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
    /// Positions at construction time, indexed by slot.
    initial:  Vec<Point>,
    slots:    HashMap<NodeId, usize>,
}

impl Fleet {
    /// Validate and take ownership of `vehicles`.
    ///
    /// # Errors
    ///
    /// Duplicate ids, negative or non-finite speed, and non-finite lane or
    /// position values are rejected.
    pub fn new(vehicles: Vec<Vehicle>) -> MobilityResult<Self> {
        let mut slots = HashMap::with_capacity(vehicles.len());
        for (slot, v) in vehicles.iter().enumerate() {
            if !v.speed.is_finite() || v.speed < 0.0 {
                return Err(MobilityError::InvalidSpeed { id: v.id.clone(), speed: v.speed });
            }
            if !v.lane.is_finite() || !v.position.is_finite() {
                return Err(MobilityError::NonFinite(v.id.clone()));
            }
            if slots.insert(v.id.clone(), slot).is_some() {
                return Err(MobilityError::DuplicateVehicle(v.id.clone()));
            }
        }
        let initial = vehicles.iter().map(|v| v.position).collect();
        Ok(Self { vehicles, initial, slots })
    }

    /// A fleet with no vehicles.
    pub fn empty() -> Self {
        Self { vehicles: Vec::new(), initial: Vec::new(), slots: HashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vehicle> {
        self.vehicles.iter()
    }

    pub fn as_slice(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Slot of the vehicle with `id`, if present.
    #[inline]
    pub fn slot_of(&self, id: &NodeId) -> Option<usize> {
        self.slots.get(id).copied()
    }

    pub fn get(&self, id: &NodeId) -> Option<&Vehicle> {
        self.slot_of(id).map(|slot| &self.vehicles[slot])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.slots.contains_key(id)
    }

    /// Current positions, indexed by slot.
    pub fn positions(&self) -> Vec<Point> {
        self.vehicles.iter().map(|v| v.position).collect()
    }

    /// Advance every vehicle by one tick.
    ///
    /// Completes for the whole fleet before returning, so callers never see a
    /// half-updated set of positions.
    pub fn advance_all(&mut self) {
        for v in &mut self.vehicles {
            v.advance();
        }
    }

    /// Put every vehicle back where it was at construction.
    pub fn reset(&mut self) {
        for (v, &p) in self.vehicles.iter_mut().zip(&self.initial) {
            v.position = p;
        }
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item = &'a Vehicle;
    type IntoIter = std::slice::Iter<'a, Vehicle>;
    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.iter()
    }
}
