// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The scene object set: one optional playground and its buildings.
//!
//! This is the geometry core's authoritative state. UI layers subscribe to
//! the updates the editor emits; they never reach in and mutate rings
//! directly. Buildings are stored in a slot map so their keys stay valid
//! across removals (generational indices), which is what lets pick events
//! from the rendering collaborator be correlated back to objects long after
//! they were created.

use crate::error::{Error, Result};
use siteplan_geometry::{building_height, Ring};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable key for a building footprint.
    pub struct BuildingKey;
}

/// Identifier attached to every mesh handed to the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectId {
    Playground,
    Building(BuildingKey),
}

/// Capability interface for the selection consumer.
///
/// The rendering collaborator implements this; the core only ever emits
/// object identifiers and never holds rendering callbacks.
pub trait Selectable {
    fn on_select(&mut self, id: ObjectId);
}

/// The enclosing zone polygon. At most one per project.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaygroundObject {
    /// Backend identifier, present once persisted.
    pub remote_id: Option<i64>,
    pub ring: Ring,
}

impl PlaygroundObject {
    pub fn new(ring: Ring) -> Self {
        Self {
            remote_id: None,
            ring,
        }
    }
}

/// A building footprint with floor metadata driving extrusion.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingObject {
    /// Backend identifier, present once persisted.
    pub remote_id: Option<i64>,
    pub ring: Ring,
    /// Number of floors, at least 1.
    pub floors: u32,
    /// Height of a single floor in metres, positive.
    pub floors_height: f64,
}

/// Default floor metadata for a freshly drawn building.
pub const DEFAULT_FLOORS: u32 = 1;
pub const DEFAULT_FLOORS_HEIGHT: f64 = 3.0;

impl BuildingObject {
    pub fn new(ring: Ring) -> Self {
        Self {
            remote_id: None,
            ring,
            floors: DEFAULT_FLOORS,
            floors_height: DEFAULT_FLOORS_HEIGHT,
        }
    }

    /// Derived extrusion height: floors x floor height.
    pub fn extrusion_height(&self) -> siteplan_geometry::Result<f64> {
        building_height(self.floors, self.floors_height)
    }

    /// Whether the footprint survived the last playground cascade.
    ///
    /// A shrunk playground can clip a building away entirely; the record is
    /// kept with an empty ring and flagged rather than deleted.
    pub fn is_orphaned(&self) -> bool {
        !self.ring.is_valid()
    }
}

/// Value owning the project's geometry. Persisted through the DTOs in
/// [`crate::persist`].
#[derive(Debug, Clone, Default)]
pub struct SceneObjectSet {
    pub playground: Option<PlaygroundObject>,
    pub buildings: SlotMap<BuildingKey, BuildingObject>,
}

impl SceneObjectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_playground(&self) -> bool {
        self.playground.is_some()
    }

    pub fn playground_ring(&self) -> Option<&Ring> {
        self.playground.as_ref().map(|p| &p.ring)
    }

    pub fn building(&self, key: BuildingKey) -> Result<&BuildingObject> {
        self.buildings.get(key).ok_or(Error::UnknownBuilding(key))
    }

    pub fn building_mut(&mut self, key: BuildingKey) -> Result<&mut BuildingObject> {
        self.buildings
            .get_mut(key)
            .ok_or(Error::UnknownBuilding(key))
    }

    /// Insert a building and return its stable key.
    pub fn insert_building(&mut self, building: BuildingObject) -> BuildingKey {
        self.buildings.insert(building)
    }

    /// Remove a building record. Deletion is a UI/persistence decision;
    /// the editor itself never calls this.
    pub fn remove_building(&mut self, key: BuildingKey) -> Result<BuildingObject> {
        self.buildings.remove(key).ok_or(Error::UnknownBuilding(key))
    }

    /// Keys of buildings whose rings were clipped away by a cascade.
    pub fn orphaned_buildings(&self) -> Vec<BuildingKey> {
        self.buildings
            .iter()
            .filter(|(_, b)| b.is_orphaned())
            .map(|(k, _)| k)
            .collect()
    }
}
