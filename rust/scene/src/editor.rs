// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Editor orchestration: draw and edit sessions over the scene object set.
//!
//! The first committed polygon becomes the playground; every later draw is a
//! building, clipped against the playground boundary before it is accepted.
//! Editing the playground replaces its ring and cascades one re-clip over
//! every building from a single snapshot of the new boundary, applied as one
//! state transition. All geometry is computed in full before any state is
//! mutated, so a failure partway leaves prior state untouched.
//!
//! Session lifecycle: `Idle -> Drawing -> {committed | rejected} -> Idle`
//! for draws, `Idle -> Editing -> {committed | cancelled} -> Idle` for
//! edits. A rejected draw (empty clip result) creates nothing and is not an
//! error.

use crate::error::{Error, Result};
use crate::objects::{
    BuildingKey, BuildingObject, ObjectId, PlaygroundObject, SceneObjectSet, Selectable,
};
use siteplan_geometry::{
    clip, GeoPoint, ProjectionConfig, Ring, PLAYGROUND_SLAB_HEIGHT,
};
use tracing::{debug, info, warn};

/// Where the editor session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// A draw tool is active; awaiting ring completion.
    Drawing,
    /// An existing object is being reshaped.
    Editing(ObjectId),
}

/// A committed geometry change, handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderUpdate {
    pub id: ObjectId,
    pub ring: Ring,
    pub height: f64,
}

/// Result of committing a draw session.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    /// First polygon of the project: it became the playground.
    PlaygroundCreated(RenderUpdate),
    /// A building was created inside the playground.
    BuildingCreated(BuildingKey, RenderUpdate),
    /// The drawn ring had no overlap with the playground; nothing was
    /// created and no state changed.
    Rejected,
}

/// Result of committing an edit session on a single object.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Committed(RenderUpdate),
    /// The edited ring clipped to nothing; prior geometry was kept.
    Rejected,
}

/// Everything that changed in a playground edit.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeReport {
    /// New playground mesh plus every re-clipped building that survived.
    pub updates: Vec<RenderUpdate>,
    /// Buildings whose re-clipped ring came out empty. Their records are
    /// kept (with an empty ring) and flagged; deleting them is the
    /// caller's decision.
    pub orphaned: Vec<BuildingKey>,
}

/// The editor: projection frame, object set, and session state.
#[derive(Debug)]
pub struct Editor {
    projection: ProjectionConfig,
    objects: SceneObjectSet,
    state: SessionState,
}

impl Editor {
    pub fn new(projection: ProjectionConfig) -> Self {
        Self {
            projection,
            objects: SceneObjectSet::new(),
            state: SessionState::Idle,
        }
    }

    /// Adopt a previously loaded object set (project load path).
    pub fn with_objects(projection: ProjectionConfig, objects: SceneObjectSet) -> Self {
        Self {
            projection,
            objects,
            state: SessionState::Idle,
        }
    }

    pub fn objects(&self) -> &SceneObjectSet {
        &self.objects
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn projection(&self) -> &ProjectionConfig {
        &self.projection
    }

    /// Convert a drawn geographic ring into the planar frame.
    ///
    /// All points are converted before anything else happens, so an invalid
    /// coordinate aborts the whole draw with no state change.
    pub fn planar_ring(&self, geo_points: &[GeoPoint]) -> Result<Ring> {
        let points = geo_points
            .iter()
            .map(|&p| self.projection.to_planar(p))
            .collect::<siteplan_geometry::Result<Vec<_>>>()?;
        Ok(Ring::new(points))
    }

    /// Convert a planar ring back to geographic points for persistence.
    pub fn geo_ring(&self, ring: &Ring) -> Vec<GeoPoint> {
        ring.iter().map(|&p| self.projection.to_geo(p)).collect()
    }

    // ------------------------------------------------------------------
    // Draw sessions
    // ------------------------------------------------------------------

    /// Activate the draw tool.
    pub fn begin_draw(&mut self) -> Result<()> {
        match self.state {
            SessionState::Idle => {
                self.state = SessionState::Drawing;
                Ok(())
            }
            _ => Err(Error::InvalidTransition("draw requires an idle session")),
        }
    }

    /// Abandon the draw tool without committing anything.
    pub fn cancel_draw(&mut self) -> Result<()> {
        match self.state {
            SessionState::Drawing => {
                self.state = SessionState::Idle;
                Ok(())
            }
            _ => Err(Error::InvalidTransition("no draw session to cancel")),
        }
    }

    /// Complete a draw with the given planar ring.
    ///
    /// Without a playground the ring becomes the playground (zone-definition
    /// mode, slab height). With one, the ring is clipped against it; an
    /// empty result rejects the draw and the session returns to idle.
    pub fn commit_draw(&mut self, ring: Ring) -> Result<DrawOutcome> {
        if self.state != SessionState::Drawing {
            return Err(Error::InvalidTransition("no draw session in progress"));
        }
        if !ring.is_valid() {
            return Err(Error::Geometry(siteplan_geometry::Error::DegenerateRing(
                ring.len(),
            )));
        }

        let outcome = match self.objects.playground_ring() {
            None => {
                debug!(points = ring.len(), "zone definition: ring becomes playground");
                let update = RenderUpdate {
                    id: ObjectId::Playground,
                    ring: ring.clone(),
                    height: PLAYGROUND_SLAB_HEIGHT,
                };
                self.objects.playground = Some(PlaygroundObject::new(ring));
                DrawOutcome::PlaygroundCreated(update)
            }
            Some(boundary) => {
                let clipped = clip(&ring, boundary);
                if clipped.is_valid() {
                    let building = BuildingObject::new(clipped.clone());
                    let height = building.extrusion_height()?;
                    let key = self.objects.insert_building(building);
                    let update = RenderUpdate {
                        id: ObjectId::Building(key),
                        ring: clipped,
                        height,
                    };
                    DrawOutcome::BuildingCreated(key, update)
                } else {
                    info!("draw rejected: footprint does not overlap the playground");
                    DrawOutcome::Rejected
                }
            }
        };

        self.state = SessionState::Idle;
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Edit sessions
    // ------------------------------------------------------------------

    /// Start reshaping an existing object.
    pub fn begin_edit(&mut self, id: ObjectId) -> Result<()> {
        if self.state != SessionState::Idle {
            return Err(Error::InvalidTransition("edit requires an idle session"));
        }
        match id {
            ObjectId::Playground if !self.objects.has_playground() => {
                return Err(Error::NoPlayground);
            }
            ObjectId::Building(key) => {
                self.objects.building(key)?;
            }
            _ => {}
        }
        self.state = SessionState::Editing(id);
        Ok(())
    }

    /// Deselect without finishing; prior geometry is untouched.
    pub fn cancel_edit(&mut self) -> Result<()> {
        match self.state {
            SessionState::Editing(_) => {
                self.state = SessionState::Idle;
                Ok(())
            }
            _ => Err(Error::InvalidTransition("no edit session to cancel")),
        }
    }

    /// Commit a reshaped building footprint.
    ///
    /// The new ring is clipped against the current playground boundary. An
    /// empty result rejects the edit and keeps the prior footprint.
    pub fn commit_building_edit(&mut self, key: BuildingKey, ring: Ring) -> Result<EditOutcome> {
        if self.state != SessionState::Editing(ObjectId::Building(key)) {
            return Err(Error::InvalidTransition(
                "building edit does not match the active session",
            ));
        }
        let boundary = self.objects.playground_ring().ok_or(Error::NoPlayground)?;
        let clipped = clip(&ring, boundary);

        if !clipped.is_valid() {
            info!(?key, "building edit rejected: no overlap with playground");
            self.state = SessionState::Idle;
            return Ok(EditOutcome::Rejected);
        }

        // Derived height is validated before the footprint is overwritten,
        // so a metadata failure leaves the prior geometry intact.
        let height = self.objects.building(key)?.extrusion_height()?;

        self.objects.building_mut(key)?.ring = clipped.clone();
        self.state = SessionState::Idle;
        Ok(EditOutcome::Committed(RenderUpdate {
            id: ObjectId::Building(key),
            ring: clipped,
            height,
        }))
    }

    /// Commit a reshaped playground boundary and cascade over buildings.
    ///
    /// Every building is re-clipped against one snapshot of the new
    /// boundary; all new rings are computed before any are applied, so the
    /// cascade is a single logical state transition. Buildings clipped away
    /// entirely are flagged as orphaned, never deleted here.
    pub fn commit_playground_edit(&mut self, ring: Ring) -> Result<CascadeReport> {
        if self.state != SessionState::Editing(ObjectId::Playground) {
            return Err(Error::InvalidTransition(
                "playground edit does not match the active session",
            ));
        }
        if !ring.is_valid() {
            return Err(Error::Geometry(siteplan_geometry::Error::DegenerateRing(
                ring.len(),
            )));
        }
        if !self.objects.has_playground() {
            return Err(Error::NoPlayground);
        }

        // Compute every re-clip and derived height from the same boundary
        // snapshot before mutating anything; an extrusion failure aborts
        // the cascade with prior state fully intact.
        let mut updates = vec![RenderUpdate {
            id: ObjectId::Playground,
            ring: ring.clone(),
            height: PLAYGROUND_SLAB_HEIGHT,
        }];
        let mut orphaned = Vec::new();
        let mut reclipped: Vec<(BuildingKey, Ring)> =
            Vec::with_capacity(self.objects.buildings.len());

        for (key, building) in self.objects.buildings.iter() {
            let new_ring = clip(&building.ring, &ring);
            if new_ring.is_valid() {
                let height = building.extrusion_height()?;
                updates.push(RenderUpdate {
                    id: ObjectId::Building(key),
                    ring: new_ring.clone(),
                    height,
                });
            } else {
                orphaned.push(key);
            }
            reclipped.push((key, new_ring));
        }

        // Apply as one state transition.
        let playground = self.objects.playground.as_mut().ok_or(Error::NoPlayground)?;
        playground.ring = ring;
        for (key, new_ring) in reclipped {
            self.objects.building_mut(key)?.ring = new_ring;
        }

        if !orphaned.is_empty() {
            warn!(
                count = orphaned.len(),
                "playground shrink clipped buildings away; records kept and flagged"
            );
        }

        self.state = SessionState::Idle;
        Ok(CascadeReport { updates, orphaned })
    }

    // ------------------------------------------------------------------
    // Floor metadata
    // ------------------------------------------------------------------

    /// Change a building's floor count and floor height, recomputing the
    /// derived extrusion height. Validation happens before any mutation.
    pub fn set_floor_metadata(
        &mut self,
        key: BuildingKey,
        floors: u32,
        floors_height: f64,
    ) -> Result<RenderUpdate> {
        let building = self.objects.building(key)?;
        if building.is_orphaned() {
            return Err(Error::Geometry(siteplan_geometry::Error::DegenerateRing(
                building.ring.len(),
            )));
        }
        let height = siteplan_geometry::building_height(floors, floors_height)?;

        let building = self.objects.building_mut(key)?;
        building.floors = floors;
        building.floors_height = floors_height;
        Ok(RenderUpdate {
            id: ObjectId::Building(key),
            ring: building.ring.clone(),
            height,
        })
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Forward a pick event to the selection consumer if the id still
    /// resolves to a live object.
    pub fn select(&self, id: ObjectId, consumer: &mut dyn Selectable) -> Result<()> {
        match id {
            ObjectId::Playground => {
                if !self.objects.has_playground() {
                    return Err(Error::NoPlayground);
                }
            }
            ObjectId::Building(key) => {
                self.objects.building(key)?;
            }
        }
        consumer.on_select(id);
        Ok(())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}
