// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP persistence payloads.
//!
//! The backend speaks snake_case JSON over distinct endpoints per object
//! kind (`create-playground`, `create-building`, `update-playground`,
//! `update-building`). Coordinates travel as planar `{x, y}` pairs; the
//! create path rounds them to whole metres, matching what the deployed
//! backend stores. This module defines the payload shapes and their
//! conversions only; transport is a collaborator's concern.

use crate::error::Result;
use crate::objects::{BuildingObject, PlaygroundObject, SceneObjectSet};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use siteplan_geometry::Ring;

/// A planar coordinate as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// Round to whole planar units for the create payloads.
    pub fn rounded(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }
}

impl From<Point2<f64>> for Coordinate {
    fn from(p: Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Coordinate> for Point2<f64> {
    fn from(c: Coordinate) -> Self {
        Point2::new(c.x, c.y)
    }
}

/// Convert a ring into its persisted coordinate list.
pub fn ring_to_coordinates(ring: &Ring) -> Vec<Coordinate> {
    ring.iter().map(|&p| p.into()).collect()
}

/// Rebuild a ring from persisted coordinates.
pub fn coordinates_to_ring(coordinates: &[Coordinate]) -> Ring {
    coordinates.iter().map(|&c| Point2::from(c)).collect()
}

/// Endpoint suffixes, one per object kind and verb.
pub mod endpoints {
    pub const CREATE_PLAYGROUND: &str = "create-playground";
    pub const CREATE_BUILDING: &str = "create-building";
    pub const UPDATE_PLAYGROUND: &str = "update-playground";
    pub const UPDATE_BUILDING: &str = "update-building";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePlaygroundRequest {
    pub coordinates: Vec<Coordinate>,
    pub project_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBuildingRequest {
    pub coordinates: Vec<Coordinate>,
    pub project_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePlaygroundRequest {
    pub playground_id: i64,
    pub coordinates: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBuildingRequest {
    pub building_id: i64,
    pub coordinates: Vec<Coordinate>,
    pub floors: u32,
    pub floors_height: f64,
}

/// Id handed back by the create-building endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingCreatedResponse {
    pub building_id: i64,
}

/// Id handed back by the create-playground endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaygroundCreatedResponse {
    pub playground_id: i64,
}

/// Playground as returned by the project-load endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaygroundData {
    pub id: i64,
    pub coordinates: Vec<Coordinate>,
}

/// Building as returned by the project-load endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingData {
    pub id: i64,
    pub coordinates: Vec<Coordinate>,
    pub floors: u32,
    pub floors_height: f64,
}

/// Full project payload from the load endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub playground: Option<PlaygroundData>,
    #[serde(default)]
    pub buildings: Vec<BuildingData>,
}

impl CreatePlaygroundRequest {
    pub fn from_ring(ring: &Ring, project_id: i64) -> Self {
        Self {
            coordinates: ring_to_coordinates(ring)
                .into_iter()
                .map(Coordinate::rounded)
                .collect(),
            project_id,
        }
    }
}

impl CreateBuildingRequest {
    pub fn from_ring(ring: &Ring, project_id: i64) -> Self {
        Self {
            coordinates: ring_to_coordinates(ring)
                .into_iter()
                .map(Coordinate::rounded)
                .collect(),
            project_id,
        }
    }
}

impl UpdateBuildingRequest {
    pub fn from_building(building_id: i64, building: &BuildingObject) -> Self {
        Self {
            building_id,
            coordinates: ring_to_coordinates(&building.ring),
            floors: building.floors,
            floors_height: building.floors_height,
        }
    }
}

impl UpdatePlaygroundRequest {
    pub fn from_playground(playground_id: i64, playground: &PlaygroundObject) -> Self {
        Self {
            playground_id,
            coordinates: ring_to_coordinates(&playground.ring),
        }
    }
}

impl ProjectResponse {
    /// Parse a project-load payload.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Materialize the loaded project as a scene object set.
    ///
    /// Floor metadata is validated here so a bad payload is rejected at the
    /// load boundary instead of surfacing later inside an edit cascade.
    pub fn into_object_set(self) -> Result<SceneObjectSet> {
        let mut set = SceneObjectSet::new();
        if let Some(playground) = self.playground {
            set.playground = Some(PlaygroundObject {
                remote_id: Some(playground.id),
                ring: coordinates_to_ring(&playground.coordinates),
            });
        }
        for building in self.buildings {
            siteplan_geometry::building_height(building.floors, building.floors_height)?;
            set.insert_building(BuildingObject {
                remote_id: Some(building.id),
                ring: coordinates_to_ring(&building.coordinates),
                floors: building.floors,
                floors_height: building.floors_height,
            });
        }
        Ok(set)
    }
}
