// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Siteplan Scene
//!
//! Editor orchestration over the geometry core: the scene object set
//! (playground + buildings), draw/edit session state machines, the
//! playground-edit cascade, and the HTTP persistence payload shapes.
//!
//! The geometry itself lives in `siteplan-geometry`; this crate decides
//! what the editor does with it. Rendering and transport are collaborators:
//! they receive [`editor::RenderUpdate`] values and persistence DTOs, and
//! feed back pick events through the [`objects::Selectable`] capability.

pub mod editor;
pub mod error;
pub mod objects;
pub mod persist;

pub use editor::{CascadeReport, DrawOutcome, EditOutcome, Editor, RenderUpdate, SessionState};
pub use error::{Error, Result};
pub use objects::{
    BuildingKey, BuildingObject, ObjectId, PlaygroundObject, SceneObjectSet, Selectable,
};
