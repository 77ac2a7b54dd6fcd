// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for editor and scene operations.

use crate::objects::BuildingKey;
use thiserror::Error;

/// Result type alias for scene operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during editor orchestration.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying geometry failure (bad coordinates, degenerate rings).
    #[error("geometry error: {0}")]
    Geometry(#[from] siteplan_geometry::Error),

    /// A building operation ran before any playground was defined.
    #[error("no playground defined for this project")]
    NoPlayground,

    /// A referenced building is not in the object set.
    #[error("building not found: {0:?}")]
    UnknownBuilding(BuildingKey),

    /// The session is not in a state that allows the requested transition.
    #[error("invalid editor transition: {0}")]
    InvalidTransition(&'static str),

    /// Persistence payload could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
