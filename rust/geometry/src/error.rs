// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during geometry processing
#[derive(Error, Debug)]
pub enum Error {
    /// Geographic input outside the valid longitude/latitude domain.
    #[error("invalid coordinate: longitude {longitude}, latitude {latitude}")]
    InvalidCoordinate { longitude: f64, latitude: f64 },

    /// Fewer than 3 points where a simple polygon boundary is required.
    #[error("degenerate ring: {0} points, need at least 3")]
    DegenerateRing(usize),

    #[error("invalid extrusion parameters: {0}")]
    InvalidExtrusion(String),
}
