//! Siteplan Geometry Core
//!
//! Pure 2D polygon geometry for the site-massing editor: Web Mercator
//! projection into the local planar frame, Sutherland-Hodgman clipping of
//! footprints against the playground boundary, and polygon metrics.

pub mod clip;
pub mod error;
pub mod extrusion;
pub mod mercator;
pub mod ring;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};

pub use clip::clip;
pub use error::{Error, Result};
pub use extrusion::{building_height, validate_extrudable, PLAYGROUND_SLAB_HEIGHT};
pub use mercator::{GeoPoint, ProjectedPoint, ProjectionConfig, DEFAULT_ORIGIN, OFFSET_X, OFFSET_Y};
pub use ring::{Ring, MIN_RING_POINTS};
