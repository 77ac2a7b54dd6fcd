// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Web Mercator projection and the editor's planar coordinate frame.
//!
//! Drawn map coordinates arrive as longitude/latitude pairs and are carried
//! through a normalized Web Mercator projection (the mapbox-gl convention:
//! world in [0, 1] on both axes) into the local planar space used for
//! clipping and extrusion. The frame is defined by a [`ProjectionConfig`]
//! value passed into every call, never by ambient globals, so multiple
//! projects with different origins can coexist.

use crate::error::{Error, Result};
use nalgebra::Point2;

/// Mean earth radius in metres (the mapbox-gl value).
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Earth circumference in metres at the equator.
const EARTH_CIRCUMFERENCE_M: f64 = 2.0 * std::f64::consts::PI * EARTH_RADIUS_M;

/// A (longitude, latitude) pair in geographic degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Validate the geographic domain.
    ///
    /// Latitudes at exactly ±90° are rejected as well: the Mercator
    /// projection is singular at the poles.
    pub fn validate(&self) -> Result<()> {
        let lon_ok = (-180.0..=180.0).contains(&self.longitude);
        let lat_ok = self.latitude > -90.0 && self.latitude < 90.0;
        if lon_ok && lat_ok && self.longitude.is_finite() && self.latitude.is_finite() {
            Ok(())
        } else {
            Err(Error::InvalidCoordinate {
                longitude: self.longitude,
                latitude: self.latitude,
            })
        }
    }
}

/// A geographic point carried into normalized Mercator space.
///
/// `x` and `y` are in [0, 1] for in-range input; `z` is the altitude
/// expressed in mercator units at the point's latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ProjectedPoint {
    /// Project a geographic point at a given altitude (metres).
    pub fn from_geo(geo: GeoPoint, altitude: f64) -> Result<Self> {
        geo.validate()?;
        Ok(Self {
            x: mercator_x_from_lng(geo.longitude),
            y: mercator_y_from_lat(geo.latitude),
            z: altitude / circumference_at_latitude(geo.latitude),
        })
    }

    /// Inverse-project back to longitude/latitude. Altitude is dropped.
    pub fn to_geo(&self) -> GeoPoint {
        GeoPoint::new(lng_from_mercator_x(self.x), lat_from_mercator_y(self.y))
    }

    /// Mercator units per metre at this point's latitude.
    #[inline]
    pub fn units_per_meter(&self) -> f64 {
        1.0 / circumference_at_latitude(lat_from_mercator_y(self.y))
    }
}

#[inline]
fn mercator_x_from_lng(lng: f64) -> f64 {
    (180.0 + lng) / 360.0
}

#[inline]
fn mercator_y_from_lat(lat: f64) -> f64 {
    let rad = lat.to_radians();
    (180.0 - (180.0 / std::f64::consts::PI)
        * ((std::f64::consts::FRAC_PI_4 + rad / 2.0).tan()).ln())
        / 360.0
}

#[inline]
fn lng_from_mercator_x(x: f64) -> f64 {
    x * 360.0 - 180.0
}

#[inline]
fn lat_from_mercator_y(y: f64) -> f64 {
    let y2 = 180.0 - y * 360.0;
    (180.0 / std::f64::consts::PI) * (2.0 * (y2 * std::f64::consts::PI / 180.0).exp().atan()
        - std::f64::consts::FRAC_PI_2)
}

#[inline]
fn circumference_at_latitude(lat: f64) -> f64 {
    EARTH_CIRCUMFERENCE_M * lat.to_radians().cos()
}

/// The fixed reference frame mapping geography into planar editor space.
///
/// The planar transform is: project into normalized Mercator, subtract the
/// projected origin, divide by the metres-per-unit scale at the origin
/// latitude, negate the X axis, and add the configured visual offsets. The
/// offsets exist to line the extruded scene up with the map widget; they are
/// plain constants of the frame, not anything geographic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    origin: GeoPoint,
    origin_projected: ProjectedPoint,
    /// Mercator units per metre at the origin latitude.
    scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Default world origin, carried over from the original deployment.
pub const DEFAULT_ORIGIN: GeoPoint = GeoPoint {
    longitude: 148.9819,
    latitude: -35.39847,
};

/// Default planar X offset.
pub const OFFSET_X: f64 = 0.5;

/// Default planar Y offset.
pub const OFFSET_Y: f64 = 49.0;

/// Fixed altitude of the ground plane; no elevation modeling.
pub const WORLD_ALTITUDE: f64 = 0.0;

impl ProjectionConfig {
    /// Build a frame anchored at `origin` with the default visual offsets.
    pub fn new(origin: GeoPoint) -> Result<Self> {
        Self::with_offsets(origin, OFFSET_X, OFFSET_Y)
    }

    /// Build a frame with explicit planar offsets.
    pub fn with_offsets(origin: GeoPoint, offset_x: f64, offset_y: f64) -> Result<Self> {
        let origin_projected = ProjectedPoint::from_geo(origin, WORLD_ALTITUDE)?;
        Ok(Self {
            origin,
            origin_projected,
            scale: origin_projected.units_per_meter(),
            offset_x,
            offset_y,
        })
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Mercator units per metre at the origin latitude.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Map a geographic point into planar editor space.
    pub fn to_planar(&self, geo: GeoPoint) -> Result<Point2<f64>> {
        let projected = ProjectedPoint::from_geo(geo, WORLD_ALTITUDE)?;
        let x = -(projected.x - self.origin_projected.x) / self.scale;
        let y = (projected.y - self.origin_projected.y) / self.scale;
        Ok(Point2::new(x + self.offset_x, y + self.offset_y))
    }

    /// Map a planar point back to longitude/latitude. Exact inverse of
    /// [`Self::to_planar`] up to floating-point tolerance.
    pub fn to_geo(&self, planar: Point2<f64>) -> GeoPoint {
        let x = self.origin_projected.x - (planar.x - self.offset_x) * self.scale;
        let y = self.origin_projected.y + (planar.y - self.offset_y) * self.scale;
        ProjectedPoint { x, y, z: 0.0 }.to_geo()
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        // DEFAULT_ORIGIN is always in range
        Self::new(DEFAULT_ORIGIN).unwrap()
    }
}
