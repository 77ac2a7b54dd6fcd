// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion height derivation.
//!
//! The rendering collaborator extrudes a planar footprint vertically; the
//! core only decides how far. Buildings rise floor count times floor height,
//! the playground is a thin slab marking the zone on the ground.

use crate::error::{Error, Result};
use crate::ring::Ring;

/// Extrusion height of the playground slab, in metres.
pub const PLAYGROUND_SLAB_HEIGHT: f64 = 0.1;

/// Derived extrusion height for a building footprint.
///
/// Fails for a floor count of zero or a non-positive floor height; the
/// caller must also never extrude a degenerate ring, which
/// [`validate_extrudable`] enforces.
pub fn building_height(floors: u32, floors_height: f64) -> Result<f64> {
    if floors < 1 {
        return Err(Error::InvalidExtrusion(
            "floor count must be at least 1".to_string(),
        ));
    }
    if !(floors_height > 0.0) || !floors_height.is_finite() {
        return Err(Error::InvalidExtrusion(format!(
            "floor height must be positive, got {floors_height}"
        )));
    }
    Ok(f64::from(floors) * floors_height)
}

/// Check that a footprint can be extruded at all.
pub fn validate_extrudable(ring: &Ring) -> Result<()> {
    if ring.is_valid() {
        Ok(())
    } else {
        Err(Error::DegenerateRing(ring.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    #[test]
    fn test_building_height() {
        assert_relative_eq!(building_height(3, 3.5).unwrap(), 10.5);
        assert_relative_eq!(building_height(1, 2.8).unwrap(), 2.8);
    }

    #[test]
    fn test_invalid_floor_count() {
        assert!(building_height(0, 3.0).is_err());
    }

    #[test]
    fn test_invalid_floor_height() {
        assert!(building_height(3, 0.0).is_err());
        assert!(building_height(3, -1.0).is_err());
        assert!(building_height(3, f64::NAN).is_err());
    }

    #[test]
    fn test_validate_extrudable() {
        let ring = Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ]);
        assert!(validate_extrudable(&ring).is_ok());
        assert!(validate_extrudable(&Ring::empty()).is_err());
    }
}
