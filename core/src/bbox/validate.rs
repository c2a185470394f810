use tracing::debug;

use crate::error::{GatewayError, Result};

use super::{Axis, BoundingBox, Corner};

/// The order in which corner coordinates are checked. The first violation
/// is reported.
const CHECKS: [(Corner, Axis); 4] = [
    (Corner::SouthWest, Axis::Latitude),
    (Corner::SouthWest, Axis::Longitude),
    (Corner::NorthEast, Axis::Latitude),
    (Corner::NorthEast, Axis::Longitude),
];

/// Checks that a bounding box describes a valid area on the globe
#[derive(Debug, Default, Copy, Clone)]
pub struct Validator {
    /// Also reject boxes whose SW corner lies north or east of their NE
    /// corner. This includes boxes crossing the antimeridian.
    pub check_orientation: bool,
}

impl Validator {
    pub fn new(check_orientation: bool) -> Self {
        Self { check_orientation }
    }

    /// Returns the given bounding box if all of its coordinates are in range
    pub fn validate(&self, bbox: BoundingBox) -> Result<BoundingBox> {
        for (corner, axis) in CHECKS {
            let value = bbox.get(corner, axis);
            let (min, max) = axis.range();
            // NaN fails this check, too
            if !(min..=max).contains(&value) {
                return Err(GatewayError::OutOfRangeCoordinate {
                    corner,
                    axis,
                    value,
                });
            }
        }

        if self.check_orientation {
            if bbox.sw_lat() > bbox.ne_lat() {
                return Err(GatewayError::InvertedBoundingBox {
                    axis: Axis::Latitude,
                });
            }
            if bbox.sw_lon() > bbox.ne_lon() {
                return Err(GatewayError::InvertedBoundingBox {
                    axis: Axis::Longitude,
                });
            }
        }

        debug!(?bbox, "bounding box is valid");

        Ok(bbox)
    }
}

#[cfg(test)]
mod tests {
    use assertor::{assert_that, ResultAssertion};
    use pretty_assertions::assert_eq;

    use crate::{
        bbox::{Axis, BoundingBox, Corner},
        error::GatewayError,
    };

    use super::Validator;

    fn out_of_range(corner: Corner, axis: Axis, value: f64) -> GatewayError {
        GatewayError::OutOfRangeCoordinate {
            corner,
            axis,
            value,
        }
    }

    #[test]
    fn valid_box() {
        let bb = BoundingBox::new(-33.893217, 151.165524, -33.840479, 151.281223);
        assert_eq!(Validator::default().validate(bb), Ok(bb));
    }

    #[test]
    fn limits_are_inclusive() {
        let bb = BoundingBox::new(-90.0, -180.0, 90.0, 180.0);
        assert_that!(Validator::default().validate(bb)).is_ok();
    }

    #[test]
    fn each_corner_and_axis() {
        let v = Validator::default();
        assert_eq!(
            v.validate(BoundingBox::new(95.0, 0.0, 10.0, 10.0)),
            Err(out_of_range(Corner::SouthWest, Axis::Latitude, 95.0))
        );
        assert_eq!(
            v.validate(BoundingBox::new(0.0, -180.5, 10.0, 10.0)),
            Err(out_of_range(Corner::SouthWest, Axis::Longitude, -180.5))
        );
        assert_eq!(
            v.validate(BoundingBox::new(0.0, 0.0, -91.0, 10.0)),
            Err(out_of_range(Corner::NorthEast, Axis::Latitude, -91.0))
        );
        assert_eq!(
            v.validate(BoundingBox::new(0.0, 0.0, 10.0, 200.0)),
            Err(out_of_range(Corner::NorthEast, Axis::Longitude, 200.0))
        );
    }

    #[test]
    fn violation_is_independent_of_other_corners() {
        // the other three corners are out of range as well but the NE
        // longitude is the only one that matters here
        let v = Validator::default();
        assert_eq!(
            v.validate(BoundingBox::new(0.0, 0.0, 0.0, 181.0)),
            Err(out_of_range(Corner::NorthEast, Axis::Longitude, 181.0))
        );
        assert_eq!(
            v.validate(BoundingBox::new(-100.0, 500.0, 100.0, 500.0)),
            Err(out_of_range(Corner::SouthWest, Axis::Latitude, -100.0))
        );
    }

    #[test]
    fn nan_is_out_of_range() {
        let err = Validator::default()
            .validate(BoundingBox::new(0.0, f64::NAN, 1.0, 1.0))
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::OutOfRangeCoordinate {
                corner: Corner::SouthWest,
                axis: Axis::Longitude,
                ..
            }
        ));
    }

    #[test]
    fn inverted_box_is_accepted_by_default() {
        let bb = BoundingBox::new(10.0, 170.0, -10.0, -170.0);
        assert_eq!(Validator::default().validate(bb), Ok(bb));
    }

    #[test]
    fn inverted_box_is_rejected_when_checking_orientation() {
        let v = Validator::new(true);
        assert_eq!(
            v.validate(BoundingBox::new(10.0, 0.0, -10.0, 1.0)),
            Err(GatewayError::InvertedBoundingBox {
                axis: Axis::Latitude
            })
        );
        assert_eq!(
            v.validate(BoundingBox::new(-10.0, 170.0, 10.0, -170.0)),
            Err(GatewayError::InvertedBoundingBox {
                axis: Axis::Longitude
            })
        );
    }

    #[test]
    fn degenerate_box_passes_orientation_check() {
        let bb = BoundingBox::new(1.0, 2.0, 1.0, 2.0);
        assert_that!(Validator::new(true).validate(bb)).is_ok();
    }
}
