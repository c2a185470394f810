use std::fmt::{self, Display, Formatter};

use geo::{coord, Coord};

pub mod validate;

pub use self::validate::Validator;

/// Valid latitude range in degrees
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range in degrees
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// One of the two corners of a bounding box
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Corner {
    SouthWest,
    NorthEast,
}

impl Display for Corner {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Corner::SouthWest => write!(f, "SW"),
            Corner::NorthEast => write!(f, "NE"),
        }
    }
}

/// A geographic axis
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// The inclusive range of valid values on this axis
    pub fn range(&self) -> (f64, f64) {
        match self {
            Axis::Latitude => (MIN_LAT, MAX_LAT),
            Axis::Longitude => (MIN_LON, MAX_LON),
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "LATITUDE"),
            Axis::Longitude => write!(f, "LONGITUDE"),
        }
    }
}

/// A rectangle in geographic coordinates given by its southwest and
/// northeast corner. `x` holds the longitude and `y` the latitude.
///
/// Unlike [`geo::Rect`], the corners are kept exactly as given, so an
/// inverted box stays inverted until a [`Validator`] looks at it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub sw: Coord,
    pub ne: Coord,
}

impl BoundingBox {
    /// Creates a bounding box from its four corner coordinates
    pub fn new(sw_lat: f64, sw_lon: f64, ne_lat: f64, ne_lon: f64) -> Self {
        Self {
            sw: coord! { x: sw_lon, y: sw_lat },
            ne: coord! { x: ne_lon, y: ne_lat },
        }
    }

    pub fn sw_lat(&self) -> f64 {
        self.sw.y
    }

    pub fn sw_lon(&self) -> f64 {
        self.sw.x
    }

    pub fn ne_lat(&self) -> f64 {
        self.ne.y
    }

    pub fn ne_lon(&self) -> f64 {
        self.ne.x
    }

    /// Returns the value of the given corner on the given axis
    pub fn get(&self, corner: Corner, axis: Axis) -> f64 {
        let c = match corner {
            Corner::SouthWest => self.sw,
            Corner::NorthEast => self.ne,
        };
        match axis {
            Axis::Latitude => c.y,
            Axis::Longitude => c.x,
        }
    }

    pub(crate) fn set(&mut self, corner: Corner, axis: Axis, value: f64) {
        let c = match corner {
            Corner::SouthWest => &mut self.sw,
            Corner::NorthEast => &mut self.ne,
        };
        match axis {
            Axis::Latitude => c.y = value,
            Axis::Longitude => c.x = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, BoundingBox, Corner};

    #[test]
    fn accessors() {
        let bb = BoundingBox::new(-33.893217, 151.165524, -33.840479, 151.281223);
        assert_eq!(bb.sw_lat(), -33.893217);
        assert_eq!(bb.sw_lon(), 151.165524);
        assert_eq!(bb.ne_lat(), -33.840479);
        assert_eq!(bb.ne_lon(), 151.281223);
        assert_eq!(bb.get(Corner::NorthEast, Axis::Longitude), 151.281223);
        assert_eq!(bb.get(Corner::SouthWest, Axis::Latitude), -33.893217);
    }

    #[test]
    fn inverted_corners_are_kept() {
        let bb = BoundingBox::new(10.0, 20.0, -10.0, -20.0);
        assert_eq!(bb.sw_lat(), 10.0);
        assert_eq!(bb.ne_lon(), -20.0);
    }
}
