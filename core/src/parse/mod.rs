use std::str::FromStr;

use itertools::Itertools;
use serde::Deserialize;

use crate::{
    bbox::{Axis, BoundingBox, Corner},
    error::{GatewayError, Result},
};

pub mod marc;

pub use self::marc::{DecodedRange, Marc034Decoder, RangeDecoder};

/// Specifies how the coordinates of a raw bbox are delimited
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// `1.0,2.0,3.0,4.0`
    #[default]
    Comma,

    /// `1.0 2.0 3.0 4.0`
    Space,
}

impl Scheme {
    fn split<'a>(&self, s: &'a str) -> Vec<&'a str> {
        match self {
            Scheme::Comma => s.split(',').map(str::trim).collect_vec(),
            Scheme::Space => s.split_whitespace().collect_vec(),
        }
    }
}

impl FromStr for Scheme {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "comma" => Ok(Scheme::Comma),
            "space" => Ok(Scheme::Space),
            _ => Err(GatewayError::InvalidParseOption {
                option: "scheme",
                value: s.to_string(),
            }),
        }
    }
}

/// Specifies the axis order of each corner in a raw bbox
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// `swlat,swlon,nelat,nelon`
    #[default]
    LatLon,

    /// `swlon,swlat,nelon,nelat`
    LonLat,
}

impl Order {
    /// Returns which corner and axis each of the four tokens describes
    pub fn positions(&self) -> [(Corner, Axis); 4] {
        use Axis::*;
        use Corner::*;

        match self {
            Order::LatLon => [
                (SouthWest, Latitude),
                (SouthWest, Longitude),
                (NorthEast, Latitude),
                (NorthEast, Longitude),
            ],
            Order::LonLat => [
                (SouthWest, Longitude),
                (SouthWest, Latitude),
                (NorthEast, Longitude),
                (NorthEast, Latitude),
            ],
        }
    }
}

impl FromStr for Order {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "latlon" => Ok(Order::LatLon),
            "lonlat" => Ok(Order::LonLat),
            _ => Err(GatewayError::InvalidParseOption {
                option: "order",
                value: s.to_string(),
            }),
        }
    }
}

/// Options controlling how a raw bbox string is read
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub scheme: Scheme,
    pub order: Order,
}

impl ParseOptions {
    /// Returns a copy of these options with the given request overrides
    /// applied. Missing or empty overrides keep the current value.
    pub fn with_overrides(&self, scheme: Option<&str>, order: Option<&str>) -> Result<Self> {
        let mut result = *self;
        if let Some(s) = scheme.filter(|s| !s.is_empty()) {
            result.scheme = s.parse()?;
        }
        if let Some(o) = order.filter(|o| !o.is_empty()) {
            result.order = o.parse()?;
        }
        Ok(result)
    }
}

/// The spatial part of a request. A request either carries a raw bbox, an
/// encoded geographic range, or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpatialInput<'a> {
    BBox(&'a str),
    EncodedRange(&'a str),
    Absent,
}

impl<'a> SpatialInput<'a> {
    /// Decides which input a request carries. Empty values count as absent.
    pub fn resolve(bbox: Option<&'a str>, encoded_range: Option<&'a str>) -> Result<Self> {
        let bbox = bbox.filter(|s| !s.is_empty());
        let encoded_range = encoded_range.filter(|s| !s.is_empty());
        match (bbox, encoded_range) {
            (Some(_), Some(_)) => Err(GatewayError::ConflictingSpatialParameters),
            (Some(b), None) => Ok(SpatialInput::BBox(b)),
            (None, Some(r)) => Ok(SpatialInput::EncodedRange(r)),
            (None, None) => Ok(SpatialInput::Absent),
        }
    }
}

/// Parses a raw bbox string into a bounding box. The coordinates are not
/// range-checked here.
pub fn parse_bbox(input: &str, options: &ParseOptions) -> Result<BoundingBox> {
    let tokens = options.scheme.split(input);
    if tokens.len() > 4 {
        return Err(GatewayError::TooManyCoordinates {
            count: tokens.len(),
        });
    }

    let mut bbox = BoundingBox::new(0.0, 0.0, 0.0, 0.0);
    for (i, (corner, axis)) in options.order.positions().into_iter().enumerate() {
        let token = tokens.get(i).copied().unwrap_or_default();
        let value = token
            .parse::<f64>()
            .map_err(|_| GatewayError::InvalidCoordinate {
                corner,
                axis,
                token: token.to_string(),
            })?;
        bbox.set(corner, axis, value);
    }

    Ok(bbox)
}

/// Turns the spatial input of a request into a bounding box
pub fn resolve_bounding_box<D: RangeDecoder + ?Sized>(
    input: SpatialInput<'_>,
    options: &ParseOptions,
    decoder: &D,
) -> Result<BoundingBox> {
    match input {
        SpatialInput::BBox(s) => parse_bbox(s, options),
        SpatialInput::EncodedRange(s) => decoder.decode(s)?.bounding_box(),
        SpatialInput::Absent => Err(GatewayError::MissingSpatialParameter),
    }
}
