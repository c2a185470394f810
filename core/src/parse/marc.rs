use itertools::Itertools;

use crate::{
    bbox::{Axis, BoundingBox},
    error::{GatewayError, Result},
};

/// The outer limits of a geographic range, as decoded from an encoded range
/// string. Limits are `None` if the string did not contain them.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct DecodedRange {
    pub west: Option<f64>,
    pub east: Option<f64>,
    pub north: Option<f64>,
    pub south: Option<f64>,
}

impl DecodedRange {
    /// Converts the range into a bounding box with the south-west and the
    /// north-east corner. Fails if any of the four limits is missing.
    pub fn bounding_box(&self) -> Result<BoundingBox> {
        match (self.south, self.west, self.north, self.east) {
            (Some(s), Some(w), Some(n), Some(e)) => Ok(BoundingBox::new(s, w, n, e)),
            _ => {
                let missing = [
                    ("$d", self.west),
                    ("$e", self.east),
                    ("$f", self.north),
                    ("$g", self.south),
                ]
                .into_iter()
                .filter(|(_, v)| v.is_none())
                .map(|(code, _)| code)
                .join(", ");
                Err(GatewayError::BoundingBoxDerivationFailed(format!(
                    "missing subfield(s) {missing}"
                )))
            }
        }
    }
}

/// Decodes encoded geographic range strings
pub trait RangeDecoder: Send + Sync {
    fn decode(&self, input: &str) -> Result<DecodedRange>;
}

/// Decodes the coordinates of a MARC 21 field 034 (coded cartographic
/// mathematical data), e.g. `1#$aa$b22000000$dW1800000$eE1800000$fN0840000$gS0700000`.
///
/// Subfields `$d`, `$e`, `$f` and `$g` hold the westernmost, easternmost,
/// northernmost and southernmost coordinate. Each coordinate is either
/// `hdddmmss` (hemisphere, degrees, minutes, seconds with an optional
/// decimal fraction), `hddd.dddddd` (hemisphere, decimal degrees) or
/// `+ddd.dddddd`/`-ddd.dddddd` (signed decimal degrees). All other subfields
/// are ignored.
#[derive(Debug, Default, Copy, Clone)]
pub struct Marc034Decoder;

impl RangeDecoder for Marc034Decoder {
    fn decode(&self, input: &str) -> Result<DecodedRange> {
        let mut segments = input.split('$');

        // everything before the first delimiter holds the indicators
        segments.next();

        let mut range = DecodedRange::default();
        let mut found_subfield = false;
        for segment in segments {
            let mut chars = segment.chars();
            let Some(code) = chars.next() else {
                return Err(invalid("empty subfield"));
            };
            found_subfield = true;

            let (slot, axis) = match code {
                'd' => (&mut range.west, Axis::Longitude),
                'e' => (&mut range.east, Axis::Longitude),
                'f' => (&mut range.north, Axis::Latitude),
                'g' => (&mut range.south, Axis::Latitude),
                _ => continue,
            };

            if slot.is_some() {
                return Err(invalid(format!("repeated subfield ${code}")));
            }
            *slot = Some(parse_coordinate(chars.as_str(), axis).map_err(|msg| {
                invalid(format!("subfield ${code}: {msg}"))
            })?);
        }

        if !found_subfield {
            return Err(invalid("no subfields found"));
        }

        Ok(range)
    }
}

fn invalid(msg: impl Into<String>) -> GatewayError {
    GatewayError::InvalidEncodedRange(msg.into())
}

/// Parses a single coordinate value into signed decimal degrees
fn parse_coordinate(value: &str, axis: Axis) -> Result<f64, String> {
    let value = value.trim();
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return Err("empty coordinate".to_string());
    };
    let rest = chars.as_str();

    let sign = match (first.to_ascii_uppercase(), axis) {
        ('+', _) => return parse_decimal(rest),
        ('-', _) => return parse_decimal(rest).map(|d| -d),
        ('N', Axis::Latitude) | ('E', Axis::Longitude) => 1.0,
        ('S', Axis::Latitude) | ('W', Axis::Longitude) => -1.0,
        ('N' | 'S' | 'E' | 'W', _) => {
            return Err(format!("hemisphere `{first}' does not match axis"));
        }
        _ => return Err(format!("unexpected character `{first}'")),
    };

    let degrees = match rest.find('.') {
        Some(dot) if dot <= 3 => parse_decimal(rest)?,
        _ => parse_dms(rest)?,
    };

    Ok(sign * degrees)
}

/// Parses unsigned decimal degrees like `180.000000`
fn parse_decimal(s: &str) -> Result<f64, String> {
    let valid = !s.is_empty()
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
        && s.chars().filter(|&c| c == '.').count() <= 1;
    if !valid {
        return Err(format!("`{s}' is not a decimal number"));
    }
    s.parse::<f64>()
        .map_err(|_| format!("`{s}' is not a decimal number"))
}

/// Parses `dddmmss` with an optional fraction of seconds (`dddmmss.sss`)
fn parse_dms(s: &str) -> Result<f64, String> {
    let (whole, fraction) = match s.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (s, None),
    };

    if whole.len() != 7 || !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("`{s}' is not in dddmmss format"));
    }

    // all ASCII digits, so slicing by byte index is safe
    let degrees: f64 = whole[0..3].parse().map_err(|_| format!("`{s}'"))?;
    let minutes: f64 = whole[3..5].parse().map_err(|_| format!("`{s}'"))?;
    let mut seconds: f64 = whole[5..7].parse().map_err(|_| format!("`{s}'"))?;
    if let Some(f) = fraction {
        if f.is_empty() || !f.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("`{s}' has an invalid fraction of seconds"));
        }
        seconds += format!("0.{f}")
            .parse::<f64>()
            .map_err(|_| format!("`{s}'"))?;
    }

    if minutes >= 60.0 {
        return Err(format!("minutes out of range in `{s}'"));
    }
    if seconds >= 60.0 {
        return Err(format!("seconds out of range in `{s}'"));
    }

    Ok(degrees + minutes / 60.0 + seconds / 3600.0)
}
