use axum::http::StatusCode;
use thiserror::Error;

use crate::bbox::{Axis, Corner};

/// Errors that can happen while answering a bounding box request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Neither a `bbox` nor an encoded range was supplied
    #[error("E_MISSING_SPATIAL_PARAMETER: missing bbox or marc parameter")]
    MissingSpatialParameter,

    /// Both a `bbox` and an encoded range were supplied
    #[error("E_CONFLICTING_SPATIAL_PARAMETERS: bbox and marc are mutually exclusive")]
    ConflictingSpatialParameters,

    /// Unknown `scheme` or `order` value
    #[error("E_INVALID_PARSE_OPTION: unsupported {option} `{value}'")]
    InvalidParseOption { option: &'static str, value: String },

    /// A bbox token is missing or could not be parsed as a number
    #[error("E_INVALID_{axis} ({corner}): {}", token_hint(.token))]
    InvalidCoordinate {
        corner: Corner,
        axis: Axis,
        token: String,
    },

    /// The bbox contains more than four coordinates
    #[error("E_TOO_MANY_COORDINATES: expected 4 coordinates, got {count}")]
    TooManyCoordinates { count: usize },

    /// A coordinate lies outside of its axis range
    #[error("E_IMPOSSIBLE_{axis} ({corner})")]
    OutOfRangeCoordinate {
        corner: Corner,
        axis: Axis,
        value: f64,
    },

    /// The SW corner lies north or east of the NE corner
    #[error("E_INVERTED_BBOX ({axis}): SW corner exceeds NE corner")]
    InvertedBoundingBox { axis: Axis },

    /// The encoded range could not be decoded
    #[error("E_INVALID_MARC: {0}")]
    InvalidEncodedRange(String),

    /// The decoded range does not describe a bounding box
    #[error("E_INVALID_MARC_BBOX: {0}")]
    BoundingBoxDerivationFailed(String),

    /// The pagination cursor is not an unsigned integer
    #[error("E_INVALID_CURSOR: `{0}' is not a valid cursor")]
    InvalidCursor(String),

    /// The spatial index could not be reached
    #[error("{0}")]
    DownstreamUnavailable(String),

    /// The spatial index answered with `ok: false`
    #[error("spatial index rejected query: {0}")]
    IndexRejectedQuery(String),

    /// The spatial index response does not match the expected schema
    #[error("malformed spatial index response: {0}")]
    MalformedIndexResponse(String),

    /// A hit without any field values
    #[error("hit {position} (`{id}') has no identifier field")]
    MissingIdentifierField { position: usize, id: String },

    /// A hit whose first field is not an integral number
    #[error("hit {position} (`{id}') has a non-integer identifier field")]
    InvalidIdentifierField { position: usize, id: String },
}

impl GatewayError {
    /// Returns `true` if the client caused this error and can correct it
    pub fn is_client_error(&self) -> bool {
        use GatewayError::*;

        matches!(
            self,
            MissingSpatialParameter
                | ConflictingSpatialParameters
                | InvalidParseOption { .. }
                | InvalidCoordinate { .. }
                | TooManyCoordinates { .. }
                | OutOfRangeCoordinate { .. }
                | InvertedBoundingBox { .. }
                | InvalidEncodedRange(_)
                | BoundingBoxDerivationFailed(_)
                | InvalidCursor(_)
        )
    }

    /// The HTTP status code the error is reported with
    pub fn status(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn token_hint(token: &str) -> String {
    if token.is_empty() {
        "missing coordinate".to_string()
    } else {
        format!("`{token}' is not a number")
    }
}

pub type Result<T, E = GatewayError> = std::result::Result<T, E>;
