use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{GatewayError, Result},
    index::{IndexResponse, RawHit},
};

/// The client-facing result of a bounding box query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEnvelope {
    pub results: Vec<WofResult>,

    /// Pagination cursor of the spatial index, forwarded unchanged
    pub cursor: u64,
}

/// A single place found inside the bounding box
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct WofResult {
    #[serde(rename = "wof:id")]
    pub wof_id: i64,
}

/// Converts a raw spatial index response body into a [`ResultEnvelope`]
pub fn translate(body: &[u8]) -> Result<ResultEnvelope> {
    let response: IndexResponse = serde_json::from_slice(body)
        .map_err(|e| GatewayError::MalformedIndexResponse(e.to_string()))?;
    translate_response(response)
}

/// Converts a decoded spatial index response into a [`ResultEnvelope`]
pub fn translate_response(response: IndexResponse) -> Result<ResultEnvelope> {
    if !response.ok {
        return Err(GatewayError::IndexRejectedQuery(
            response
                .err
                .unwrap_or_else(|| "unknown error".to_string()),
        ));
    }

    let results = response
        .points
        .iter()
        .enumerate()
        .map(|(position, hit)| identifier(position, hit).map(|wof_id| WofResult { wof_id }))
        .collect::<Result<Vec<_>>>()?;

    Ok(ResultEnvelope {
        results,
        cursor: response.cursor,
    })
}

/// Extracts the identifier of a hit from its first field value
fn identifier(position: usize, hit: &RawHit) -> Result<i64> {
    let field = hit
        .fields
        .first()
        .ok_or_else(|| GatewayError::MissingIdentifierField {
            position,
            id: hit.id.clone(),
        })?;

    let id = match field {
        Value::Number(n) => n.as_i64().or_else(|| {
            // field values are usually stored as floats
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    };

    id.ok_or_else(|| GatewayError::InvalidIdentifierField {
        position,
        id: hit.id.clone(),
    })
}
