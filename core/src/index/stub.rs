use parking_lot::Mutex;

use crate::error::{GatewayError, Result};

use super::{SpatialIndex, SpatialQuery};

/// A [`SpatialIndex`] that answers every query with the same canned result
/// and remembers the URLs it was asked for
pub struct StubIndex {
    response: Result<Vec<u8>>,
    urls: Mutex<Vec<String>>,
}

impl StubIndex {
    pub fn with_body(body: impl Into<Vec<u8>>) -> Self {
        Self {
            response: Ok(body.into()),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable(msg: &str) -> Self {
        Self {
            response: Err(GatewayError::DownstreamUnavailable(msg.to_string())),
            urls: Mutex::new(Vec::new()),
        }
    }

    /// Returns a JSON index response with one point per identifier
    pub fn points_body(ids: &[i64], cursor: u64) -> String {
        let points = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                serde_json::json!({
                    "id": format!("point-{i}"),
                    "point": { "lat": -33.86, "lon": 151.2 + i as f64 * 0.01 },
                    "fields": [*id as f64, 0.0],
                })
            })
            .collect::<Vec<_>>();
        serde_json::json!({
            "ok": true,
            "fields": ["wof:id", "wof:placetype_id"],
            "points": points,
            "count": ids.len(),
            "cursor": cursor,
            "elapsed": "87.4µs",
        })
        .to_string()
    }

    /// The URLs of all queries received so far
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

impl SpatialIndex for StubIndex {
    async fn fetch(&self, query: &SpatialQuery) -> Result<Vec<u8>> {
        self.urls.lock().push(query.url.clone());
        self.response.clone()
    }
}
