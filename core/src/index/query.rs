use crate::{bbox::BoundingBox, config::IndexConfig};

/// A spatial intersection query in the index's command syntax, together with
/// the URL it is issued on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpatialQuery {
    pub command: String,
    pub url: String,
}

impl SpatialQuery {
    /// Builds a query for all points of the configured collection inside the
    /// given bounding box. A non-zero `cursor` continues a previous result
    /// page.
    pub fn intersects(index: &IndexConfig, bbox: &BoundingBox, cursor: Option<u64>) -> Self {
        let mut command = format!("INTERSECTS {}", index.collection);
        if let Some(cursor) = cursor.filter(|&c| c > 0) {
            command.push_str(&format!(" CURSOR {cursor}"));
        }
        command.push_str(&format!(
            " POINTS BOUNDS {:.6} {:.6} {:.6} {:.6}",
            bbox.sw_lat(),
            bbox.sw_lon(),
            bbox.ne_lat(),
            bbox.ne_lon()
        ));

        let url = format!(
            "http://{}:{}/{}",
            index.host,
            index.port,
            urlencoding::encode(&command)
        );

        Self { command, url }
    }
}
