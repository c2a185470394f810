use serde::Deserialize;

/// The body the spatial index returns for an intersection query
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IndexResponse {
    #[serde(default = "default_ok")]
    pub ok: bool,

    /// Error message if `ok` is `false`
    #[serde(default)]
    pub err: Option<String>,

    #[serde(default)]
    pub count: u64,

    /// Opaque pagination cursor
    #[serde(default)]
    pub cursor: u64,

    /// Names of the per-point field values
    #[serde(default)]
    pub fields: Vec<String>,

    #[serde(default)]
    pub points: Vec<RawHit>,
}

fn default_ok() -> bool {
    true
}

/// A single point returned by the index
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawHit {
    pub id: String,
    pub point: RawPoint,

    /// Field values in the order of [`IndexResponse::fields`]
    #[serde(default)]
    pub fields: Vec<serde_json::Value>,
}

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct RawPoint {
    pub lat: f64,
    pub lon: f64,
}
