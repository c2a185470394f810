use std::future::Future;

use crate::error::Result;

pub use self::http::HttpSpatialIndex;
pub use self::query::SpatialQuery;
pub use self::response::{IndexResponse, RawHit, RawPoint};

pub mod http;
pub mod query;
pub mod response;

#[cfg(test)]
pub(crate) mod stub;

/// A spatial index that can be asked for points intersecting a bounding box.
///
/// The gateway only knows the index's query syntax and response schema. How
/// the request gets there is up to the implementation.
pub trait SpatialIndex: Send + Sync {
    /// Sends the given query to the index and returns the raw response body
    fn fetch(&self, query: &SpatialQuery) -> impl Future<Output = Result<Vec<u8>>> + Send;
}
