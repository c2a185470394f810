use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    bbox::{BoundingBox, Validator},
    config::{GatewayConfig, ResponseFormat},
    error::{GatewayError, Result},
    index::{SpatialIndex, SpatialQuery},
    parse::{resolve_bounding_box, Marc034Decoder, RangeDecoder, SpatialInput},
    translate::{translate, ResultEnvelope},
};

/// The query parameters of a bounding box request
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestParams {
    /// Four comma-separated coordinates
    pub bbox: Option<String>,

    /// An encoded geographic range (MARC 034)
    pub marc: Option<String>,

    /// Overrides the configured [`crate::parse::Scheme`]
    pub scheme: Option<String>,

    /// Overrides the configured [`crate::parse::Order`]
    pub order: Option<String>,

    /// Pagination cursor from a previous response
    pub cursor: Option<String>,
}

impl RequestParams {
    /// Parses the cursor parameter. Empty values count as absent.
    pub fn cursor(&self) -> Result<Option<u64>> {
        match self.cursor.as_deref().filter(|c| !c.is_empty()) {
            None => Ok(None),
            Some(c) => c
                .parse()
                .map(Some)
                .map_err(|_| GatewayError::InvalidCursor(c.to_string())),
        }
    }
}

/// The successful result of a request
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayOutput {
    Envelope(ResultEnvelope),

    /// The body of the spatial index, forwarded verbatim
    Raw(Vec<u8>),
}

/// Answers bounding box requests with the help of a spatial index. A gateway
/// holds no mutable state and can serve any number of requests concurrently.
pub struct Gateway<I, D = Marc034Decoder> {
    config: GatewayConfig,
    validator: Validator,
    index: I,
    decoder: D,
}

impl<I: SpatialIndex> Gateway<I> {
    /// Creates a gateway that decodes encoded ranges as MARC 034
    pub fn new(config: GatewayConfig, index: I) -> Self {
        Self::with_decoder(config, index, Marc034Decoder)
    }
}

impl<I: SpatialIndex, D: RangeDecoder> Gateway<I, D> {
    pub fn with_decoder(config: GatewayConfig, index: I, decoder: D) -> Self {
        let validator = Validator::new(config.check_orientation);
        Self {
            config,
            validator,
            index,
            decoder,
        }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Reads and validates the bounding box of a request
    pub fn bounding_box(&self, params: &RequestParams) -> Result<BoundingBox> {
        let input = SpatialInput::resolve(params.bbox.as_deref(), params.marc.as_deref())?;
        let options = self
            .config
            .parse
            .with_overrides(params.scheme.as_deref(), params.order.as_deref())?;
        let bbox = resolve_bounding_box(input, &options, &self.decoder)?;
        self.validator.validate(bbox)
    }

    /// Builds the spatial index query for a request without sending it
    pub fn plan(&self, params: &RequestParams) -> Result<SpatialQuery> {
        let bbox = self.bounding_box(params)?;
        let cursor = params.cursor()?;
        Ok(SpatialQuery::intersects(&self.config.index, &bbox, cursor))
    }

    /// Answers a request
    pub async fn run(&self, params: &RequestParams) -> Result<GatewayOutput> {
        let query = self.plan(params)?;

        info!(url = %query.url, "querying spatial index");
        let body = self.index.fetch(&query).await?;

        match self.config.response_format {
            ResponseFormat::Raw => Ok(GatewayOutput::Raw(body)),
            ResponseFormat::Translated => {
                let envelope = translate(&body)?;
                debug!(
                    results = envelope.results.len(),
                    cursor = envelope.cursor,
                    "translated spatial index response"
                );
                Ok(GatewayOutput::Envelope(envelope))
            }
        }
    }
}
