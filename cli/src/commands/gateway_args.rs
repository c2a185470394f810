use std::path::PathBuf;

use anyhow::Result;
use bboxgate_core::{
    config::ResponseFormat,
    parse::{Order, Scheme},
    GatewayConfig,
};
use clap::Args;

/// Options shared by all commands. Values given here override the
/// configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct GatewayArgs {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "BBOXGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Hostname of the Tile38 server
    #[arg(long, env = "BBOXGATE_TILE38_HOST")]
    pub tile38_host: Option<String>,

    /// Port of the Tile38 server
    #[arg(long, env = "BBOXGATE_TILE38_PORT")]
    pub tile38_port: Option<u16>,

    /// The Tile38 collection to query
    #[arg(long, env = "BBOXGATE_TILE38_COLLECTION")]
    pub tile38_collection: Option<String>,

    /// How long to wait for the Tile38 server (e.g. `10s`, `1500ms`)
    #[arg(long, env = "BBOXGATE_INDEX_TIMEOUT")]
    pub index_timeout: Option<humantime::Duration>,

    /// How coordinates are delimited (`comma` or `space`)
    #[arg(long, env = "BBOXGATE_SCHEME")]
    pub scheme: Option<Scheme>,

    /// Axis order of each corner (`latlon` or `lonlat`)
    #[arg(long, env = "BBOXGATE_ORDER")]
    pub order: Option<Order>,

    /// Reject boxes whose southwest corner lies north or east of their
    /// northeast corner
    #[arg(long, env = "BBOXGATE_CHECK_ORIENTATION")]
    pub check_orientation: bool,

    /// Shape of successful responses (`translated` or `raw`)
    #[arg(long, env = "BBOXGATE_RESPONSE_FORMAT")]
    pub response_format: Option<ResponseFormat>,
}

impl GatewayArgs {
    /// Loads the configuration file (or the defaults) and applies the
    /// command line overrides
    pub fn load_config(&self) -> Result<GatewayConfig> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::from_toml_file(path)?,
            None => GatewayConfig::default(),
        };

        if let Some(host) = &self.tile38_host {
            config.index.host = host.clone();
        }
        if let Some(port) = self.tile38_port {
            config.index.port = port;
        }
        if let Some(collection) = &self.tile38_collection {
            config.index.collection = collection.clone();
        }
        if let Some(timeout) = self.index_timeout {
            config.index.timeout = timeout.into();
        }
        if let Some(scheme) = self.scheme {
            config.parse.scheme = scheme;
        }
        if let Some(order) = self.order {
            config.parse.order = order;
        }
        if self.check_orientation {
            config.check_orientation = true;
        }
        if let Some(format) = self.response_format {
            config.response_format = format;
        }

        Ok(config)
    }
}
