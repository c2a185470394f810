use std::{fmt, path::Path, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

use crate::parse::ParseOptions;

/// Configuration of the gateway. All fields have defaults, so a
/// configuration file only needs to contain the values that differ.
///
/// ```toml
/// check_orientation = true
///
/// [listen]
/// port = 8081
///
/// [index]
/// host = "tile38.local"
/// collection = "whosonfirst"
/// timeout = "2s 500ms"
///
/// [parse]
/// order = "lonlat"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    /// Where the HTTP gateway accepts requests
    pub listen: ListenConfig,

    /// The spatial index to query
    pub index: IndexConfig,

    /// Default coordinate parsing dialect. Requests may override it.
    pub parse: ParseOptions,

    /// Reject boxes whose SW corner lies north or east of their NE corner
    pub check_orientation: bool,

    /// Shape of successful responses
    pub response_format: ResponseFormat,
}

impl GatewayConfig {
    /// Reads a configuration from the TOML file at the given location
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read configuration file at {:?}", path))?;
        Self::from_toml_str(&file)
            .with_context(|| format!("configuration file at {:?} is malformed", path))
    }

    /// Parses a configuration from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}

impl ListenConfig {
    /// The `host:port` address to bind to
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
        }
    }
}

/// Location of the spatial index and the collection holding the points
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    pub host: String,
    pub port: u16,
    pub collection: String,

    /// Upper bound for a single request to the index
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9851,
            collection: "dxlabs".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

fn deserialize_duration<'de, D>(d: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(d)?;
    humantime::parse_duration(&s).map_err(serde::de::Error::custom)
}

/// Specifies what the gateway returns on success
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// `{"results":[{"wof:id":...}],"cursor":...}`
    #[default]
    Translated,

    /// The spatial index response, forwarded verbatim
    Raw,
}

impl FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "translated" => Ok(ResponseFormat::Translated),
            "raw" => Ok(ResponseFormat::Raw),
            _ => Err(format!(
                "unknown response format `{s}' (expected `translated' or `raw')"
            )),
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseFormat::Translated => write!(f, "translated"),
            ResponseFormat::Raw => write!(f, "raw"),
        }
    }
}
