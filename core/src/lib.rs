//! A gateway that answers bounding box queries with the help of an external
//! spatial point index.
//!
//! A request passes through these stages:
//!
//! 1. [`parse`] reads a raw bbox or an encoded geographic range,
//! 2. [`bbox::Validator`] checks the coordinates,
//! 3. [`index::SpatialQuery`] formats the index command and URL,
//! 4. an [`index::SpatialIndex`] executes the query,
//! 5. [`translate`] turns the index response into a [`translate::ResultEnvelope`].
//!
//! [`gateway::Gateway`] ties the stages together and [`server`] exposes it
//! over HTTP.

pub mod bbox;
pub mod config;
pub mod error;
pub mod gateway;
pub mod index;
pub mod parse;
pub mod server;
pub mod translate;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use gateway::{Gateway, GatewayOutput, RequestParams};
