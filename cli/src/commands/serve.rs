use std::sync::Arc;

use anyhow::{Context, Result};
use bboxgate_core::{
    index::HttpSpatialIndex,
    server::{router, serve},
    Gateway,
};
use clap::Args;
use tokio::net::TcpListener;
use tracing::info;

use super::gateway_args::GatewayArgs;

/// Run the HTTP gateway
#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub gateway: GatewayArgs,

    /// The hostname to listen on
    #[arg(long, env = "BBOXGATE_HOST")]
    pub host: Option<String>,

    /// The port to listen on
    #[arg(short, long, env = "BBOXGATE_PORT")]
    pub port: Option<u16>,
}

/// Run the `serve` command
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = args.gateway.load_config()?;
    if let Some(host) = args.host {
        config.listen.host = host;
    }
    if let Some(port) = args.port {
        config.listen.port = port;
    }

    info!(
        tile38 = %format!("{}:{}", config.index.host, config.index.port),
        collection = %config.index.collection,
        "using spatial index"
    );

    let index = HttpSpatialIndex::new(config.index.timeout)
        .context("Unable to create spatial index client")?;
    let address = config.listen.address();
    let gateway = Arc::new(Gateway::new(config, index));

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Unable to listen on `{address}'"))?;

    serve(listener, router(gateway)).await?;

    Ok(())
}
