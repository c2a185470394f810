use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use anyhow::Result;
use bboxgate_core::{index::HttpSpatialIndex, Gateway, GatewayOutput, RequestParams};
use clap::Args;
use humantime::format_duration;

use super::{gateway_args::GatewayArgs, query_error::IntoQueryError};

/// Run a single bounding box query against the spatial index
#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub gateway: GatewayArgs,

    /// Four coordinates, e.g. `-33.893217,151.165524,-33.840479,151.281223`
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: Option<String>,

    /// An encoded geographic range (MARC 034), e.g. `$dW0010000$eE0020000$fN0040000$gS0030000`
    #[arg(long)]
    pub marc: Option<String>,

    /// Pagination cursor returned by a previous query
    #[arg(long)]
    pub cursor: Option<String>,

    /// Only print the spatial index URL without sending the query
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the `query` command
pub async fn run_query(args: QueryArgs) -> Result<()> {
    let config = args.gateway.load_config()?;
    let options = config.parse;
    let index = HttpSpatialIndex::new(config.index.timeout)?;
    let gateway = Gateway::new(config, index);

    let params = RequestParams {
        bbox: args.bbox,
        marc: args.marc,
        cursor: args.cursor,
        ..Default::default()
    };

    if args.dry_run {
        let query = gateway
            .plan(&params)
            .map_err(|e| e.into_query_error(&params, &options))?;
        println!("{}", query.url);
        return Ok(());
    }

    let query_start = Instant::now();
    let output = gateway
        .run(&params)
        .await
        .map_err(|e| e.into_query_error(&params, &options))?;
    let elapsed = format_duration(Duration::from_millis(
        query_start.elapsed().as_millis() as u64,
    ));

    match output {
        GatewayOutput::Envelope(envelope) => {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            eprintln!(
                "Found {} places in {} (cursor {})",
                envelope.results.len(),
                elapsed,
                envelope.cursor
            );
        }

        GatewayOutput::Raw(body) => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&body)?;
            writeln!(stdout)?;
            eprintln!("Received {} bytes in {}", body.len(), elapsed);
        }
    }

    Ok(())
}
