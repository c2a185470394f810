use clap::{Parser, Subcommand};
use commands::{
    query::{run_query, QueryArgs},
    serve::{run_serve, ServeArgs},
};
use tracing_subscriber::EnvFilter;
use yansi::Condition;

mod commands;

/// Answers bounding box queries with the help of a Tile38 spatial index
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Serve(ServeArgs),
    Query(QueryArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    yansi::whenever(Condition::from(|| {
        Condition::stderr_is_tty() && Condition::clicolor() && Condition::no_color()
    }));

    match cli.command {
        Commands::Serve(args) => run_serve(args).await,
        Commands::Query(args) => run_query(args).await,
    }
}
