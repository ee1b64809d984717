//! Climate Service - HTTP API and report over a climate dataset.
//!
//! Run with: `cargo run -p climate-service`

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::Router;
use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use climate_service::{AppState, Config, Report, ReportOptions, api};
use climate_store::Store;

/// Climate Service - HTTP JSON API over a weather-station dataset.
#[derive(Parser, Debug)]
#[command(name = "climate-service")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Bind address (overrides config).
    #[arg(short, long, global = true)]
    bind: Option<String>,

    /// Dataset path (overrides config).
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server in the foreground (default behavior).
    Run,

    /// Print a summary of the dataset and exit.
    Report {
        /// First day of the trip (YYYY-MM-DD).
        #[arg(long, default_value = "2017-02-28")]
        start: String,

        /// Last day of the trip (YYYY-MM-DD).
        #[arg(long, default_value = "2017-03-05")]
        end: String,

        /// Histogram of observations strictly after this date (YYYY-MM-DD).
        #[arg(long, default_value = "2017-01-06")]
        after: String,

        /// Histogram bin count (defaults to `queries.histogram_bins`).
        #[arg(long)]
        bins: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("climate_service=info".parse()?)
                .add_directive("climate_store=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let config = load_config(&args)?;

    match args.command {
        Some(Command::Report {
            start,
            end,
            after,
            bins,
        }) => {
            let options = ReportOptions {
                trip_start: start,
                trip_end: end,
                precipitation_since: config.queries.precipitation_since.clone(),
                observations_after: after,
                histogram_bins: bins.unwrap_or(config.queries.histogram_bins),
            };
            run_report(config, options)
        }
        Some(Command::Run) | None => run_server(config).await,
    }
}

/// Load configuration, apply CLI overrides, then validate.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default().unwrap_or_default(),
    };

    // Override config with CLI args
    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
    }
    if let Some(db_path) = &args.database {
        config.storage.path = db_path.clone();
    }

    config.validate()?;
    Ok(config)
}

fn open_store(config: &Config) -> anyhow::Result<Store> {
    Store::open_with_timeout(&config.storage.path, config.storage.query_timeout())
        .with_context(|| format!("cannot serve dataset {}", config.storage.path.display()))
}

fn run_report(config: Config, options: ReportOptions) -> anyhow::Result<()> {
    let store = open_store(&config)?;
    let report = Report::build(&store, options)?;
    print!("{}", report);
    Ok(())
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let store = open_store(&config)?;

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse()?;

    // Create application state
    let state = AppState::new(store, config);

    // Build the router
    let app = Router::new()
        .merge(api::router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    info!("Starting server on {}", addr);

    // Run the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
