//! SweetSpot - group trip planning service
//!
//! Server entry point: parse the CLI, set up logging, load and validate
//! config, construct the oracle client and pipeline, then serve HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use sweetspot::cli::Cli;
use sweetspot::config::Config;
use sweetspot::oracle::create_oracle;
use sweetspot::pipeline::TripPipeline;
use sweetspot::server::{self, AppState};
use sweetspot::store::{FileRequestSource, RequestSource};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref())?;
    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref())?;
    config.validate()?;

    let oracle = create_oracle(&config.oracle).context("Failed to build oracle client")?;
    let pipeline = Arc::new(
        TripPipeline::new(oracle, config.shortlist.size, config.server.include_shortlist)
            .context("Failed to initialize planning pipeline")?,
    );

    let requests: Option<Arc<dyn RequestSource>> = cli
        .requests_file
        .clone()
        .or_else(|| config.server.requests_file.clone())
        .map(|path| {
            info!(?path, "Sourcing requests from trip-document file");
            Arc::new(FileRequestSource::new(path)) as Arc<dyn RequestSource>
        });

    let listen: SocketAddr = match cli.listen {
        Some(addr) => addr,
        None => config
            .server
            .listen
            .parse()
            .context("server.listen is not a valid address")?,
    };

    info!(
        %listen,
        shortlist_size = config.shortlist.size,
        model = %config.oracle.model,
        "Starting SweetSpot"
    );
    server::serve(listen, AppState { pipeline, requests }).await
}
