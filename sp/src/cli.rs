//! CLI definition

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// SweetSpot - group trip planning service
#[derive(Debug, Parser)]
#[command(
    name = "sp",
    about = "Group trip planning service backed by a text-generation oracle",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Listen address, overrides the config file
    #[arg(long, help = "Listen address, e.g. 127.0.0.1:7000")]
    pub listen: Option<SocketAddr>,

    /// Source requests from this trip-document file instead of the body
    #[arg(long = "requests-file", help = "Trip-document file used as the request source")]
    pub requests_file: Option<PathBuf>,
}
