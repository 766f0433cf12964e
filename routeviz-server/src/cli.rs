use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// HTTP front end for snapping points and replaying A* road searches
#[derive(Debug, Default, Parser)]
#[command(name = "routeviz-server", version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Map JSON file, overrides `[map] path`
    #[arg(short, long)]
    pub map: Option<PathBuf>,

    /// Listen address, overrides `[server] bind`
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,
}
