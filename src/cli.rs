use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Public discovery API for a content distribution node.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Configuration file (defaults to `lantern.toml` in the platform config directory).
    #[arg(long, short, global = true, env = "LANTERN_CONFIG")]
    pub config: Option<PathBuf>,
    /// Content catalog database, overriding the configured path.
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the public API over HTTP.
    Serve {
        /// Address to listen on, overriding the configured one.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Print the channels a client would see, as JSON.
    Channels {
        #[arg(long, short)]
        keyword: Option<String>,
        #[arg(long, short)]
        language: Option<String>,
        /// Look up a single channel by id instead of listing.
        #[arg(long)]
        lookup: Option<String>,
        #[arg(long, default_value = "v1")]
        protocol: String,
    },
    /// Print the checksums of every available file in a channel, as JSON.
    Checksums {
        channel_id: String,
        #[arg(long, default_value = "v1")]
        protocol: String,
    },
}
