//! Barcode Albums - a barcode-to-album lookup gateway.
//!
//! Resolves a product barcode to a music album by combining Discogs
//! (catalog metadata) and Spotify (canonical album id), caching every
//! resolved album in a local SQLite database so repeat lookups never touch
//! the network.

pub mod cli;
pub mod config;
pub mod db;
pub mod lookup;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("barcode_albums=info".parse().unwrap()))
        .init();

    cli::run_command(&args)
}
