// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Navikit CLI - Naver Maps lookups from the command line, and an MCP
//! server exposing the same operations as tools.
//!
//! # Examples
//!
//! ```bash
//! # Run the MCP stdio server
//! navikit serve
//!
//! # Address to coordinates
//! navikit geocode "152 Teheran-ro, Gangnam-gu, Seoul"
//!
//! # Coordinates to addresses
//! navikit reverse-geocode 127.0368,37.5085
//!
//! # Driving route
//! navikit directions 127.0368,37.5085 126.9784,37.5666 --option trafast
//!
//! # Static map image
//! navikit static-map 127.0368,37.5085 --level 14 -o gangnam.png
//!
//! # Monthly usage report (needs NCLOUD_ACCESS_KEY / NCLOUD_SECRET_KEY)
//! navikit usage --month 2024-01
//! ```

mod commands;
mod config;
mod mcp;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::directions::DirectionsArgs;
use commands::geocode::GeocodeArgs;
use commands::reverse_geocode::ReverseGeocodeArgs;
use commands::static_map::StaticMapArgs;
use commands::usage::UsageArgs;
use config::Config;

// ============================================================================
// CLI Definition
// ============================================================================

/// Navikit - Naver Maps geocoding, routing, and usage reporting.
#[derive(Parser)]
#[command(name = "navikit")]
#[command(about = "Naver Maps geocoding, routing, and usage reporting")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP stdio server exposing the Maps tools.
    Serve,
    /// Convert an address to coordinates.
    Geocode(GeocodeArgs),
    /// Convert a coordinate to addresses.
    ReverseGeocode(ReverseGeocodeArgs),
    /// Search a driving route between two coordinates.
    Directions(DirectionsArgs),
    /// Render a static map image to a file.
    StaticMap(StaticMapArgs),
    /// Report monthly API usage, cost, and free-tier rates.
    Usage(UsageArgs),
}

// ============================================================================
// Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr: stdout belongs to the MCP protocol under `serve`.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("configuration")?;

    match &cli.command {
        Commands::Serve => commands::serve::run(&config).await,
        Commands::Geocode(args) => commands::geocode::run(args, &config).await,
        Commands::ReverseGeocode(args) => commands::reverse_geocode::run(args, &config).await,
        Commands::Directions(args) => commands::directions::run(args, &config).await,
        Commands::StaticMap(args) => commands::static_map::run(args, &config).await,
        Commands::Usage(args) => commands::usage::run(args, &config).await,
    }
}
