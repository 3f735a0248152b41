//! Reverse geocode command - coordinates to address.

use anyhow::Result;
use clap::Args;
use navikit_maps::reverse_geocode::ReverseGeocodeRequest;

use crate::config::Config;
use crate::output::report;

/// Arguments for the reverse-geocode command.
#[derive(Args)]
pub struct ReverseGeocodeArgs {
    /// Coordinate to convert as 'longitude,latitude'.
    pub coords: String,

    /// Input coordinate system (epsg:4326, nhn:2048, nhn:128).
    #[arg(long)]
    pub sourcecrs: Option<String>,

    /// Output coordinate system (epsg:4326, nhn:2048, nhn:128).
    #[arg(long)]
    pub targetcrs: Option<String>,

    /// Comma-separated response orders (legalcode, admcode, addr, roadaddr).
    #[arg(long)]
    pub orders: Option<String>,
}

/// Runs the reverse-geocode command.
pub async fn run(args: &ReverseGeocodeArgs, config: &Config) -> Result<()> {
    let client = super::maps_client(config)?;
    let request = ReverseGeocodeRequest {
        coords: args.coords.clone(),
        sourcecrs: args.sourcecrs.clone(),
        targetcrs: args.targetcrs.clone(),
        orders: args.orders.clone(),
    };

    let result = client.reverse_geocode(&request).await?;
    println!("{}", report::render_reverse_geocode(&result, &args.coords));
    Ok(())
}
