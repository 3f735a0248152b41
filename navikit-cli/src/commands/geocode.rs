//! Geocode command - address to coordinates.

use anyhow::Result;
use clap::Args;
use navikit_maps::geocode::GeocodeRequest;

use crate::config::Config;
use crate::output::report;

/// Arguments for the geocode command.
#[derive(Args)]
pub struct GeocodeArgs {
    /// Address to search (road or lot-number form).
    pub query: String,

    /// Search center bias as 'longitude,latitude'.
    #[arg(long)]
    pub coordinate: Option<String>,

    /// Result filter, e.g. 'HCODE:1168000000'.
    #[arg(long)]
    pub filter: Option<String>,

    /// Response language (ko, en, ja, zh).
    #[arg(long)]
    pub language: Option<String>,

    /// Page number, 1-based.
    #[arg(long)]
    pub page: Option<u32>,

    /// Results per page (max 100).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub count: Option<u32>,
}

/// Runs the geocode command.
pub async fn run(args: &GeocodeArgs, config: &Config) -> Result<()> {
    let client = super::maps_client(config)?;
    let request = GeocodeRequest {
        query: args.query.clone(),
        coordinate: args.coordinate.clone(),
        filter: args.filter.clone(),
        language: args.language.clone(),
        page: args.page,
        count: args.count,
    };

    let result = client.geocode(&request).await?;
    println!("{}", report::render_geocode(&result, &args.query));
    Ok(())
}
