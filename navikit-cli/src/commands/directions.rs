//! Directions command - driving route search.

use anyhow::{Result, bail};
use clap::Args;
use navikit_maps::directions::{DirectionsRequest, RouteOption};

use crate::config::Config;
use crate::output::report;

/// Arguments for the directions command.
#[derive(Args)]
pub struct DirectionsArgs {
    /// Start coordinate as 'longitude,latitude'.
    pub start: String,

    /// Goal coordinate as 'longitude,latitude'.
    pub goal: String,

    /// Up to 5 waypoint coordinates separated by '|'.
    #[arg(long)]
    pub waypoints: Option<String>,

    /// Route option: trafast, tracomfort, traoptimal, traavoidtoll,
    /// traavoidcaronly.
    #[arg(long, default_value = "traoptimal")]
    pub option: String,

    /// Car type for toll calculation (1-6).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    pub cartype: Option<u8>,

    /// Fuel type (gasoline, highgradegasoline, diesel, lpg).
    #[arg(long)]
    pub fueltype: Option<String>,

    /// Fuel efficiency in km/L for fuel cost calculation.
    #[arg(long)]
    pub mileage: Option<f64>,
}

/// Runs the directions command.
pub async fn run(args: &DirectionsArgs, config: &Config) -> Result<()> {
    let Some(option) = RouteOption::from_param(&args.option) else {
        bail!("unknown route option: {}", args.option);
    };

    let client = super::maps_client(config)?;
    let request = DirectionsRequest {
        start: args.start.clone(),
        goal: args.goal.clone(),
        waypoints: args.waypoints.clone(),
        option,
        cartype: args.cartype,
        fueltype: args.fueltype.clone(),
        mileage: args.mileage,
    };

    let routes = client.directions(&request).await?;
    println!(
        "{}",
        report::render_directions(&routes, option, &args.start, &args.goal)
    );
    Ok(())
}
