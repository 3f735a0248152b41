//! Static map command - render a map image to a file.

use anyhow::{Context, Result};
use clap::Args;
use navikit_maps::static_map::StaticMapRequest;
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::output::report;

/// Arguments for the static-map command.
#[derive(Args)]
pub struct StaticMapArgs {
    /// Map center as 'longitude,latitude'.
    pub center: String,

    /// Zoom level (1-20).
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u8).range(1..=20))]
    pub level: u8,

    /// Image width in pixels (max 1024).
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u32).range(1..=1024))]
    pub width: u32,

    /// Image height in pixels (max 1024).
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u32).range(1..=1024))]
    pub height: u32,

    /// Map style: basic, traffic, satellite, satellite_base, terrain.
    #[arg(long, default_value = "basic")]
    pub maptype: String,

    /// Marker spec, e.g. 'type:d|size:mid|pos:127.0 37.5|color:red'.
    #[arg(long)]
    pub markers: Option<String>,

    /// Path spec, e.g. 'color:0x0000FF|weight:5|127.0 37.5,127.1 37.6'.
    #[arg(long)]
    pub path: Option<String>,

    /// Render scale (1 or 2).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub scale: u8,

    /// Output file for the PNG image.
    #[arg(long, short, default_value = "map.png")]
    pub output: PathBuf,
}

/// Runs the static-map command.
pub async fn run(args: &StaticMapArgs, config: &Config) -> Result<()> {
    let client = super::maps_client(config)?;
    let request = StaticMapRequest {
        center: args.center.clone(),
        level: args.level,
        width: args.width,
        height: args.height,
        maptype: args.maptype.clone(),
        scale: args.scale,
        markers: args.markers.clone(),
        path: args.path.clone(),
    };

    let image = client.static_map(&request).await?;
    std::fs::write(&args.output, &image)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(bytes = image.len(), path = %args.output.display(), "image written");

    println!("{}", report::render_static_map_summary(&request));
    println!("Saved to {}", args.output.display());
    Ok(())
}
