//! CLI subcommand implementations.
//!
//! Each command builds its endpoint client from the resolved configuration,
//! performs one call, and prints the same rendering the MCP tools return.

pub mod directions;
pub mod geocode;
pub mod reverse_geocode;
pub mod serve;
pub mod static_map;
pub mod usage;

use anyhow::Result;
use navikit_maps::MapsClient;

use crate::config::Config;

/// Builds the Maps client for a command invocation.
fn maps_client(config: &Config) -> Result<MapsClient> {
    Ok(MapsClient::new(
        config.naver.client_id.clone(),
        config.naver.client_secret.clone(),
        config.retry_policy(),
    )?)
}
