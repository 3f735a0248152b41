//! Result texts for the CLI commands and MCP tools.
//!
//! Everything here is a pure function from a checked endpoint result to a
//! display string, so the same rendering backs both surfaces.

use navikit_core::UsageReport;
use navikit_maps::directions::{DirectionsRoute, RouteOption};
use navikit_maps::geocode::GeocodeResult;
use navikit_maps::reverse_geocode::ReverseGeocodeResult;
use navikit_maps::static_map::StaticMapRequest;

use super::format::{
    format_currency, format_distance, format_duration_ms, format_number, format_percent,
};

/// How many route sections to show.
const MAX_SECTIONS: usize = 5;

// ============================================================================
// Geocode
// ============================================================================

/// Renders a geocode result.
pub fn render_geocode(result: &GeocodeResult, query: &str) -> String {
    if result.addresses.is_empty() {
        return format!("No address found for '{query}'. Try a different search term.");
    }

    let mut out = format!(
        "{} match(es) for '{query}' (page {}):\n",
        result.total_count, result.page
    );
    for (index, address) in result.addresses.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {}\n   Lot address: {}\n   Coordinates: {}, {}\n",
            index + 1,
            non_empty(&address.road_address),
            non_empty(&address.jibun_address),
            address.x,
            address.y,
        ));
    }
    out
}

// ============================================================================
// Reverse Geocode
// ============================================================================

/// Renders a reverse geocode result.
pub fn render_reverse_geocode(result: &ReverseGeocodeResult, coords: &str) -> String {
    if result.results.is_empty() {
        return format!(
            "No address found for coordinate '{coords}'. Check that it lies within Korea."
        );
    }

    let mut out = format!("Addresses at {coords}:\n");
    for record in &result.results {
        out.push_str(&format!(
            "\n- {} ({}): {}\n",
            record.type_name(),
            record.code.id,
            record.display_address(),
        ));
    }
    out
}

// ============================================================================
// Directions
// ============================================================================

/// Renders a route search result.
pub fn render_directions(
    routes: &[DirectionsRoute],
    option: RouteOption,
    start: &str,
    goal: &str,
) -> String {
    let Some(route) = routes.first() else {
        return format!(
            "No route found with the '{}' option. Try a different option.",
            option.display_name()
        );
    };

    let summary = &route.summary;
    let mut out = format!(
        "Route from {start} to {goal} ({}):\n\n\
         Distance:   {}\n\
         Duration:   {}\n\
         Toll fare:  {}\n\
         Taxi fare:  {}\n\
         Fuel cost:  {}\n",
        option.display_name(),
        format_distance(summary.distance),
        format_duration_ms(summary.duration),
        format_currency(summary.toll_fare as f64),
        format_currency(summary.taxi_fare as f64),
        format_currency(summary.fuel_price as f64),
    );

    if !route.section.is_empty() {
        out.push_str("\nMain sections:\n");
        for (index, section) in route.section.iter().take(MAX_SECTIONS).enumerate() {
            let name = if section.name.is_empty() {
                "(unnamed)"
            } else {
                &section.name
            };
            out.push_str(&format!(
                "{}. {} - {}, congestion {}\n",
                index + 1,
                name,
                format_distance(section.distance),
                section.congestion,
            ));
        }
    }
    out
}

// ============================================================================
// Static Map
// ============================================================================

/// Renders the text summary accompanying a static map image.
pub fn render_static_map_summary(request: &StaticMapRequest) -> String {
    format!(
        "Center: {}\nZoom level: {}\nImage size: {}x{}\nMap type: {}",
        request.center, request.level, request.width, request.height, request.maptype,
    )
}

// ============================================================================
// Usage Report
// ============================================================================

/// Renders the monthly usage report as markdown.
pub fn render_usage(report: &UsageReport, month: &str) -> String {
    let mut out = format!("## {month} Naver Maps API usage\n\n");

    if !report.warnings.is_empty() {
        out.push_str("### Warnings\n");
        for warning in &report.warnings {
            out.push_str(&format!("- {}\n", warning.message));
        }
        out.push('\n');
    }

    out.push_str("### Usage by service\n\n");
    out.push_str("| Service | Usage | Free limit | Rate | Cost |\n");
    out.push_str("|---------|-------|------------|------|------|\n");
    for service in &report.services {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            service.service,
            format_number(service.usage),
            format_number(service.free_limit as f64),
            format_percent(service.rate_percent),
            format_currency(service.cost),
        ));
    }

    out.push_str(&format!(
        "\n### Total cost: {}\n",
        format_currency(report.total_cost)
    ));
    out
}

fn non_empty(value: &str) -> &str {
    if value.is_empty() { "(none)" } else { value }
}

// ============================================================================
// Tests
// ============================================================================
