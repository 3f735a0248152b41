//! The canonical billable service table.
//!
//! The Naver Maps platform bills six service categories, each with a fixed
//! monthly free quota. Billing line items carry free-text labels that are
//! matched back to this table by substring containment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Usage rate (percent) at or above which a warning is emitted.
pub const WARNING_THRESHOLD: f64 = 70.0;

// ============================================================================
// Service Kind
// ============================================================================

/// The six billable Maps service categories.
///
/// Declaration order is load-bearing: billing labels are matched against the
/// table in this order, first match wins (see [`ServiceKind::from_label`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// Dynamic (interactive) map tiles.
    DynamicMap,
    /// Static raster map images.
    StaticMap,
    /// Address to coordinate conversion.
    Geocoding,
    /// Coordinate to address conversion.
    ReverseGeocoding,
    /// Driving directions, up to 5 waypoints.
    Directions5,
    /// Driving directions, up to 15 waypoints.
    Directions15,
}

impl ServiceKind {
    /// All services, in the fixed declaration order used for label matching
    /// and report output.
    pub const ALL: [ServiceKind; 6] = [
        ServiceKind::DynamicMap,
        ServiceKind::StaticMap,
        ServiceKind::Geocoding,
        ServiceKind::ReverseGeocoding,
        ServiceKind::Directions5,
        ServiceKind::Directions15,
    ];

    /// The billing label for this service.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DynamicMap => "Dynamic Map",
            Self::StaticMap => "Static Map",
            Self::Geocoding => "Geocoding",
            Self::ReverseGeocoding => "Reverse Geocoding",
            Self::Directions5 => "Directions 5",
            Self::Directions15 => "Directions 15",
        }
    }

    /// Monthly free-tier quota (calls per month).
    pub fn free_limit(&self) -> u64 {
        match self {
            Self::DynamicMap => 6_000_000,
            Self::StaticMap => 3_000_000,
            Self::Geocoding => 3_000_000,
            Self::ReverseGeocoding => 3_000_000,
            Self::Directions5 => 60_000,
            Self::Directions15 => 3_000,
        }
    }

    /// Matches a free-text billing label to a service.
    ///
    /// Iterates [`ServiceKind::ALL`] in order and returns the first service
    /// whose label is a substring of the input. Note that "Geocoding" is a
    /// substring of "Reverse Geocoding", so reverse-geocoding labels resolve
    /// to [`ServiceKind::Geocoding`]. This mirrors the billing provider's
    /// established categorization and must not be reordered.
    pub fn from_label(label: &str) -> Option<ServiceKind> {
        Self::ALL
            .into_iter()
            .find(|service| label.contains(service.label()))
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Tests
// ============================================================================
