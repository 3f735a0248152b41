//! Driving route planning.
//!
//! Wire format: top-level numeric `code` discriminant, 0 on success. The
//! failure codes 1-5 are distinct, caller-actionable causes and map to
//! distinct messages.

use navikit_gateway::HttpTransport;
use serde::Deserialize;
use tracing::debug;

use crate::client::MapsClient;
use crate::endpoints;
use crate::error::MapsError;

// ============================================================================
// Route Option
// ============================================================================

/// Route search option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RouteOption {
    /// Fastest route under live traffic.
    Trafast,
    /// Most comfortable route.
    Tracomfort,
    /// Optimal route.
    #[default]
    Traoptimal,
    /// Prefer toll-free roads.
    Traavoidtoll,
    /// Avoid car-only roads.
    Traavoidcaronly,
}

impl RouteOption {
    /// The wire parameter value.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Trafast => "trafast",
            Self::Tracomfort => "tracomfort",
            Self::Traoptimal => "traoptimal",
            Self::Traavoidtoll => "traavoidtoll",
            Self::Traavoidcaronly => "traavoidcaronly",
        }
    }

    /// Display name for output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Trafast => "Fastest (live traffic)",
            Self::Tracomfort => "Most comfortable",
            Self::Traoptimal => "Optimal",
            Self::Traavoidtoll => "Toll-free first",
            Self::Traavoidcaronly => "Avoid car-only roads",
        }
    }

    /// Parses the wire parameter value.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "trafast" => Some(Self::Trafast),
            "tracomfort" => Some(Self::Tracomfort),
            "traoptimal" => Some(Self::Traoptimal),
            "traavoidtoll" => Some(Self::Traavoidtoll),
            "traavoidcaronly" => Some(Self::Traavoidcaronly),
            _ => None,
        }
    }
}

// ============================================================================
// Request
// ============================================================================

/// Parameters for a route search.
#[derive(Debug, Clone, Default)]
pub struct DirectionsRequest {
    /// Start coordinate, `"lon,lat"`.
    pub start: String,
    /// Goal coordinate, `"lon,lat"`.
    pub goal: String,
    /// Waypoints, `|`-separated, up to 5.
    pub waypoints: Option<String>,
    /// Route option.
    pub option: RouteOption,
    /// Car type 1-6 (toll fare calculation).
    pub cartype: Option<u8>,
    /// Fuel type (fuel cost calculation).
    pub fueltype: Option<String>,
    /// Fuel efficiency in km/L.
    pub mileage: Option<f64>,
}

// ============================================================================
// Wire Types
// ============================================================================

/// Raw directions response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionsResponse {
    /// 0 on success; 1-5 are distinct failure causes.
    pub code: i32,
    /// Provider message.
    #[serde(default)]
    pub message: String,
    /// Routes per option; present on success.
    #[serde(default)]
    pub route: Option<RouteSet>,
}

/// Routes keyed by the option that produced them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteSet {
    /// Fastest routes.
    #[serde(default)]
    pub trafast: Vec<DirectionsRoute>,
    /// Most comfortable routes.
    #[serde(default)]
    pub tracomfort: Vec<DirectionsRoute>,
    /// Optimal routes.
    #[serde(default)]
    pub traoptimal: Vec<DirectionsRoute>,
    /// Toll-free-first routes.
    #[serde(default)]
    pub traavoidtoll: Vec<DirectionsRoute>,
    /// Car-only-road-avoiding routes.
    #[serde(default)]
    pub traavoidcaronly: Vec<DirectionsRoute>,
}

impl RouteSet {
    /// Routes for the given option.
    pub fn for_option(&self, option: RouteOption) -> &[DirectionsRoute] {
        match option {
            RouteOption::Trafast => &self.trafast,
            RouteOption::Tracomfort => &self.tracomfort,
            RouteOption::Traoptimal => &self.traoptimal,
            RouteOption::Traavoidtoll => &self.traavoidtoll,
            RouteOption::Traavoidcaronly => &self.traavoidcaronly,
        }
    }
}

/// One found route.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    /// Totals for the route.
    pub summary: RouteSummary,
    /// Polyline as `[lon, lat]` pairs.
    #[serde(default)]
    pub path: Vec<[f64; 2]>,
    /// Named road sections along the route.
    #[serde(default)]
    pub section: Vec<RouteSection>,
}

/// Route totals.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    /// Total distance in meters.
    #[serde(default)]
    pub distance: u64,
    /// Total duration in milliseconds.
    #[serde(default)]
    pub duration: u64,
    /// Toll fare in KRW.
    #[serde(default)]
    pub toll_fare: u64,
    /// Estimated taxi fare in KRW.
    #[serde(default)]
    pub taxi_fare: u64,
    /// Estimated fuel cost in KRW.
    #[serde(default)]
    pub fuel_price: u64,
}

/// One named section of a route.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSection {
    /// Road name, may be empty.
    #[serde(default)]
    pub name: String,
    /// Section distance in meters.
    #[serde(default)]
    pub distance: u64,
    /// Congestion level 0-3.
    #[serde(default)]
    pub congestion: u8,
    /// Average speed in km/h.
    #[serde(default)]
    pub speed: u32,
}

impl DirectionsResponse {
    /// Applies the envelope check and extracts the requested option's routes.
    pub fn into_result(self, option: RouteOption) -> Result<Vec<DirectionsRoute>, MapsError> {
        if self.code != 0 {
            return Err(MapsError::Api(route_failure_message(self.code).to_string()));
        }
        Ok(self
            .route
            .map(|set| set.for_option(option).to_vec())
            .unwrap_or_default())
    }
}

/// Maps the distinct route failure codes to their causes.
fn route_failure_message(code: i32) -> &'static str {
    match code {
        1 => "The start or goal coordinates are invalid. Check the coordinates.",
        2 => "The start and goal are too close together.",
        3 => "No drivable route was found. Check that both points are reachable by car.",
        4 => "A waypoint coordinate is invalid. Check the waypoints.",
        5 => "The request is too complex. Reduce the number of waypoints.",
        _ => "Route search failed.",
    }
}

// ============================================================================
// Client Method
// ============================================================================

impl<T: HttpTransport> MapsClient<T> {
    /// Searches driving routes between two coordinates.
    ///
    /// Returns the routes for the requested option; an empty vector means
    /// the provider found none for that option.
    ///
    /// # Errors
    ///
    /// Gateway failures, a failure envelope (codes 1-5), or a malformed
    /// body.
    pub async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<DirectionsRoute>, MapsError> {
        let mut params: Vec<(&str, String)> = vec![
            ("start", request.start.clone()),
            ("goal", request.goal.clone()),
            ("option", request.option.as_param().to_string()),
        ];
        if let Some(waypoints) = &request.waypoints {
            params.push(("waypoints", waypoints.clone()));
        }
        if let Some(cartype) = request.cartype {
            params.push(("cartype", cartype.to_string()));
        }
        if let Some(fueltype) = &request.fueltype {
            params.push(("fueltype", fueltype.clone()));
        }
        if let Some(mileage) = request.mileage {
            params.push(("mileage", mileage.to_string()));
        }

        debug!(start = %request.start, goal = %request.goal, option = request.option.as_param(),
               "route search");
        let response: DirectionsResponse = self.get_json(endpoints::DIRECTIONS, &params).await?;
        response.into_result(request.option)
    }
}

// ============================================================================
// Tests
// ============================================================================
