//! Tool input types: deserialization, validation, and JSON schemas.
//!
//! Unknown argument keys are rejected, and every field is validated against
//! the provider's documented domains before a request leaves the process.

use regex::Regex;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::LazyLock;
use thiserror::Error;

use navikit_maps::directions::{DirectionsRequest, RouteOption};
use navikit_maps::geocode::GeocodeRequest;
use navikit_maps::reverse_geocode::ReverseGeocodeRequest;
use navikit_maps::static_map::StaticMapRequest;

/// `"lon,lat"` decimal pair.
static COORDINATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+\.?\d*,-?\d+\.?\d*$").unwrap());

/// `YYYY-MM`.
static MONTH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}$").unwrap());

const LANGUAGES: [&str; 4] = ["ko", "en", "ja", "zh"];
const COORDINATE_SYSTEMS: [&str; 3] = ["epsg:4326", "nhn:2048", "nhn:128"];
const REVERSE_GEOCODE_ORDERS: [&str; 4] = ["legalcode", "admcode", "addr", "roadaddr"];
const FUEL_TYPES: [&str; 4] = ["gasoline", "highgradegasoline", "diesel", "lpg"];
const MAP_TYPES: [&str; 5] = ["basic", "traffic", "satellite", "satellite_base", "terrain"];
const MAX_WAYPOINTS: usize = 5;

// ============================================================================
// Validation Error
// ============================================================================

/// A malformed tool input.
#[derive(Debug, Error)]
#[error("Invalid input ({field}): {message}")]
pub struct ValidationError {
    /// The offending field.
    pub field: &'static str,
    /// What was wrong with it.
    pub message: String,
}

fn invalid(field: &'static str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field,
        message: message.into(),
    }
}

fn check_coordinate(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if COORDINATE_RE.is_match(value) {
        Ok(())
    } else {
        Err(invalid(field, "expected 'longitude,latitude'"))
    }
}

fn check_one_of(
    field: &'static str,
    value: &str,
    allowed: &[&str],
) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("expected one of {}", allowed.join(", "))))
    }
}

// ============================================================================
// Geocode
// ============================================================================

/// Arguments for `navermap_geocode`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeocodeInput {
    /// Address to search.
    pub query: String,
    /// Search center bias, `"lon,lat"`.
    pub coordinate: Option<String>,
    /// Result filter, e.g. `"HCODE:1168000000"`.
    pub filter: Option<String>,
    /// Response language.
    pub language: Option<String>,
    /// Page number, 1-based.
    pub page: Option<u32>,
    /// Results per page, max 100.
    pub count: Option<u32>,
}

impl GeocodeInput {
    /// Validates and converts to a request.
    pub fn into_request(self) -> Result<GeocodeRequest, ValidationError> {
        if self.query.is_empty() {
            return Err(invalid("query", "must not be empty"));
        }
        if let Some(coordinate) = &self.coordinate {
            check_coordinate("coordinate", coordinate)?;
        }
        if let Some(language) = &self.language {
            check_one_of("language", language, &LANGUAGES)?;
        }
        if let Some(page) = self.page {
            if page < 1 {
                return Err(invalid("page", "must be at least 1"));
            }
        }
        if let Some(count) = self.count {
            if !(1..=100).contains(&count) {
                return Err(invalid("count", "must be between 1 and 100"));
            }
        }
        Ok(GeocodeRequest {
            query: self.query,
            coordinate: self.coordinate,
            filter: self.filter,
            language: self.language,
            page: self.page,
            count: self.count,
        })
    }

    /// JSON Schema for the arguments.
    pub fn schema() -> Value {
        json!({
            "type": "object",
            "required": ["query"],
            "additionalProperties": false,
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Address to search, road or lot-number form (e.g. '152 Teheran-ro, Gangnam-gu, Seoul')"
                },
                "coordinate": {
                    "type": "string",
                    "description": "Search center as 'longitude,latitude' (e.g. '127.0368,37.5085')"
                },
                "filter": {
                    "type": "string",
                    "description": "Result filter (e.g. 'HCODE:1168000000' to limit to one district)"
                },
                "language": {
                    "type": "string",
                    "enum": LANGUAGES,
                    "description": "Response language"
                },
                "page": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Page number (default 1)"
                },
                "count": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 100,
                    "description": "Results per page (default 10, max 100)"
                }
            }
        })
    }
}

// ============================================================================
// Reverse Geocode
// ============================================================================

/// Arguments for `navermap_reverse_geocode`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReverseGeocodeInput {
    /// Coordinate to convert, `"lon,lat"`.
    pub coords: String,
    /// Input coordinate system.
    pub sourcecrs: Option<String>,
    /// Output coordinate system.
    pub targetcrs: Option<String>,
    /// Comma-separated response orders.
    pub orders: Option<String>,
}

impl ReverseGeocodeInput {
    /// Validates and converts to a request.
    pub fn into_request(self) -> Result<ReverseGeocodeRequest, ValidationError> {
        check_coordinate("coords", &self.coords)?;
        if let Some(sourcecrs) = &self.sourcecrs {
            check_one_of("sourcecrs", sourcecrs, &COORDINATE_SYSTEMS)?;
        }
        if let Some(targetcrs) = &self.targetcrs {
            check_one_of("targetcrs", targetcrs, &COORDINATE_SYSTEMS)?;
        }
        if let Some(orders) = &self.orders {
            for order in orders.split(',') {
                check_one_of("orders", order.trim(), &REVERSE_GEOCODE_ORDERS)?;
            }
        }
        Ok(ReverseGeocodeRequest {
            coords: self.coords,
            sourcecrs: self.sourcecrs,
            targetcrs: self.targetcrs,
            orders: self.orders,
        })
    }

    /// JSON Schema for the arguments.
    pub fn schema() -> Value {
        json!({
            "type": "object",
            "required": ["coords"],
            "additionalProperties": false,
            "properties": {
                "coords": {
                    "type": "string",
                    "description": "Coordinate to convert as 'longitude,latitude' (e.g. '127.0368,37.5085')"
                },
                "sourcecrs": {
                    "type": "string",
                    "enum": COORDINATE_SYSTEMS,
                    "description": "Input coordinate system (default epsg:4326, WGS84)"
                },
                "targetcrs": {
                    "type": "string",
                    "enum": COORDINATE_SYSTEMS,
                    "description": "Output coordinate system (default epsg:4326, WGS84)"
                },
                "orders": {
                    "type": "string",
                    "description": "Comma-separated response orders out of legalcode, admcode, addr, roadaddr"
                }
            }
        })
    }
}

// ============================================================================
// Directions
// ============================================================================

/// Arguments for `navermap_get_directions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectionsInput {
    /// Start coordinate, `"lon,lat"`.
    pub start: String,
    /// Goal coordinate, `"lon,lat"`.
    pub goal: String,
    /// Waypoints, `|`-separated, up to 5.
    pub waypoints: Option<String>,
    /// Route option name.
    pub option: Option<String>,
    /// Car type 1-6.
    pub cartype: Option<u8>,
    /// Fuel type.
    pub fueltype: Option<String>,
    /// Fuel efficiency in km/L.
    pub mileage: Option<f64>,
}

impl DirectionsInput {
    /// Validates and converts to a request.
    pub fn into_request(self) -> Result<DirectionsRequest, ValidationError> {
        check_coordinate("start", &self.start)?;
        check_coordinate("goal", &self.goal)?;
        if let Some(waypoints) = &self.waypoints {
            let stops: Vec<&str> = waypoints.split('|').collect();
            if stops.len() > MAX_WAYPOINTS {
                return Err(invalid("waypoints", "at most 5 waypoints"));
            }
            for stop in stops {
                check_coordinate("waypoints", stop)?;
            }
        }
        let option = match &self.option {
            None => RouteOption::default(),
            Some(value) => RouteOption::from_param(value).ok_or_else(|| {
                invalid(
                    "option",
                    "expected one of trafast, tracomfort, traoptimal, traavoidtoll, \
                     traavoidcaronly",
                )
            })?,
        };
        if let Some(cartype) = self.cartype {
            if !(1..=6).contains(&cartype) {
                return Err(invalid("cartype", "must be between 1 and 6"));
            }
        }
        if let Some(fueltype) = &self.fueltype {
            check_one_of("fueltype", fueltype, &FUEL_TYPES)?;
        }
        if let Some(mileage) = self.mileage {
            if mileage <= 0.0 {
                return Err(invalid("mileage", "must be positive"));
            }
        }
        Ok(DirectionsRequest {
            start: self.start,
            goal: self.goal,
            waypoints: self.waypoints,
            option,
            cartype: self.cartype,
            fueltype: self.fueltype,
            mileage: self.mileage,
        })
    }

    /// JSON Schema for the arguments.
    pub fn schema() -> Value {
        json!({
            "type": "object",
            "required": ["start", "goal"],
            "additionalProperties": false,
            "properties": {
                "start": {
                    "type": "string",
                    "description": "Start coordinate as 'longitude,latitude' (e.g. '127.0368,37.5085')"
                },
                "goal": {
                    "type": "string",
                    "description": "Goal coordinate as 'longitude,latitude' (e.g. '126.9784,37.5666')"
                },
                "waypoints": {
                    "type": "string",
                    "description": "Up to 5 waypoint coordinates separated by '|' (e.g. '127.0,37.5|127.01,37.51')"
                },
                "option": {
                    "type": "string",
                    "enum": ["trafast", "tracomfort", "traoptimal", "traavoidtoll", "traavoidcaronly"],
                    "description": "Route option: trafast (fastest), tracomfort (comfortable), traoptimal (optimal), traavoidtoll (toll-free first), traavoidcaronly (avoid car-only roads)"
                },
                "cartype": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 6,
                    "description": "Car type for toll calculation (1 compact ... 6 special freight)"
                },
                "fueltype": {
                    "type": "string",
                    "enum": FUEL_TYPES,
                    "description": "Fuel type for fuel cost calculation"
                },
                "mileage": {
                    "type": "number",
                    "exclusiveMinimum": 0,
                    "description": "Fuel efficiency in km/L for fuel cost calculation"
                }
            }
        })
    }
}

// ============================================================================
// Static Map
// ============================================================================

/// Arguments for `navermap_get_static_map`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticMapInput {
    /// Map center, `"lon,lat"`.
    pub center: String,
    /// Zoom level 1-20.
    pub level: Option<u8>,
    /// Image width in pixels.
    pub w: Option<u32>,
    /// Image height in pixels.
    pub h: Option<u32>,
    /// Map style.
    pub maptype: Option<String>,
    /// Marker spec.
    pub markers: Option<String>,
    /// Path spec.
    pub path: Option<String>,
    /// Render scale, 1 or 2.
    pub scale: Option<u8>,
}

impl StaticMapInput {
    /// Validates and converts to a request.
    pub fn into_request(self) -> Result<StaticMapRequest, ValidationError> {
        check_coordinate("center", &self.center)?;
        if let Some(level) = self.level {
            if !(1..=20).contains(&level) {
                return Err(invalid("level", "must be between 1 and 20"));
            }
        }
        for (field, value) in [("w", self.w), ("h", self.h)] {
            if let Some(value) = value {
                if !(1..=1024).contains(&value) {
                    return Err(invalid(field, "must be between 1 and 1024"));
                }
            }
        }
        if let Some(maptype) = &self.maptype {
            check_one_of("maptype", maptype, &MAP_TYPES)?;
        }
        if let Some(scale) = self.scale {
            if !(1..=2).contains(&scale) {
                return Err(invalid("scale", "must be 1 or 2"));
            }
        }

        let defaults = StaticMapRequest::default();
        Ok(StaticMapRequest {
            center: self.center,
            level: self.level.unwrap_or(defaults.level),
            width: self.w.unwrap_or(defaults.width),
            height: self.h.unwrap_or(defaults.height),
            maptype: self.maptype.unwrap_or(defaults.maptype),
            scale: self.scale.unwrap_or(defaults.scale),
            markers: self.markers,
            path: self.path,
        })
    }

    /// JSON Schema for the arguments.
    pub fn schema() -> Value {
        json!({
            "type": "object",
            "required": ["center"],
            "additionalProperties": false,
            "properties": {
                "center": {
                    "type": "string",
                    "description": "Map center as 'longitude,latitude' (e.g. '127.0368,37.5085')"
                },
                "level": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 20,
                    "description": "Zoom level (default 16)"
                },
                "w": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 1024,
                    "description": "Image width in pixels (default 300)"
                },
                "h": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 1024,
                    "description": "Image height in pixels (default 300)"
                },
                "maptype": {
                    "type": "string",
                    "enum": MAP_TYPES,
                    "description": "Map style (default basic)"
                },
                "markers": {
                    "type": "string",
                    "description": "Marker spec (e.g. 'type:d|size:mid|pos:127.0 37.5|color:red')"
                },
                "path": {
                    "type": "string",
                    "description": "Path spec (e.g. 'color:0x0000FF|weight:5|127.0 37.5,127.1 37.6')"
                },
                "scale": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 2,
                    "description": "Render scale, 1 or 2 (default 1)"
                }
            }
        })
    }
}

// ============================================================================
// Usage
// ============================================================================

/// Arguments for `navermap_get_usage`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsageInput {
    /// Month to report, `YYYY-MM`; defaults to the current month.
    pub month: Option<String>,
}

impl UsageInput {
    /// Validates the month format.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(month) = &self.month {
            if !MONTH_RE.is_match(month) {
                return Err(invalid("month", "expected 'YYYY-MM'"));
            }
        }
        Ok(())
    }

    /// JSON Schema for the arguments.
    pub fn schema() -> Value {
        json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "month": {
                    "type": "string",
                    "pattern": "^\\d{4}-\\d{2}$",
                    "description": "Month to report in YYYY-MM form (default: current month)"
                }
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
