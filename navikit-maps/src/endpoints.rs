//! Endpoint URLs for the Naver APIs.

/// Address → coordinate conversion.
pub const GEOCODE: &str = "https://naveropenapi.apigw.ntruss.com/map-geocode/v2/geocode";

/// Coordinate → address conversion.
pub const REVERSE_GEOCODE: &str = "https://naveropenapi.apigw.ntruss.com/map-reversegeocode/v2/gc";

/// Driving route planning.
pub const DIRECTIONS: &str = "https://naveropenapi.apigw.ntruss.com/map-direction/v1/driving";

/// Static raster map rendering.
pub const STATIC_MAP: &str = "https://naveropenapi.apigw.ntruss.com/map-static/v2/raster";

/// Monthly product usage and cost.
pub const BILLING: &str =
    "https://billingapi.apigw.ntruss.com/billing/v1/cost/getProductDemandCostList";
