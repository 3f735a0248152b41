// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Navikit Maps
//!
//! Typed clients for the five Naver endpoints, over the gateway executor.
//!
//! Each endpoint module owns its wire types and the envelope-discriminant
//! check for that endpoint (the discriminant lives in a different place per
//! endpoint):
//!
//! - [`geocode`] - address → coordinates; top-level `status == "OK"`
//! - [`reverse_geocode`] - coordinates → address; nested `status.code == 0`
//! - [`directions`] - route planning; top-level `code == 0`, codes 1-5 map
//!   to distinct causes
//! - [`static_map`] - raster image; HTTP status is the only signal
//! - [`billing`] - usage/cost; `returnCode == "0"` under a named envelope
//!
//! [`MapsClient`] serves the first four with the API-key credential;
//! [`BillingClient`] serves the fifth with the HMAC-signed credential.

pub mod billing;
pub mod client;
pub mod directions;
pub mod endpoints;
pub mod error;
pub mod geocode;
pub mod reverse_geocode;
pub mod static_map;

// Re-export the clients and error
pub use billing::BillingClient;
pub use client::MapsClient;
pub use error::MapsError;

// Endpoint response types
pub use directions::{DirectionsRoute, RouteOption, RouteSummary};
pub use geocode::{GeocodeAddress, GeocodeResult};
pub use reverse_geocode::{ReverseGeocodeItem, ReverseGeocodeResult};
