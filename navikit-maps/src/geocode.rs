//! Address → coordinate conversion.
//!
//! Wire format: top-level `status` string discriminant, `"OK"` on success,
//! with an `errorMessage` alongside on failure.

use navikit_gateway::HttpTransport;
use serde::Deserialize;
use tracing::debug;

use crate::client::MapsClient;
use crate::endpoints;
use crate::error::MapsError;

// ============================================================================
// Request
// ============================================================================

/// Parameters for a geocode lookup.
#[derive(Debug, Clone, Default)]
pub struct GeocodeRequest {
    /// Address to search (road or lot-number address).
    pub query: String,
    /// Center coordinate biasing the search, `"lon,lat"`.
    pub coordinate: Option<String>,
    /// Result filter, e.g. `"HCODE:1168000000"`.
    pub filter: Option<String>,
    /// Response language (`ko`, `en`, `ja`, `zh`).
    pub language: Option<String>,
    /// Page number, 1-based.
    pub page: Option<u32>,
    /// Results per page (max 100).
    pub count: Option<u32>,
}

// ============================================================================
// Wire Types
// ============================================================================

/// Raw geocode response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResponse {
    /// `"OK"` on success.
    pub status: String,
    /// Failure detail, present when `status` is not `"OK"`.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Paging metadata.
    #[serde(default)]
    pub meta: GeocodeMeta,
    /// Matched addresses.
    #[serde(default)]
    pub addresses: Vec<GeocodeAddress>,
}

/// Paging metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeMeta {
    /// Total number of matches.
    #[serde(default)]
    pub total_count: u32,
    /// Current page, 1-based.
    #[serde(default)]
    pub page: u32,
    /// Matches on this page.
    #[serde(default)]
    pub count: u32,
}

/// One matched address.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeAddress {
    /// Road-name address, may be empty.
    #[serde(default)]
    pub road_address: String,
    /// Lot-number address, may be empty.
    #[serde(default)]
    pub jibun_address: String,
    /// Romanized address.
    #[serde(default)]
    pub english_address: String,
    /// Longitude as a decimal string.
    pub x: String,
    /// Latitude as a decimal string.
    pub y: String,
}

impl GeocodeResponse {
    /// Applies the envelope check and strips the wire envelope.
    pub fn into_result(self) -> Result<GeocodeResult, MapsError> {
        if self.status != "OK" {
            let message = self
                .error_message
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(MapsError::Api(format!("Address search failed: {message}")));
        }
        Ok(GeocodeResult {
            total_count: self.meta.total_count,
            page: self.meta.page,
            addresses: self.addresses,
        })
    }
}

// ============================================================================
// Result
// ============================================================================

/// Checked geocode result.
#[derive(Debug, Clone)]
pub struct GeocodeResult {
    /// Total number of matches across all pages.
    pub total_count: u32,
    /// Current page.
    pub page: u32,
    /// Matched addresses; may be empty.
    pub addresses: Vec<GeocodeAddress>,
}

// ============================================================================
// Client Method
// ============================================================================

impl<T: HttpTransport> MapsClient<T> {
    /// Converts an address to coordinates.
    ///
    /// # Errors
    ///
    /// Gateway failures, a failure envelope, or a malformed body.
    pub async fn geocode(&self, request: &GeocodeRequest) -> Result<GeocodeResult, MapsError> {
        let mut params: Vec<(&str, String)> = vec![("query", request.query.clone())];
        if let Some(coordinate) = &request.coordinate {
            params.push(("coordinate", coordinate.clone()));
        }
        if let Some(filter) = &request.filter {
            params.push(("filter", filter.clone()));
        }
        if let Some(language) = &request.language {
            params.push(("language", language.clone()));
        }
        if let Some(page) = request.page {
            params.push(("page", page.to_string()));
        }
        if let Some(count) = request.count {
            params.push(("count", count.to_string()));
        }

        debug!(query = %request.query, "geocode lookup");
        let response: GeocodeResponse = self.get_json(endpoints::GEOCODE, &params).await?;
        response.into_result()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_envelope_passes_through() {
        let wire: GeocodeResponse = serde_json::from_value(json!({
            "status": "OK",
            "meta": {"totalCount": 1, "page": 1, "count": 1},
            "addresses": [{
                "roadAddress": "152 Teheran-ro, Gangnam-gu, Seoul",
                "jibunAddress": "737 Yeoksam-dong, Gangnam-gu, Seoul",
                "englishAddress": "152, Teheran-ro, Gangnam-gu, Seoul",
                "x": "127.0368",
                "y": "37.5085"
            }]
        }))
        .unwrap();

        let result = wire.into_result().unwrap();
        assert_eq!(result.total_count, 1);
        assert_eq!(result.addresses[0].x, "127.0368");
    }

    #[test]
    fn failure_envelope_becomes_api_error() {
        let wire: GeocodeResponse = serde_json::from_value(json!({
            "status": "INVALID_REQUEST",
            "errorMessage": "query is empty"
        }))
        .unwrap();

        let err = wire.into_result().unwrap_err();
        assert!(matches!(err, MapsError::Api(message) if message.contains("query is empty")));
    }

    #[test]
    fn missing_error_message_falls_back() {
        let wire: GeocodeResponse =
            serde_json::from_value(json!({"status": "SYSTEM_ERROR"})).unwrap();
        let err = wire.into_result().unwrap_err();
        assert!(matches!(err, MapsError::Api(message) if message.contains("unknown error")));
    }
}
