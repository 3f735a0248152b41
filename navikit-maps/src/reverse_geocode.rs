//! Coordinate → address conversion.
//!
//! Wire format: the discriminant is nested, `status.code == 0` on success
//! with `status.message` carrying the failure detail.

use navikit_gateway::HttpTransport;
use serde::Deserialize;
use tracing::debug;

use crate::client::MapsClient;
use crate::endpoints;
use crate::error::MapsError;

/// Default order list: most specific address forms first.
const DEFAULT_ORDERS: &str = "roadaddr,addr,admcode,legalcode";

// ============================================================================
// Request
// ============================================================================

/// Parameters for a reverse geocode lookup.
#[derive(Debug, Clone, Default)]
pub struct ReverseGeocodeRequest {
    /// Coordinate to convert, `"lon,lat"`.
    pub coords: String,
    /// Input coordinate system (default `epsg:4326`).
    pub sourcecrs: Option<String>,
    /// Output coordinate system (default `epsg:4326`).
    pub targetcrs: Option<String>,
    /// Comma-separated response orders (`legalcode,admcode,addr,roadaddr`).
    pub orders: Option<String>,
}

// ============================================================================
// Wire Types
// ============================================================================

/// Raw reverse geocode response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ReverseGeocodeResponse {
    /// Nested discriminant.
    pub status: ReverseGeocodeStatus,
    /// Matched address records.
    #[serde(default)]
    pub results: Vec<ReverseGeocodeItem>,
}

/// Nested status discriminant.
#[derive(Debug, Clone, Deserialize)]
pub struct ReverseGeocodeStatus {
    /// 0 on success.
    pub code: i32,
    /// Status name, e.g. `"ok"`.
    #[serde(default)]
    pub name: String,
    /// Human-readable detail.
    #[serde(default)]
    pub message: String,
}

/// One converted address record.
#[derive(Debug, Clone, Deserialize)]
pub struct ReverseGeocodeItem {
    /// Address form: `legalcode`, `admcode`, `addr`, or `roadaddr`.
    pub name: String,
    /// District code.
    #[serde(default)]
    pub code: AreaCode,
    /// Administrative region hierarchy.
    pub region: Region,
    /// Lot or road detail, present for `addr`/`roadaddr`.
    #[serde(default)]
    pub land: Option<Land>,
}

/// District code record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AreaCode {
    /// Code identifier.
    #[serde(default)]
    pub id: String,
}

/// Region hierarchy, country down to sub-village.
#[derive(Debug, Clone, Deserialize)]
pub struct Region {
    /// Country level.
    #[serde(default)]
    pub area0: Option<Area>,
    /// Province / metropolitan city.
    #[serde(default)]
    pub area1: Option<Area>,
    /// City / district.
    #[serde(default)]
    pub area2: Option<Area>,
    /// Town / neighborhood.
    #[serde(default)]
    pub area3: Option<Area>,
    /// Sub-village.
    #[serde(default)]
    pub area4: Option<Area>,
}

/// One region level.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Area {
    /// Region name, may be empty.
    #[serde(default)]
    pub name: String,
}

/// Lot / road detail.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Land {
    /// Road name for `roadaddr` records.
    #[serde(default)]
    pub name: Option<String>,
    /// Primary lot or building number.
    #[serde(default)]
    pub number1: String,
    /// Secondary number, may be empty.
    #[serde(default)]
    pub number2: String,
}

impl ReverseGeocodeItem {
    /// Human-readable label for the address form.
    pub fn type_name(&self) -> &str {
        match self.name.as_str() {
            "legalcode" => "Legal district",
            "admcode" => "Administrative district",
            "addr" => "Lot address",
            "roadaddr" => "Road address",
            other => other,
        }
    }

    /// Assembles the display address from region levels and land detail.
    pub fn display_address(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        for area in [
            &self.region.area1,
            &self.region.area2,
            &self.region.area3,
            &self.region.area4,
        ] {
            if let Some(area) = area {
                if !area.name.is_empty() {
                    parts.push(area.name.clone());
                }
            }
        }

        if let Some(land) = &self.land {
            if self.name == "roadaddr" {
                if let Some(road) = &land.name {
                    if !road.is_empty() {
                        parts.push(road.clone());
                    }
                }
            }
            if !land.number1.is_empty() {
                let mut number = land.number1.clone();
                if !land.number2.is_empty() {
                    number.push('-');
                    number.push_str(&land.number2);
                }
                parts.push(number);
            }
        }

        parts.join(" ")
    }
}

impl ReverseGeocodeResponse {
    /// Applies the envelope check and strips the wire envelope.
    pub fn into_result(self) -> Result<ReverseGeocodeResult, MapsError> {
        if self.status.code != 0 {
            return Err(MapsError::Api(format!(
                "Coordinate conversion failed: {}",
                self.status.message
            )));
        }
        Ok(ReverseGeocodeResult {
            results: self.results,
        })
    }
}

// ============================================================================
// Result
// ============================================================================

/// Checked reverse geocode result.
#[derive(Debug, Clone)]
pub struct ReverseGeocodeResult {
    /// Matched address records; may be empty for coordinates outside Korea.
    pub results: Vec<ReverseGeocodeItem>,
}

// ============================================================================
// Client Method
// ============================================================================

impl<T: HttpTransport> MapsClient<T> {
    /// Converts a coordinate to addresses.
    ///
    /// # Errors
    ///
    /// Gateway failures, a failure envelope, or a malformed body.
    pub async fn reverse_geocode(
        &self,
        request: &ReverseGeocodeRequest,
    ) -> Result<ReverseGeocodeResult, MapsError> {
        let mut params: Vec<(&str, String)> = vec![
            ("coords", request.coords.clone()),
            (
                "orders",
                request
                    .orders
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ORDERS.to_string()),
            ),
            ("output", "json".to_string()),
        ];
        if let Some(sourcecrs) = &request.sourcecrs {
            params.push(("sourcecrs", sourcecrs.clone()));
        }
        if let Some(targetcrs) = &request.targetcrs {
            params.push(("targetcrs", targetcrs.clone()));
        }

        debug!(coords = %request.coords, "reverse geocode lookup");
        let response: ReverseGeocodeResponse =
            self.get_json(endpoints::REVERSE_GEOCODE, &params).await?;
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

    fn item(value: serde_json::Value) -> ReverseGeocodeItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn failure_envelope_becomes_api_error() {
        let wire: ReverseGeocodeResponse = serde_json::from_value(json!({
            "status": {"code": 100, "name": "input_invalid", "message": "invalid coords"}
        }))
        .unwrap();
        let err = wire.into_result().unwrap_err();
        assert!(matches!(err, MapsError::Api(message) if message.contains("invalid coords")));
    }

    #[test]
    fn road_address_includes_road_name_and_number() {
        let record = item(json!({
            "name": "roadaddr",
            "region": {
                "area1": {"name": "Seoul"},
                "area2": {"name": "Gangnam-gu"},
                "area3": {"name": "Yeoksam-dong"}
            },
            "land": {"name": "Teheran-ro", "number1": "152", "number2": ""}
        }));
        assert_eq!(
            record.display_address(),
            "Seoul Gangnam-gu Yeoksam-dong Teheran-ro 152"
        );
        assert_eq!(record.type_name(), "Road address");
    }

    #[test]
    fn lot_address_joins_number_pair() {
        let record = item(json!({
            "name": "addr",
            "region": {
                "area1": {"name": "Seoul"},
                "area2": {"name": "Gangnam-gu"},
                "area3": {"name": "Yeoksam-dong"}
            },
            "land": {"number1": "737", "number2": "32"}
        }));
        assert_eq!(record.display_address(), "Seoul Gangnam-gu Yeoksam-dong 737-32");
    }

    #[test]
    fn district_record_has_no_land_part() {
        let record = item(json!({
            "name": "legalcode",
            "region": {
                "area1": {"name": "Seoul"},
                "area2": {"name": "Gangnam-gu"},
                "area3": {"name": "Yeoksam-dong"}
            }
        }));
        assert_eq!(record.display_address(), "Seoul Gangnam-gu Yeoksam-dong");
        assert_eq!(record.type_name(), "Legal district");
    }
}
