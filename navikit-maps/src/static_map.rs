//! Static raster map rendering.
//!
//! The only endpoint returning a binary payload. There is no envelope; a
//! non-2xx HTTP status is the only failure signal, classified by the
//! gateway.

use navikit_gateway::HttpTransport;
use tracing::debug;

use crate::client::MapsClient;
use crate::endpoints;
use crate::error::MapsError;

/// Default zoom level.
const DEFAULT_LEVEL: u8 = 16;

/// Default image edge in pixels.
const DEFAULT_SIZE: u32 = 300;

// ============================================================================
// Request
// ============================================================================

/// Parameters for a static map render.
#[derive(Debug, Clone)]
pub struct StaticMapRequest {
    /// Map center, `"lon,lat"`.
    pub center: String,
    /// Zoom level 1-20.
    pub level: u8,
    /// Image width in pixels, up to 1024.
    pub width: u32,
    /// Image height in pixels, up to 1024.
    pub height: u32,
    /// Map style: `basic`, `traffic`, `satellite`, `satellite_base`,
    /// `terrain`.
    pub maptype: String,
    /// Render scale, 1 or 2.
    pub scale: u8,
    /// Marker spec, e.g. `"type:d|size:mid|pos:127.0 37.5|color:red"`.
    pub markers: Option<String>,
    /// Path spec, e.g. `"color:0x0000FF|weight:5|127.0 37.5,127.1 37.6"`.
    pub path: Option<String>,
}

impl Default for StaticMapRequest {
    fn default() -> Self {
        Self {
            center: String::new(),
            level: DEFAULT_LEVEL,
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            maptype: "basic".to_string(),
            scale: 1,
            markers: None,
            path: None,
        }
    }
}

// ============================================================================
// Client Method
// ============================================================================

impl<T: HttpTransport> MapsClient<T> {
    /// Renders a static map image (PNG bytes).
    ///
    /// # Errors
    ///
    /// Gateway failures, including classified non-2xx statuses.
    pub async fn static_map(&self, request: &StaticMapRequest) -> Result<Vec<u8>, MapsError> {
        let mut params: Vec<(&str, String)> = vec![
            ("center", request.center.clone()),
            ("level", request.level.to_string()),
            ("w", request.width.to_string()),
            ("h", request.height.to_string()),
            ("maptype", request.maptype.clone()),
            ("scale", request.scale.to_string()),
        ];
        if let Some(markers) = &request.markers {
            params.push(("markers", markers.clone()));
        }
        if let Some(path) = &request.path {
            params.push(("path", path.clone()));
        }

        debug!(center = %request.center, level = request.level, "static map render");
        self.get_bytes(endpoints::STATIC_MAP, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let request = StaticMapRequest::default();
        assert_eq!(request.level, 16);
        assert_eq!(request.width, 300);
        assert_eq!(request.height, 300);
        assert_eq!(request.maptype, "basic");
        assert_eq!(request.scale, 1);
    }
}
