//! The HTTP transport seam.
//!
//! The executor drives a [`HttpTransport`] rather than reqwest directly, so
//! tests can script response sequences without a network. The production
//! implementation is [`ReqwestTransport`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ApiFailure, GatewayError, TransportError};

/// User agent string for Navikit.
const USER_AGENT: &str = concat!("navikit/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Response Envelope
// ============================================================================

/// Raw response from one HTTP attempt.
///
/// Plain data (status + body) rather than a live connection handle, so the
/// executor can hold the last response across backoff waits and tests can
/// construct responses directly.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, lossy on invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error on malformed payloads.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Converts a failure status into a classified [`GatewayError`].
    ///
    /// The response body becomes the failure details, mirroring what the
    /// provider sends in error payloads.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Api` when the status is not 2xx.
    pub fn ensure_success(self) -> Result<HttpResponse, GatewayError> {
        if self.is_success() {
            Ok(self)
        } else {
            let details = self.text();
            Err(GatewayError::Api(ApiFailure::from_status(
                self.status,
                details,
            )))
        }
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// One attempt of a GET request.
///
/// Implementations perform exactly one network call per invocation; retry,
/// backoff, and deadlines belong to the executor.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issues a GET request with the given headers.
    async fn get(
        &self,
        url: &Url,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, TransportError>;
}

// ============================================================================
// Reqwest Transport
// ============================================================================

/// Production transport backed by `reqwest`.
///
/// Built without a client-level timeout: the executor's cancellation guard
/// owns the deadline for every attempt.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates the production transport.
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        let inner = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &Url,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self.inner.get(url.clone());
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientCause, ErrorKind};

    #[test]
    fn success_statuses() {
        assert!(HttpResponse { status: 200, body: vec![] }.is_success());
        assert!(HttpResponse { status: 204, body: vec![] }.is_success());
        assert!(!HttpResponse { status: 404, body: vec![] }.is_success());
    }

    #[test]
    fn ensure_success_classifies_failures() {
        let response = HttpResponse {
            status: 403,
            body: b"no subscription".to_vec(),
        };
        let err = response.ensure_success().unwrap_err();
        match err {
            GatewayError::Api(failure) => {
                assert_eq!(failure.kind, ErrorKind::Client(ClientCause::Forbidden));
                assert_eq!(failure.status_code, Some(403));
                assert_eq!(failure.details, "no subscription");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn json_parses_body() {
        let response = HttpResponse {
            status: 200,
            body: br#"{"code":0}"#.to_vec(),
        };
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["code"], 0);
    }
}
