//! Gateway error types and the failure taxonomy.
//!
//! Every failure a gateway call can surface is classified into one of the
//! [`ErrorKind`] categories. The user-facing message is a pure function of
//! the classified kind, the HTTP status, and the response details; nothing
//! here performs I/O.

use thiserror::Error;

// ============================================================================
// Taxonomy
// ============================================================================

/// Sub-cause for client (4xx) failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientCause {
    /// 400 - malformed request parameters.
    BadRequest,
    /// 401 - credential rejected.
    Auth,
    /// 403 - API not enabled or no permission.
    Forbidden,
    /// 404 - resource does not exist.
    NotFound,
    /// Any other 4xx.
    Other,
}

/// Stable failure categories for gateway calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The cancellation guard fired before a response arrived.
    Timeout,
    /// 429 - call quota exceeded.
    RateLimited,
    /// 4xx other than 429 - a caller mistake, never retried.
    Client(ClientCause),
    /// 500, 502, or 503 - transient provider trouble.
    Server,
    /// Anything else.
    Unknown,
}

impl ErrorKind {
    /// Classifies an HTTP status code.
    ///
    /// Note that only 500/502/503 classify as [`ErrorKind::Server`]; other
    /// 5xx statuses (501, 504, ...) fall through to [`ErrorKind::Unknown`].
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::Client(ClientCause::BadRequest),
            401 => Self::Client(ClientCause::Auth),
            403 => Self::Client(ClientCause::Forbidden),
            404 => Self::Client(ClientCause::NotFound),
            429 => Self::RateLimited,
            500 | 502 | 503 => Self::Server,
            s if (400..500).contains(&s) => Self::Client(ClientCause::Other),
            _ => Self::Unknown,
        }
    }
}

/// Whether a response status is worth another attempt.
///
/// 429 and all 5xx statuses are treated as transient; every other status is
/// terminal on the first response.
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

// ============================================================================
// Classified Failure
// ============================================================================

/// A classified terminal failure, ready for user messaging.
#[derive(Debug, Clone)]
pub struct ApiFailure {
    /// The taxonomy category.
    pub kind: ErrorKind,
    /// HTTP status, if a response was received.
    pub status_code: Option<u16>,
    /// Raw detail text (response body or transport message).
    pub details: String,
}

impl ApiFailure {
    /// Classifies a received failure response.
    pub fn from_status(status: u16, details: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::from_status(status),
            status_code: Some(status),
            details: details.into(),
        }
    }

    /// A timeout failure. No response was received, so no status is carried.
    pub fn timeout(timeout: std::time::Duration) -> Self {
        Self {
            kind: ErrorKind::Timeout,
            status_code: None,
            details: format!("no response within {} ms", timeout.as_millis()),
        }
    }

    /// Renders the user-facing message for this failure.
    ///
    /// Pure function of `(kind, status_code, details)`.
    pub fn user_message(&self) -> String {
        let status = self.status_code.unwrap_or(0);
        match self.kind {
            ErrorKind::Timeout => {
                format!("Request timed out ({}).", self.details)
            }
            ErrorKind::RateLimited => {
                "API call quota exceeded. Try again shortly.".to_string()
            }
            ErrorKind::Client(ClientCause::BadRequest) => {
                format!(
                    "Invalid request. Check the input values. Details: {}",
                    self.details
                )
            }
            ErrorKind::Client(ClientCause::Auth) => {
                "Authentication failed. Check the NAVER_CLIENT_ID and NAVER_CLIENT_SECRET \
                 credentials."
                    .to_string()
            }
            ErrorKind::Client(ClientCause::Forbidden) => {
                "API access is not allowed. Check that the API is enabled on the Naver Cloud \
                 Platform console."
                    .to_string()
            }
            ErrorKind::Client(ClientCause::NotFound) => {
                "The requested resource was not found.".to_string()
            }
            ErrorKind::Client(ClientCause::Other) => {
                format!("API request failed ({status}): {}", self.details)
            }
            ErrorKind::Server => {
                "The Naver API is temporarily unavailable. Try again shortly.".to_string()
            }
            ErrorKind::Unknown => {
                format!("API error ({status}): {}", self.details)
            }
        }
    }
}

// ============================================================================
// Gateway Error
// ============================================================================

/// Error type for gateway calls.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A classified terminal failure (timeout or failure status).
    #[error("{}", .0.user_message())]
    Api(ApiFailure),

    /// Transport-level failure that survived the retry budget.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

// ============================================================================
// Transport Error
// ============================================================================

/// Error from a single transport attempt (no response received).
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Could not reach the remote host.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other transport-level failure.
    #[error("request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn status_classification_matches_taxonomy() {
        assert_eq!(
            ErrorKind::from_status(400),
            ErrorKind::Client(ClientCause::BadRequest)
        );
        assert_eq!(
            ErrorKind::from_status(401),
            ErrorKind::Client(ClientCause::Auth)
        );
        assert_eq!(
            ErrorKind::from_status(403),
            ErrorKind::Client(ClientCause::Forbidden)
        );
        assert_eq!(
            ErrorKind::from_status(404),
            ErrorKind::Client(ClientCause::NotFound)
        );
        assert_eq!(ErrorKind::from_status(429), ErrorKind::RateLimited);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::Server);
        assert_eq!(ErrorKind::from_status(502), ErrorKind::Server);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::Server);
        assert_eq!(
            ErrorKind::from_status(418),
            ErrorKind::Client(ClientCause::Other)
        );
    }

    #[test]
    fn odd_server_statuses_are_unknown() {
        // Only 500/502/503 are in the Server bucket.
        assert_eq!(ErrorKind::from_status(501), ErrorKind::Unknown);
        assert_eq!(ErrorKind::from_status(504), ErrorKind::Unknown);
        assert_eq!(ErrorKind::from_status(301), ErrorKind::Unknown);
    }

    #[test]
    fn retryability_follows_status() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(504));
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(404));
        assert!(!is_retryable_status(200));
    }

    #[test]
    fn user_messages_carry_details_where_expected() {
        let bad_request = ApiFailure::from_status(400, "query is empty");
        assert!(bad_request.user_message().contains("query is empty"));

        let auth = ApiFailure::from_status(401, "ignored");
        assert!(auth.user_message().contains("NAVER_CLIENT_ID"));

        let unknown = ApiFailure::from_status(504, "gateway timeout");
        assert!(unknown.user_message().contains("504"));
    }

    #[test]
    fn user_message_is_pure() {
        let failure = ApiFailure::from_status(503, "maintenance");
        assert_eq!(failure.user_message(), failure.user_message());
    }

    #[test]
    fn timeout_failure_has_no_status() {
        let failure = ApiFailure::timeout(Duration::from_millis(30_000));
        assert_eq!(failure.kind, ErrorKind::Timeout);
        assert_eq!(failure.status_code, None);
        assert!(failure.user_message().contains("30000 ms"));
    }
}
