//! Maps client error types.

use navikit_gateway::GatewayError;
use thiserror::Error;

/// Error type for endpoint client operations.
#[derive(Debug, Error)]
pub enum MapsError {
    /// The gateway call itself failed (timeout, exhausted transport, or a
    /// failure HTTP status).
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The endpoint returned 2xx but its envelope discriminant signals a
    /// failure. Carries the provider's message, already user-ready.
    #[error("{0}")]
    Api(String),

    /// The response body did not match the expected wire format.
    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}
