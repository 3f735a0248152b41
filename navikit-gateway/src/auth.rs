//! Request authentication.
//!
//! Two credential schemes cover the five Naver endpoints: a static API-key
//! header pair for the Maps APIs, and a per-request HMAC-SHA256 signature
//! for the billing API. Signing is pure and deterministic given its inputs,
//! so it can be verified against fixed vectors.

use base64::prelude::*;
use ring::hmac;
use std::fmt;
use url::Url;

// ============================================================================
// Credential
// ============================================================================

/// A credential for one of the two authentication schemes.
///
/// Secrets are never serialized, and the `Debug` impl redacts them so they
/// cannot leak through logging.
#[derive(Clone)]
pub enum Credential {
    /// Static API-key pair for the Maps APIs.
    ApiKey {
        /// `x-ncp-apigw-api-key-id` value.
        client_id: String,
        /// `x-ncp-apigw-api-key` value.
        client_secret: String,
    },
    /// HMAC-signing key pair for the billing API.
    Signed {
        /// `x-ncp-iam-access-key` value.
        access_key: String,
        /// HMAC-SHA256 signing key. Never sent on the wire.
        secret_key: String,
    },
}

impl Credential {
    /// Builds the authentication headers for one request.
    ///
    /// The signed scheme incorporates the request method, the URL path
    /// component (no scheme, host, or query), and the caller-supplied
    /// timestamp; the API-key scheme is static.
    pub fn headers(&self, method: &str, url: &Url, timestamp_millis: i64) -> Vec<(String, String)> {
        match self {
            Credential::ApiKey {
                client_id,
                client_secret,
            } => vec![
                ("x-ncp-apigw-api-key-id".to_string(), client_id.clone()),
                ("x-ncp-apigw-api-key".to_string(), client_secret.clone()),
            ],
            Credential::Signed {
                access_key,
                secret_key,
            } => {
                let signature =
                    make_signature(method, url.path(), timestamp_millis, access_key, secret_key);
                vec![
                    (
                        "x-ncp-apigw-timestamp".to_string(),
                        timestamp_millis.to_string(),
                    ),
                    ("x-ncp-iam-access-key".to_string(), access_key.clone()),
                    ("x-ncp-apigw-signature-v2".to_string(), signature),
                    ("Content-Type".to_string(), "application/json".to_string()),
                ]
            }
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::ApiKey { client_id, .. } => f
                .debug_struct("ApiKey")
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .finish(),
            Credential::Signed { access_key, .. } => f
                .debug_struct("Signed")
                .field("access_key", access_key)
                .field("secret_key", &"<redacted>")
                .finish(),
        }
    }
}

// ============================================================================
// Signature
// ============================================================================

/// Computes the `x-ncp-apigw-signature-v2` value.
///
/// The signed message is `"{method} {url_path}\n{timestamp_millis}\n{access_key}"`,
/// HMAC-SHA256 under `secret_key`, base64-encoded. `url_path` must be the
/// path component only.
pub fn make_signature(
    method: &str,
    url_path: &str,
    timestamp_millis: i64,
    access_key: &str,
    secret_key: &str,
) -> String {
    let message = format!("{method} {url_path}\n{timestamp_millis}\n{access_key}");
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret_key.as_bytes());
    let tag = hmac::sign(&key, message.as_bytes());
    BASE64_STANDARD.encode(tag.as_ref())
}

// ============================================================================
// Tests
// ============================================================================
