//! Environment configuration.
//!
//! All configuration is resolved once at startup into an owned [`Config`]
//! value and passed by reference from `main`. Components never read the
//! environment themselves.

use navikit_gateway::RetryPolicy;
use thiserror::Error;

/// Default per-attempt timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default retry budget.
const DEFAULT_MAX_RETRIES: u32 = 3;

// ============================================================================
// Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("Missing required environment variables: {0}")]
    MissingCredentials(String),

    /// Only one of the ncloud key pair was provided.
    #[error(
        "Both NCLOUD_ACCESS_KEY and NCLOUD_SECRET_KEY must be provided together for the \
         billing API"
    )]
    PartialNcloudKeys,

    /// A numeric variable did not parse.
    #[error("Invalid value for {name}: {value}")]
    InvalidNumber {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

// ============================================================================
// Config
// ============================================================================

/// Maps API key pair.
#[derive(Debug, Clone)]
pub struct NaverKeys {
    /// `x-ncp-apigw-api-key-id` value.
    pub client_id: String,
    /// `x-ncp-apigw-api-key` value.
    pub client_secret: String,
}

/// Billing API signing key pair.
#[derive(Debug, Clone)]
pub struct NcloudKeys {
    /// IAM access key.
    pub access_key: String,
    /// HMAC signing key.
    pub secret_key: String,
}

/// Request timeout and retry settings.
#[derive(Debug, Clone, Copy)]
pub struct RequestSettings {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Retries after the first attempt.
    pub max_retries: u32,
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maps API credentials (required).
    pub naver: NaverKeys,
    /// Billing API credentials (optional, both-or-neither).
    pub ncloud: Option<NcloudKeys>,
    /// Request settings.
    pub request: RequestSettings,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Missing Maps credentials, a half-provided ncloud key pair, or an
    /// unparseable numeric setting.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through a variable lookup function.
    ///
    /// Empty values count as unset, matching how half-configured
    /// environments usually look.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let client_id = get("NAVER_CLIENT_ID");
        let client_secret = get("NAVER_CLIENT_SECRET");
        let (client_id, client_secret) = match (client_id, client_secret) {
            (Some(id), Some(secret)) => (id, secret),
            (id, secret) => {
                let mut missing = Vec::new();
                if id.is_none() {
                    missing.push("NAVER_CLIENT_ID");
                }
                if secret.is_none() {
                    missing.push("NAVER_CLIENT_SECRET");
                }
                return Err(ConfigError::MissingCredentials(missing.join(", ")));
            }
        };

        let ncloud = match (get("NCLOUD_ACCESS_KEY"), get("NCLOUD_SECRET_KEY")) {
            (Some(access_key), Some(secret_key)) => Some(NcloudKeys {
                access_key,
                secret_key,
            }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialNcloudKeys),
        };

        let timeout_ms = parse_number(get("REQUEST_TIMEOUT"), "REQUEST_TIMEOUT", DEFAULT_TIMEOUT_MS)?;
        let max_retries = parse_number(get("MAX_RETRIES"), "MAX_RETRIES", DEFAULT_MAX_RETRIES)?;

        Ok(Self {
            naver: NaverKeys {
                client_id,
                client_secret,
            },
            ncloud,
            request: RequestSettings {
                timeout_ms,
                max_retries,
            },
        })
    }

    /// Whether the billing API can be used.
    pub fn billing_available(&self) -> bool {
        self.ncloud.is_some()
    }

    /// The retry policy derived from the request settings.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.request.timeout_ms, self.request.max_retries)
    }
}

fn parse_number<N: std::str::FromStr>(
    value: Option<String>,
    name: &'static str,
    default: N,
) -> Result<N, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let config = config_from(&[
            ("NAVER_CLIENT_ID", "id"),
            ("NAVER_CLIENT_SECRET", "secret"),
        ])
        .unwrap();
        assert!(!config.billing_available());
        assert_eq!(config.request.timeout_ms, 30_000);
        assert_eq!(config.request.max_retries, 3);
    }

    #[test]
    fn missing_credentials_are_reported_by_name() {
        let err = config_from(&[("NAVER_CLIENT_ID", "id")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingCredentials(names) if names == "NAVER_CLIENT_SECRET"
        ));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let err = config_from(&[
            ("NAVER_CLIENT_ID", ""),
            ("NAVER_CLIENT_SECRET", "secret"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentials(_)));
    }

    #[test]
    fn ncloud_keys_are_both_or_neither() {
        let err = config_from(&[
            ("NAVER_CLIENT_ID", "id"),
            ("NAVER_CLIENT_SECRET", "secret"),
            ("NCLOUD_ACCESS_KEY", "ak"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::PartialNcloudKeys));

        let config = config_from(&[
            ("NAVER_CLIENT_ID", "id"),
            ("NAVER_CLIENT_SECRET", "secret"),
            ("NCLOUD_ACCESS_KEY", "ak"),
            ("NCLOUD_SECRET_KEY", "sk"),
        ])
        .unwrap();
        assert!(config.billing_available());
    }

    #[test]
    fn numeric_overrides_apply() {
        let config = config_from(&[
            ("NAVER_CLIENT_ID", "id"),
            ("NAVER_CLIENT_SECRET", "secret"),
            ("REQUEST_TIMEOUT", "5000"),
            ("MAX_RETRIES", "1"),
        ])
        .unwrap();
        assert_eq!(config.request.timeout_ms, 5_000);
        assert_eq!(config.request.max_retries, 1);
        assert_eq!(
            config.retry_policy().timeout,
            std::time::Duration::from_millis(5_000)
        );
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = config_from(&[
            ("NAVER_CLIENT_ID", "id"),
            ("NAVER_CLIENT_SECRET", "secret"),
            ("MAX_RETRIES", "many"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber { name: "MAX_RETRIES", .. }
        ));
    }
}
