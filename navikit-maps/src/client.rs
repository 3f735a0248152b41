//! Shared Maps API client.
//!
//! One [`MapsClient`] serves the four Maps endpoints (geocode, reverse
//! geocode, directions, static map) with the static API-key credential.
//! The endpoint modules add their typed methods onto it.

use navikit_gateway::{Credential, HttpTransport, RequestExecutor, ReqwestTransport, RetryPolicy};
use serde::de::DeserializeOwned;

use crate::error::MapsError;

/// Client for the API-key authenticated Maps endpoints.
#[derive(Debug, Clone)]
pub struct MapsClient<T: HttpTransport = ReqwestTransport> {
    executor: RequestExecutor<T>,
    credential: Credential,
}

impl MapsClient<ReqwestTransport> {
    /// Creates a client over the production transport.
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialized.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        policy: RetryPolicy,
    ) -> Result<Self, MapsError> {
        let executor = RequestExecutor::new(policy)?;
        Ok(Self::with_executor(
            executor,
            Credential::ApiKey {
                client_id: client_id.into(),
                client_secret: client_secret.into(),
            },
        ))
    }
}

impl<T: HttpTransport> MapsClient<T> {
    /// Creates a client over a custom executor and credential.
    pub fn with_executor(executor: RequestExecutor<T>, credential: Credential) -> Self {
        Self {
            executor,
            credential,
        }
    }

    /// GET returning a JSON body, decoded into `R`.
    pub(crate) async fn get_json<R: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<R, MapsError> {
        let response = self
            .executor
            .get(url, params, &self.credential)
            .await?
            .ensure_success()?;
        Ok(response.json()?)
    }

    /// GET returning a binary body (images).
    pub(crate) async fn get_bytes(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<u8>, MapsError> {
        let response = self
            .executor
            .get(url, params, &self.credential)
            .await?
            .ensure_success()?;
        Ok(response.body)
    }
}
