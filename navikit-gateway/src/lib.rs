// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Navikit Gateway
//!
//! The outbound HTTP gateway for the Naver APIs.
//!
//! This crate turns a logical request (URL, query parameters, credential)
//! into an authenticated, time-bounded, retried HTTP call, and classifies
//! failures into a stable taxonomy. It provides:
//!
//! - [`auth::Credential`] - API-key and HMAC-signed authentication schemes
//! - [`executor::RequestExecutor`] - the retry/backoff/timeout state machine
//! - [`retry::RetryPolicy`] - per-call timeout and retry budget
//! - [`error::ErrorKind`] - the failure taxonomy and status classification
//! - [`transport::HttpTransport`] - the pluggable transport seam
//!
//! ## Example
//!
//! ```ignore
//! use navikit_gateway::{Credential, RequestExecutor, RetryPolicy};
//!
//! let executor = RequestExecutor::new(RetryPolicy::default())?;
//! let credential = Credential::ApiKey {
//!     client_id: "id".into(),
//!     client_secret: "secret".into(),
//! };
//! let response = executor
//!     .get("https://naveropenapi.apigw.ntruss.com/map-geocode/v2/geocode",
//!          &[("query", "Seoul".to_string())],
//!          &credential)
//!     .await?;
//! ```

pub mod auth;
pub mod error;
pub mod executor;
pub mod retry;
pub mod transport;

// Re-export key types at crate root

// Errors & taxonomy
pub use error::{ApiFailure, ClientCause, ErrorKind, GatewayError, TransportError};

// Authentication
pub use auth::{Credential, make_signature};

// Executor & policy
pub use executor::RequestExecutor;
pub use retry::RetryPolicy;

// Transport
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
