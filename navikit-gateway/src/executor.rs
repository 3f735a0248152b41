//! The request executor: retry, backoff, and per-attempt deadlines.
//!
//! One `execute` invocation drives a single logical call through up to
//! `max_retries + 1` strictly sequential attempts:
//!
//! - 2xx and non-429 4xx responses are terminal on the spot.
//! - 429 and 5xx responses, and transport errors, back off `2^i` seconds
//!   (attempt-indexed from 0) and retry while budget remains; once the
//!   budget is spent the last response is returned as-is, the last
//!   transport error raised.
//! - A timeout aborts the whole call immediately with a `Timeout` failure,
//!   regardless of remaining budget. Timeouts surface infrastructure
//!   problems; they are not masked by silent retries.
//!
//! Concurrent invocations share no mutable state; nothing here locks.

use chrono::Utc;
use tokio::time::Instant;
use tracing::{debug, warn};
use url::Url;

use crate::auth::Credential;
use crate::error::{ApiFailure, GatewayError, TransportError, is_retryable_status};
use crate::retry::RetryPolicy;
use crate::transport::{HttpResponse, HttpTransport, ReqwestTransport};

// ============================================================================
// Attempt Outcome
// ============================================================================

/// Outcome of one attempt, before the retry decision.
#[derive(Debug)]
enum AttemptOutcome {
    /// A response arrived (any status).
    Response(HttpResponse),
    /// The transport failed before a response arrived.
    TransportFailed(TransportError),
    /// The cancellation guard fired first.
    TimedOut,
}

// ============================================================================
// Request Executor
// ============================================================================

/// Drives a logical GET request to completion or exhaustion.
#[derive(Debug, Clone)]
pub struct RequestExecutor<T: HttpTransport = ReqwestTransport> {
    transport: T,
    policy: RetryPolicy,
}

impl RequestExecutor<ReqwestTransport> {
    /// Creates an executor over the production transport.
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialized.
    pub fn new(policy: RetryPolicy) -> Result<Self, GatewayError> {
        Ok(Self::with_transport(ReqwestTransport::new()?, policy))
    }
}

impl<T: HttpTransport> RequestExecutor<T> {
    /// Creates an executor over a custom transport.
    pub fn with_transport(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// The policy this executor runs under.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Performs an authenticated GET request under the retry policy.
    ///
    /// Query parameters are appended to the URL; authentication headers are
    /// derived from the credential (the signed scheme is stamped with the
    /// current time).
    ///
    /// # Errors
    ///
    /// `GatewayError::Api` on timeout, `GatewayError::Transport` when the
    /// transport kept failing past the retry budget, `InvalidUrl` for a
    /// malformed URL. Failure *statuses* are returned as responses, not
    /// errors; use [`HttpResponse::ensure_success`] to classify them.
    pub async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
        credential: &Credential,
    ) -> Result<HttpResponse, GatewayError> {
        let mut url = Url::parse(url).map_err(|e| GatewayError::InvalidUrl(e.to_string()))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
        }

        let headers = credential.headers("GET", &url, Utc::now().timestamp_millis());
        self.execute(&url, &headers).await
    }

    /// The retry state machine. Attempts are strictly sequential: attempt
    /// `i + 1` never starts before attempt `i`'s guard has been released.
    async fn execute(
        &self,
        url: &Url,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, GatewayError> {
        let mut attempt: u32 = 0;
        loop {
            match self.attempt_once(attempt, url, headers).await {
                AttemptOutcome::TimedOut => {
                    // Aborts the whole call, retry budget or not.
                    return Err(GatewayError::Api(ApiFailure::timeout(self.policy.timeout)));
                }
                AttemptOutcome::Response(response) => {
                    if is_retryable_status(response.status) && attempt < self.policy.max_retries {
                        self.backoff(attempt).await;
                        attempt += 1;
                        continue;
                    }
                    return Ok(response);
                }
                AttemptOutcome::TransportFailed(err) => {
                    if attempt < self.policy.max_retries {
                        warn!(attempt, error = %err, "transport error, will retry");
                        self.backoff(attempt).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(err.into());
                }
            }
        }
    }

    /// One attempt under the cancellation guard.
    ///
    /// `tokio::time::timeout` scopes the guard to this function: whichever
    /// way the attempt exits, dropping the timeout future releases it.
    async fn attempt_once(
        &self,
        attempt: u32,
        url: &Url,
        headers: &[(String, String)],
    ) -> AttemptOutcome {
        let started = Instant::now();
        debug!(attempt, url = %url, "issuing attempt");

        let result = tokio::time::timeout(self.policy.timeout, self.transport.get(url, headers))
            .await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Err(_) => {
                warn!(attempt, elapsed_ms, "attempt timed out");
                AttemptOutcome::TimedOut
            }
            Ok(Ok(response)) => {
                debug!(attempt, elapsed_ms, status = response.status, "response received");
                AttemptOutcome::Response(response)
            }
            Ok(Err(err)) => {
                debug!(attempt, elapsed_ms, error = %err, "transport failed");
                AttemptOutcome::TransportFailed(err)
            }
        }
    }

    async fn backoff(&self, attempt: u32) {
        let delay = self.policy.backoff_delay(attempt);
        debug!(attempt, delay_secs = delay.as_secs(), "backing off before retry");
        tokio::time::sleep(delay).await;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// One scripted transport behavior.
    enum Step {
        Respond(u16),
        Fail(&'static str),
        Hang,
    }

    /// Transport that plays back a fixed script and counts calls.
    struct ScriptedTransport {
        script: Mutex<VecDeque<Step>>,
        calls: AtomicU32,
    }

    impl ScriptedTransport {
        fn new(steps: Vec<Step>) -> Self {
            Self {
                script: Mutex::new(steps.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HttpTransport for &ScriptedTransport {
        async fn get(
            &self,
            _url: &Url,
            _headers: &[(String, String)],
        ) -> Result<HttpResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let step = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted");
            match step {
                Step::Respond(status) => Ok(HttpResponse {
                    status,
                    body: vec![],
                }),
                Step::Fail(message) => Err(TransportError::Connect(message.to_string())),
                Step::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }
    }

    fn executor(transport: &ScriptedTransport, max_retries: u32) -> RequestExecutor<&ScriptedTransport> {
        RequestExecutor::with_transport(transport, RetryPolicy::new(30_000, max_retries))
    }

    fn credential() -> Credential {
        Credential::ApiKey {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
        }
    }

    const URL: &str = "https://naveropenapi.apigw.ntruss.com/map-geocode/v2/geocode";

    #[tokio::test(start_paused = true)]
    async fn exhausted_retries_return_the_final_response() {
        let transport = ScriptedTransport::new(vec![
            Step::Respond(503),
            Step::Respond(503),
            Step::Respond(503),
            Step::Respond(503),
        ]);
        let exec = executor(&transport, 3);

        let response = exec.get(URL, &[], &credential()).await.unwrap();
        assert_eq!(response.status, 503);
        assert_eq!(transport.calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_then_success_takes_two_attempts() {
        let transport = ScriptedTransport::new(vec![Step::Respond(429), Step::Respond(200)]);
        let exec = executor(&transport, 3);

        let response = exec.get(URL, &[], &credential()).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn client_errors_are_terminal_without_backoff() {
        let transport = ScriptedTransport::new(vec![Step::Respond(404)]);
        let exec = executor(&transport, 3);

        let started = Instant::now();
        let response = exec.get(URL, &[], &credential()).await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(transport.calls(), 1);
        // No backoff delay was observed.
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_is_exponential_per_attempt_index() {
        let transport = ScriptedTransport::new(vec![
            Step::Respond(503),
            Step::Respond(503),
            Step::Respond(503),
            Step::Respond(200),
        ]);
        let exec = executor(&transport, 3);

        let started = Instant::now();
        let response = exec.get(URL, &[], &credential()).await.unwrap();
        assert_eq!(response.status, 200);
        // 2^0 + 2^1 + 2^2 seconds of backoff, measured on the paused clock.
        assert_eq!(started.elapsed(), Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_aborts_immediately_with_budget_remaining() {
        let transport = ScriptedTransport::new(vec![
            Step::Hang,
            Step::Respond(200),
            Step::Respond(200),
            Step::Respond(200),
        ]);
        let exec = executor(&transport, 3);

        let err = exec.get(URL, &[], &credential()).await.unwrap_err();
        match err {
            GatewayError::Api(failure) => assert_eq!(failure.kind, ErrorKind::Timeout),
            other => panic!("unexpected error: {other:?}"),
        }
        // The remaining budget is not spent on further attempts.
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_errors_retry_then_surface_the_last_one() {
        let transport = ScriptedTransport::new(vec![
            Step::Fail("reset"),
            Step::Fail("reset"),
            Step::Fail("refused"),
        ]);
        let exec = executor(&transport, 2);

        let err = exec.get(URL, &[], &credential()).await.unwrap_err();
        match err {
            GatewayError::Transport(TransportError::Connect(message)) => {
                assert_eq!(message, "refused");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_error_then_success_recovers() {
        let transport =
            ScriptedTransport::new(vec![Step::Fail("reset"), Step::Respond(200)]);
        let exec = executor(&transport, 3);

        let response = exec.get(URL, &[], &credential()).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_means_a_single_attempt() {
        let transport = ScriptedTransport::new(vec![Step::Respond(503)]);
        let exec = executor(&transport, 0);

        let response = exec.get(URL, &[], &credential()).await.unwrap();
        assert_eq!(response.status, 503);
        assert_eq!(transport.calls(), 1);
    }
}
