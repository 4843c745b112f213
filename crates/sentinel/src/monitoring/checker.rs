use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use tracing::debug;

use crate::error::ProbeError;
use crate::protocol::MonitorRequest;

/// Redirect hops followed before a probe is reported as a redirect error
pub const MAX_REDIRECTS: usize = 10;

const USER_AGENT: &str = concat!("sentinel/", env!("CARGO_PKG_VERSION"));

/// Raw outcome of a probe that received an HTTP response
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub status: u16,
    /// Time from send until the response headers arrived
    pub response_time: Duration,
    pub headers: HeaderMap,
    /// Body bytes, present only when requested and fully read
    pub body: Option<Vec<u8>>,
}

/// Issues a single probe against a target
#[async_trait::async_trait]
pub trait Checker: Send + Sync {
    /// Probe `target` once. `read_body` asks for the response body to be
    /// collected for format validation.
    async fn check(&self, target: &str, read_body: bool) -> Result<ProbeOutcome, ProbeError>;
}

/// HTTP GET checker sharing one client across a run
pub struct HttpChecker {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpChecker {
    /// Build a checker from the transport policy and resolved auth headers.
    pub fn new(
        timeout_secs: u64,
        follow_redirects: bool,
        validate_ssl: bool,
        auth_headers: HeaderMap,
    ) -> Result<Self, ProbeError> {
        let redirect = if follow_redirects { Policy::limited(MAX_REDIRECTS) } else { Policy::none() };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(redirect)
            .danger_accept_invalid_certs(!validate_ssl)
            .default_headers(auth_headers)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProbeError::Request(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, timeout_secs })
    }

    /// Checker configured from a request's policy fields.
    pub fn for_request(request: &MonitorRequest, auth_headers: HeaderMap) -> Result<Self, ProbeError> {
        Self::new(request.timeout, request.follow_redirects, request.validate_ssl, auth_headers)
    }
}

#[async_trait::async_trait]
impl Checker for HttpChecker {
    async fn check(&self, target: &str, read_body: bool) -> Result<ProbeOutcome, ProbeError> {
        let start = Instant::now();

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(&e, self.timeout_secs))?;

        let response_time = start.elapsed();
        let status = response.status().as_u16();
        let headers = response.headers().clone();

        let body = if read_body {
            match response.bytes().await {
                Ok(bytes) => Some(bytes.to_vec()),
                Err(e) => {
                    debug!("Failed to read body from {}: {}", target, e);
                    None
                }
            }
        } else {
            None
        };

        Ok(ProbeOutcome { status, response_time, headers, body })
    }
}
