use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ProbeError;

/// Advisory attached to certificate failures; never applied automatically
pub const TLS_WARNING: &str =
    "SSL certificate verification failed; consider setting validate_ssl to false for internal testing";

/// Outcome of probing one endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointResult {
    /// Endpoint exactly as given in the request
    pub endpoint: String,

    /// HTTP status code, 0 when no response was received
    pub status: u16,

    /// Seconds from send to response headers, 0 on failure
    pub response_time: f64,

    /// Whether the body satisfied the expected-keys contract
    pub valid_format: bool,

    /// Response headers, lowercased names as normalized by the HTTP stack
    pub headers: BTreeMap<String, String>,

    /// Reliability score, 0..=100
    pub score: u8,

    /// Transport failure cause
    pub error: Option<String>,

    pub warnings: Vec<String>,
}

impl EndpointResult {
    /// Result for an endpoint that answered with `status`.
    pub fn success(
        endpoint: String,
        status: u16,
        response_time: f64,
        headers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            endpoint,
            status,
            response_time,
            valid_format: true,
            headers,
            score: 0,
            error: None,
            warnings: Vec::new(),
        }
    }

    /// Zero-score result for an endpoint that produced no response.
    pub fn failure(endpoint: String, error: &ProbeError) -> Self {
        let warnings = if error.is_tls() { vec![TLS_WARNING.to_string()] } else { Vec::new() };

        Self {
            endpoint,
            status: 0,
            response_time: 0.0,
            valid_format: false,
            headers: BTreeMap::new(),
            score: 0,
            error: Some(error.to_string()),
            warnings,
        }
    }

    pub(crate) fn with_warnings(mut self, warnings: impl IntoIterator<Item = String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub(crate) fn with_format(mut self, valid_format: bool) -> Self {
        self.valid_format = valid_format;
        self
    }

    pub(crate) fn with_score(mut self, score: u8) -> Self {
        self.score = score;
        self
    }

    /// Whether the endpoint answered with a 2xx status
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Per-run counters derived from the endpoint results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub total_endpoints: usize,
    pub successful: usize,
    pub failed: usize,
    /// Mean response time over successful endpoints only
    pub avg_response_time: f64,
}

impl RunStats {
    pub fn from_results(results: &[EndpointResult]) -> Self {
        let (successful, time_sum) = results
            .iter()
            .filter(|result| result.is_successful())
            .fold((0usize, 0.0f64), |(count, sum), result| (count + 1, sum + result.response_time));

        let avg_response_time = if successful == 0 { 0.0 } else { time_sum / successful as f64 };

        Self {
            total_endpoints: results.len(),
            successful,
            failed: results.len() - successful,
            avg_response_time,
        }
    }
}

/// Ordered endpoint results of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointResults {
    pub endpoints: Vec<EndpointResult>,
}

/// Aggregated result of one monitoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorResponse {
    /// Overall score strictly above the pass threshold
    pub success: bool,
    pub results: EndpointResults,
    /// Mean of all endpoint scores, 0 for an empty run
    pub overall_score: f64,
    /// Wall-clock seconds for the whole batch
    pub execution_time: f64,
    pub stats: RunStats,
}

impl MonitorResponse {
    pub fn endpoints(&self) -> &[EndpointResult] {
        &self.results.endpoints
    }
}
