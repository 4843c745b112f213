use std::sync::Arc;

use tracing::{debug, warn};

use super::checker::Checker;
use super::extract::{extract_response_headers, rate_limit_warning};
use super::format::{FormatCheck, INVALID_JSON_WARNING, validate_format};
use super::scoring::calculate_score;
use super::types::EndpointResult;

/// Monitoring executor - probes one endpoint and turns the outcome into a
/// scored [`EndpointResult`]
pub struct MonitoringExecutor {
    checker: Arc<dyn Checker>,
    expected_keys: Option<Arc<[String]>>,
}

impl MonitoringExecutor {
    pub fn new(checker: Arc<dyn Checker>, expected_keys: Option<&[String]>) -> Self {
        Self { checker, expected_keys: expected_keys.map(Arc::from) }
    }

    /// Execute a single probe. Never fails: transport errors become a
    /// zero-score result.
    pub async fn execute_check(&self, endpoint: String) -> EndpointResult {
        let outcome = match self.checker.check(&endpoint, self.expected_keys.is_some()).await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!("Probe of {} failed: {}", endpoint, error);
                return EndpointResult::failure(endpoint, &error);
            }
        };

        let response_time = outcome.response_time.as_secs_f64();
        let headers = extract_response_headers(&outcome.headers);
        let mut warnings: Vec<String> = rate_limit_warning(&headers).into_iter().collect();

        let valid_format = match &self.expected_keys {
            None => true,
            Some(expected) => {
                let check = match &outcome.body {
                    Some(body) => validate_format(body, expected),
                    None => FormatCheck { valid: false, warning: Some(INVALID_JSON_WARNING.to_string()) },
                };
                warnings.extend(check.warning);
                check.valid
            }
        };

        let score = calculate_score(outcome.status, response_time, valid_format);
        debug!(
            "Probed {}: status={} time={:.3}s valid_format={} score={}",
            endpoint, outcome.status, response_time, valid_format, score
        );

        EndpointResult::success(endpoint, outcome.status, response_time, headers)
            .with_format(valid_format)
            .with_warnings(warnings)
            .with_score(score)
    }
}
