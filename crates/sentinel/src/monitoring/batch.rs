use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{error, info};

use super::checker::{Checker, HttpChecker};
use super::executor::MonitoringExecutor;
use super::types::{EndpointResults, EndpointResult, MonitorResponse, RunStats};
use crate::PASS_THRESHOLD;
use crate::auth::resolve_auth_headers;
use crate::error::ProbeError;
use crate::protocol::MonitorRequest;

/// Runs one monitoring batch: every endpoint is probed on its own task and
/// the results are reduced once all tasks have finished.
pub struct BatchRunner {
    checker: Result<Arc<dyn Checker>, String>,
}

impl BatchRunner {
    /// Runner probing over HTTP with the request's auth and transport policy.
    pub fn for_request(request: &MonitorRequest) -> Self {
        let auth_headers = resolve_auth_headers(request.auth.as_ref());
        let checker = HttpChecker::for_request(request, auth_headers)
            .map(|checker| Arc::new(checker) as Arc<dyn Checker>)
            .map_err(|e| e.to_string());

        Self { checker }
    }

    /// Runner probing through a custom checker.
    pub fn with_checker(checker: Arc<dyn Checker>) -> Self {
        Self { checker: Ok(checker) }
    }

    /// Execute the batch described by `request`.
    pub async fn run(&self, request: &MonitorRequest) -> MonitorResponse {
        let started = Instant::now();
        info!("Starting monitoring run over {} endpoints", request.endpoints.len());

        let results = match &self.checker {
            Ok(checker) => {
                let executor = Arc::new(MonitoringExecutor::new(checker.clone(), request.expected_keys()));
                probe_all(executor, &request.endpoints).await
            }
            Err(reason) => {
                error!("Cannot probe endpoints: {}", reason);
                request
                    .endpoints
                    .iter()
                    .map(|endpoint| EndpointResult::failure(endpoint.clone(), &ProbeError::Request(reason.clone())))
                    .collect()
            }
        };

        let response = aggregate(results, started.elapsed());
        info!(
            "Monitoring run finished: score={:.1} success={} successful={}/{} in {:.3}s",
            response.overall_score,
            response.success,
            response.stats.successful,
            response.stats.total_endpoints,
            response.execution_time
        );
        response
    }
}

/// Spawn one task per endpoint and join them in input order.
async fn probe_all(executor: Arc<MonitoringExecutor>, endpoints: &[String]) -> Vec<EndpointResult> {
    let handles: Vec<_> = endpoints
        .iter()
        .cloned()
        .map(|endpoint| {
            let executor = executor.clone();
            tokio::spawn(async move { executor.execute_check(endpoint).await })
        })
        .collect();

    join_all(handles)
        .await
        .into_iter()
        .zip(endpoints)
        .map(|(joined, endpoint)| {
            joined.unwrap_or_else(|e| {
                error!("Probe task for {} did not complete: {}", endpoint, e);
                EndpointResult::failure(endpoint.clone(), &ProbeError::Aborted(e.to_string()))
            })
        })
        .collect()
}

/// Reduce per-endpoint results into the run response.
pub fn aggregate(results: Vec<EndpointResult>, elapsed: Duration) -> MonitorResponse {
    let stats = RunStats::from_results(&results);
    let overall_score = overall_score(&results);

    MonitorResponse {
        success: overall_score > PASS_THRESHOLD,
        results: EndpointResults { endpoints: results },
        overall_score,
        execution_time: elapsed.as_secs_f64(),
        stats,
    }
}

/// Arithmetic mean of all endpoint scores, 0 for an empty run
pub fn overall_score(results: &[EndpointResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }

    let total: u32 = results.iter().map(|result| u32::from(result.score)).sum();
    f64::from(total) / results.len() as f64
}
