//! Request validation applied before any probe leaves the process.
//!
//! Endpoint strings are only checked for emptiness; whether they parse as
//! URLs is left to the probe, which reports a malformed URL as a failed
//! endpoint rather than rejecting the whole run.

use crate::error::ValidationError;
use crate::protocol::MonitorRequest;

/// Upper bounds a single run must respect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    pub max_endpoints: usize,
    pub max_timeout: u64,
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self { max_endpoints: 100, max_timeout: 300 }
    }
}

/// Validate a monitor request against `limits`
pub fn validate_monitor_request(
    request: &MonitorRequest,
    limits: &RequestLimits,
) -> Result<(), ValidationError> {
    validate_endpoints(&request.endpoints, limits.max_endpoints)?;
    validate_timeout(request.timeout, limits.max_timeout)?;
    Ok(())
}

fn validate_endpoints(endpoints: &[String], max: usize) -> Result<(), ValidationError> {
    if endpoints.len() > max {
        return Err(ValidationError::TooManyEndpoints { count: endpoints.len(), max });
    }

    match endpoints.iter().position(|endpoint| endpoint.trim().is_empty()) {
        Some(index) => Err(ValidationError::EmptyEndpoint(index)),
        None => Ok(()),
    }
}

fn validate_timeout(timeout: u64, max: u64) -> Result<(), ValidationError> {
    if timeout == 0 {
        return Err(ValidationError::TimeoutTooShort);
    }

    if timeout > max {
        return Err(ValidationError::TimeoutTooLong { timeout, max });
    }

    Ok(())
}
