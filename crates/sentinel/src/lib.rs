//! Sentinel - concurrent HTTP endpoint reliability monitoring.
//!
//! A run takes a [`MonitorRequest`], probes every endpoint concurrently with a
//! shared auth and transport policy, scores each outcome and aggregates the
//! batch into a [`MonitorResponse`]. The [`report`] module holds the tabular
//! profiling collaborator exposed next to the monitor by the server.

pub mod auth;
pub mod error;
pub mod monitoring;
pub mod protocol;
pub mod report;
pub mod validation;

pub use error::{ProbeError, ReportError, ValidationError};
pub use monitoring::{BatchRunner, EndpointResult, MonitorResponse, RunStats};
pub use protocol::{AuthConfig, MonitorRequest};
pub use validation::{RequestLimits, validate_monitor_request};

/// Version string reported by the health endpoint
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overall score a run must strictly exceed to count as successful
pub const PASS_THRESHOLD: f64 = 70.0;
