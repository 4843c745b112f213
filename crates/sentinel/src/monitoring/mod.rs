//! Monitoring engine - probes endpoints and scores the outcomes
//!
//! This module is responsible for:
//! - Issuing HTTP probes with the run's auth and transport policy
//! - Validating response bodies against expected keys
//! - Scoring each endpoint
//! - Aggregating a batch into run statistics
pub mod batch;
pub mod checker;
pub mod executor;
pub mod extract;
pub mod format;
pub mod scoring;
pub mod types;

pub use batch::BatchRunner;
pub use checker::{Checker, HttpChecker, ProbeOutcome};
pub use executor::MonitoringExecutor;
pub use scoring::calculate_score;
pub use types::{EndpointResult, EndpointResults, MonitorResponse, RunStats};
