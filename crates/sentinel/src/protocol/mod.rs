//! Inbound request types for the monitor API.

pub mod types;

pub use types::{AuthConfig, MonitorRequest, DEFAULT_TIMEOUT_SECS};
