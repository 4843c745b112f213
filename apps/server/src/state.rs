use std::time::Instant;

use sentinel::RequestLimits;
use sentinel::report::ReportStore;

use crate::config::Config;

/// Shared, read-only application state
pub struct AppState {
    /// Process start, only used for uptime reporting
    pub started_at: Instant,
    pub limits: RequestLimits,
    pub reports: ReportStore,
    /// Body size limit for monitor requests and report uploads
    pub max_payload_bytes: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            started_at: Instant::now(),
            limits: config.request_limits(),
            reports: ReportStore::new(config.reports.dir.clone()),
            max_payload_bytes: config.reports.max_upload_bytes,
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
