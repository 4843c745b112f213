//! Error types for the monitoring engine and the report collaborator.

use std::error::Error as StdError;

use thiserror::Error;

/// Why a single probe produced no HTTP response.
///
/// These never abort a run; they are folded into a zero-score
/// [`EndpointResult`](crate::EndpointResult).
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("SSL/TLS error: {0}")]
    Tls(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Redirect error: {0}")]
    Redirect(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Probe task aborted: {0}")]
    Aborted(String),
}

impl ProbeError {
    /// Classify a transport error returned by the HTTP client.
    pub fn from_reqwest(error: &reqwest::Error, timeout_secs: u64) -> Self {
        let detail = error_chain(error);

        // The top-level message embeds the URL, so only the sources are inspected.
        let tls = error.source().is_some_and(is_tls_failure);

        if error.is_timeout() {
            Self::Timeout(timeout_secs)
        } else if tls {
            Self::Tls(detail)
        } else if error.is_redirect() {
            Self::Redirect(detail)
        } else if error.is_connect() {
            Self::Connection(detail)
        } else {
            Self::Request(detail)
        }
    }

    pub fn is_tls(&self) -> bool {
        matches!(self, Self::Tls(_))
    }
}

/// Walks the source chain looking for certificate or handshake failures.
pub(crate) fn is_tls_failure(error: &(dyn StdError + 'static)) -> bool {
    const MARKERS: [&str; 5] = ["certificate", "tls", "ssl", "handshake", "unknownissuer"];

    let mut current = Some(error);
    while let Some(err) = current {
        let message = err.to_string().to_lowercase();
        if MARKERS.iter().any(|marker| message.contains(marker)) {
            return true;
        }
        current = err.source();
    }
    false
}

/// Joins an error and all of its sources into one line.
///
/// Sources whose text already appears earlier in the line are skipped.
fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut current = error.source();
    while let Some(err) = current {
        let message = err.to_string();
        if !parts.iter().any(|part| part.contains(&message)) {
            parts.push(message);
        }
        current = err.source();
    }
    parts.join(": ")
}

/// Rejection of a monitor request before any probe is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Too many endpoints: {count} (max: {max})")]
    TooManyEndpoints { count: usize, max: usize },

    #[error("Endpoint at position {0} is empty")]
    EmptyEndpoint(usize),

    #[error("Timeout must be at least 1 second")]
    TimeoutTooShort,

    #[error("Timeout too long: {timeout} seconds (max: {max})")]
    TimeoutTooLong { timeout: u64, max: u64 },
}

/// Failures of the report collaborator.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid data frame: {0}")]
    Schema(String),

    #[error("Report not found: {0}")]
    NotFound(String),

    #[error("Report I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[derive(Debug, Error)]
    #[error("error sending request")]
    struct Wrapper(#[source] io::Error);

    #[test]
    fn test_tls_detection_walks_sources() {
        let inner = io::Error::other("invalid peer certificate: UnknownIssuer");
        let err = Wrapper(inner);
        assert!(is_tls_failure(&err));
    }

    #[test]
    fn test_refused_is_not_tls() {
        let inner = io::Error::new(io::ErrorKind::ConnectionRefused, "Connection refused");
        let err = Wrapper(inner);
        assert!(!is_tls_failure(&err));
    }

    #[test]
    fn test_error_chain_joins_sources() {
        let err = Wrapper(io::Error::other("dns error"));
        assert_eq!(error_chain(&err), "error sending request: dns error");
    }

    #[derive(Debug, Error)]
    #[error("handshake failed: {0}")]
    struct Echoing(#[source] io::Error);

    #[derive(Debug, Error)]
    #[error("error sending request")]
    struct Outer(#[source] Echoing);

    #[test]
    fn test_error_chain_skips_repeated_text() {
        let err = Outer(Echoing(io::Error::other("certificate verify failed")));
        assert_eq!(error_chain(&err), "error sending request: handshake failed: certificate verify failed");
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(ProbeError::Timeout(3).to_string(), "Request timed out after 3 seconds");
    }
}
