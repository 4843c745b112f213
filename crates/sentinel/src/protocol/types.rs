//! Wire definitions of a monitoring run request.

use serde::{Deserialize, Serialize};

/// Per-probe timeout used when the request does not set one
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

/// One batch of endpoints to probe with a shared policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorRequest {
    /// Endpoint URLs, probed concurrently and reported in this order
    pub endpoints: Vec<String>,

    /// Top-level JSON keys every response body must contain
    #[serde(default)]
    pub expected_format: Option<Vec<String>>,

    /// Per-probe timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Credentials applied to every probe of the run
    #[serde(default)]
    pub auth: Option<AuthConfig>,

    /// Follow 3xx responses instead of reporting them
    #[serde(default = "default_true")]
    pub follow_redirects: bool,

    /// Reject invalid TLS certificates
    #[serde(default = "default_true")]
    pub validate_ssl: bool,
}

impl MonitorRequest {
    /// Request with default policy for the given endpoints.
    pub fn new<I, S>(endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            endpoints: endpoints.into_iter().map(Into::into).collect(),
            expected_format: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            auth: None,
            follow_redirects: true,
            validate_ssl: true,
        }
    }

    pub fn with_expected_format<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_format = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    pub fn with_validate_ssl(mut self, validate: bool) -> Self {
        self.validate_ssl = validate;
        self
    }

    /// Expected keys, treating an empty list the same as none.
    pub fn expected_keys(&self) -> Option<&[String]> {
        self.expected_format.as_deref().filter(|keys| !keys.is_empty())
    }
}

/// Authentication scheme applied to the probes of a run.
///
/// Tagged by `auth_type`; fields that belong to other schemes are ignored and
/// missing credentials default to empty, which resolves to no header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "auth_type", rename_all = "snake_case")]
pub enum AuthConfig {
    None,
    ApiKey {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        api_key_header: Option<String>,
    },
    Bearer {
        #[serde(default)]
        bearer_token: String,
    },
    Basic {
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
    },
    #[serde(rename = "oauth2")]
    OAuth2 {
        #[serde(default)]
        client_id: String,
        #[serde(default)]
        client_secret: String,
    },
}
