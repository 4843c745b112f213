//! Resolution of an [`AuthConfig`] into probe request headers.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

use crate::protocol::AuthConfig;

/// Header used for API keys when the request does not name one
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-KEY";

/// Build the headers merged into every probe of a run.
///
/// Incomplete credentials resolve to no header rather than an error, so the
/// probe runs unauthenticated and the endpoint's 401/403 is scored as is.
/// OAuth2 is accepted but performs no token exchange.
pub fn resolve_auth_headers(auth: Option<&AuthConfig>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    match auth {
        None | Some(AuthConfig::None) => {}
        Some(AuthConfig::ApiKey { api_key, api_key_header }) => {
            if !api_key.is_empty() {
                let name = api_key_header
                    .as_deref()
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or(DEFAULT_API_KEY_HEADER);
                insert_header(&mut headers, name, api_key);
            }
        }
        Some(AuthConfig::Bearer { bearer_token }) => {
            if !bearer_token.is_empty() {
                insert_header(&mut headers, AUTHORIZATION.as_str(), &format!("Bearer {bearer_token}"));
            }
        }
        Some(AuthConfig::Basic { username, password }) => {
            if !username.is_empty() && !password.is_empty() {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                insert_header(&mut headers, AUTHORIZATION.as_str(), &format!("Basic {encoded}"));
            }
        }
        Some(AuthConfig::OAuth2 { .. }) => {
            warn!("OAuth2 token exchange is not supported; probing without credentials");
        }
    }

    headers
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) {
    let name = match HeaderName::from_bytes(name.trim().as_bytes()) {
        Ok(name) => name,
        Err(error) => {
            warn!("Skipping auth header with invalid name {name:?}: {error}");
            return;
        }
    };

    match HeaderValue::from_str(value) {
        Ok(mut value) => {
            value.set_sensitive(true);
            headers.insert(name, value);
        }
        Err(error) => warn!("Skipping auth header {name} with invalid value: {error}"),
    }
}
