//! Header extraction from probe responses.

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;

pub const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Flatten response headers into a string map.
///
/// Repeated headers are joined with `", "`; non UTF-8 values are decoded
/// lossily.
pub fn extract_response_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat: BTreeMap<String, String> = BTreeMap::new();

    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        flat.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    flat
}

/// Warning describing rate-limit headers, if the response carried any.
pub fn rate_limit_warning(headers: &BTreeMap<String, String>) -> Option<String> {
    let limit = headers.get(RATE_LIMIT_LIMIT);
    let remaining = headers.get(RATE_LIMIT_REMAINING);

    if limit.is_none() && remaining.is_none() {
        return None;
    }

    let unknown = "unknown".to_string();
    Some(format!(
        "Rate limit: {}/{} requests remaining",
        remaining.unwrap_or(&unknown),
        limit.unwrap_or(&unknown)
    ))
}
