//! Response body validation against the caller's expected keys.

use serde_json::Value;

pub const INVALID_JSON_WARNING: &str = "Invalid JSON response";
pub const NOT_AN_OBJECT_WARNING: &str = "Response is not a JSON object";

/// Verdict of the format validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatCheck {
    pub valid: bool,
    pub warning: Option<String>,
}

impl FormatCheck {
    fn valid() -> Self {
        Self { valid: true, warning: None }
    }

    fn invalid(warning: impl Into<String>) -> Self {
        Self { valid: false, warning: Some(warning.into()) }
    }
}

/// Check that `body` is a JSON object holding every key in `expected`.
///
/// Missing keys are reported in the order they were supplied.
pub fn validate_format(body: &[u8], expected: &[String]) -> FormatCheck {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) => return FormatCheck::invalid(INVALID_JSON_WARNING),
    };

    let Some(object) = value.as_object() else {
        return FormatCheck::invalid(NOT_AN_OBJECT_WARNING);
    };

    let missing: Vec<&str> =
        expected.iter().filter(|key| !object.contains_key(key.as_str())).map(String::as_str).collect();

    if missing.is_empty() {
        FormatCheck::valid()
    } else {
        FormatCheck::invalid(format!("Missing expected keys: {}", missing.join(", ")))
    }
}
