//! Target URL validation.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Validates that a target URL is an absolute http(s) URL with a host.
///
/// Returns the URL in its parsed, serialized form (which normalizes the
/// host to lowercase and drops default ports).
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the URL does not parse or uses an
/// unsupported scheme.
pub fn validate_target_url(raw: &str) -> Result<String, AppError> {
    let parsed = Url::parse(raw).map_err(|e| {
        AppError::bad_request(
            "URL does not follow a supported schema",
            json!({ "url": raw, "reason": e.to_string() }),
        )
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AppError::bad_request(
            "URL does not follow a supported schema",
            json!({ "url": raw, "scheme": parsed.scheme() }),
        ));
    }

    if parsed.host_str().is_none() {
        return Err(AppError::bad_request(
            "URL must include a host",
            json!({ "url": raw }),
        ));
    }

    Ok(parsed.to_string())
}
