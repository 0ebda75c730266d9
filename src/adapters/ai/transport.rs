//! HTTP plumbing shared by the hosted-model adapters.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::ports::AIError;

/// Seconds to report when a 429 carries no usable hint.
pub(super) const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Builds the reqwest client every adapter uses.
pub(super) fn build_client(timeout: Duration) -> Result<Client, AIError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AIError::InvalidRequest(format!("failed to build HTTP client: {}", e)))
}

/// Maps a reqwest send/receive failure to an `AIError`.
pub(super) fn transport_error(err: reqwest::Error, timeout: Duration) -> AIError {
    if err.is_timeout() {
        AIError::Timeout {
            timeout_secs: timeout.as_secs() as u32,
        }
    } else if err.is_connect() {
        AIError::network(format!("Connection failed: {}", err))
    } else {
        AIError::network(err.to_string())
    }
}

/// Maps a non-success status and its body to an `AIError`.
///
/// `retry_after` extracts a provider-specific wait hint from the body.
pub(super) fn status_error(
    status: StatusCode,
    body: String,
    retry_after: impl Fn(&str) -> Option<u32>,
) -> AIError {
    match status.as_u16() {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(retry_after(&body).unwrap_or(DEFAULT_RETRY_AFTER_SECS)),
        400..=499 => AIError::InvalidRequest(body),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, body)),
    }
}
