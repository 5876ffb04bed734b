//! Shared HTTP error classification for provider clients.

use storycase_error::{ModelError, ModelErrorKind, ModelResult};
use tracing::error;

/// Longest error body kept in error messages.
const MAX_ERROR_BODY: usize = 512;

/// Classify a failure to send a request or read its body.
#[track_caller]
pub(crate) fn transport_error(err: reqwest::Error) -> ModelError {
    if err.is_decode() {
        ModelError::new(ModelErrorKind::Decode(err.to_string()))
    } else if err.is_builder() {
        ModelError::new(ModelErrorKind::Configuration(err.to_string()))
    } else {
        ModelError::new(ModelErrorKind::Connection(err.to_string()))
    }
}

/// Pass through successful responses; turn anything else into an HTTP error
/// carrying the status and a truncated body.
pub(crate) async fn ensure_success(
    provider: &'static str,
    response: reqwest::Response,
) -> ModelResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    error!(provider, status = %status, body = %body, "Provider returned error status");
    Err(ModelError::new(ModelErrorKind::HttpError {
        status_code: status.as_u16(),
        message: truncate(&body),
    }))
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
