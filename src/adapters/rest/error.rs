//! Normalization of upstream HTTP failures into [`ApiError`].

use serde::de::DeserializeOwned;

use crate::ports::ApiError;

/// Turns a transport error into an [`ApiError`].
///
/// Requests that never produced a response get `no_response_message`;
/// anything else (a malformed URL, for instance) keeps reqwest's text.
pub(crate) fn transport_error(err: reqwest::Error, no_response_message: &str) -> ApiError {
    if err.is_timeout() || err.is_connect() || err.is_request() {
        tracing::warn!(error = %err, "Upstream request got no response");
        ApiError::no_response(no_response_message)
    } else {
        ApiError::no_response(err.to_string())
    }
}

/// Decodes a successful JSON body, or normalizes a failure response.
///
/// On a non-2xx status the message comes from the body's `message` field,
/// the code from `code`, and the whole body is kept as `details`.
pub(crate) async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
    no_response_message: &str,
) -> Result<T, ApiError> {
    let status = response.status();

    if status.is_success() {
        return response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                tracing::error!(error = %e, status = status.as_u16(), "Failed to decode upstream response");
                ApiError::from_status(status.as_u16(), format!("Invalid response: {}", e))
                    .with_code("INVALID_RESPONSE")
            } else {
                transport_error(e, no_response_message)
            }
        });
    }

    let text = response.text().await.unwrap_or_default();
    Err(error_from_body(status.as_u16(), &text))
}

pub(crate) fn error_from_body(status: u16, body: &str) -> ApiError {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();

    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status code {}", status));

    let mut err = ApiError::from_status(status, message);
    if let Some(code) = parsed
        .as_ref()
        .and_then(|v| v.get("code"))
        .and_then(|c| c.as_str())
    {
        err = err.with_code(code);
    }
    if let Some(details) = parsed {
        err = err.with_details(details);
    }
    err
}
