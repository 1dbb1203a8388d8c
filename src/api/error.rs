// Upstream error classification
// Shared by the FACEIT and Steam clients

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Failure of a single upstream call
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("resource not found")]
    NotFound,
    #[error("credentials rejected ({0})")]
    Unauthorized(StatusCode),
    #[error("{0} is not set")]
    MissingCredentials(&'static str),
    #[error("rate limit exceeded")]
    RateLimited,
    #[error("upstream returned {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// True for failures caused by missing or invalid API keys
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            UpstreamError::Unauthorized(_) | UpstreamError::MissingCredentials(_)
        )
    }
}

/// Map a non-success HTTP status (and its body) to an error
pub fn classify_status(status: StatusCode, body: &str) -> UpstreamError {
    match status {
        StatusCode::NOT_FOUND => UpstreamError::NotFound,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => UpstreamError::Unauthorized(status),
        StatusCode::TOO_MANY_REQUESTS => UpstreamError::RateLimited,
        _ => UpstreamError::Status {
            status,
            message: extract_error_message(body),
        },
    }
}

/// Best-effort human message from an upstream error body
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    value
        .pointer("/errors/0/message")
        .or_else(|| value.pointer("/error/message"))
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Decode a JSON body, classifying non-success statuses first
pub async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, UpstreamError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        debug!("Upstream error: status={}, body={}", status, body);
        return Err(classify_status(status, &body));
    }

    Ok(response.json::<T>().await?)
}
