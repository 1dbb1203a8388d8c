// Lookup error taxonomy
// What the presentation layer branches on, independent of transport

use serde::Serialize;
use thiserror::Error;

use crate::api::UpstreamError;

const GENERIC_UPSTREAM_MESSAGE: &str = "Failed to fetch statistics";

/// Machine-readable error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidInput,
    PlayerNotFound,
    UpstreamAuth,
    UpstreamRateLimit,
    UpstreamError,
}

/// Which stage failed to find the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundStage {
    PlatformId,
    Nickname,
    Generic,
}

impl NotFoundStage {
    pub fn message(&self) -> &'static str {
        match self {
            NotFoundStage::PlatformId => "No FACEIT player is linked to this Steam ID",
            NotFoundStage::Nickname => "No FACEIT player with this nickname",
            NotFoundStage::Generic => "Player not found",
        }
    }
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{}", .0.message())]
    NotFound(NotFoundStage),
    #[error("API authorization error: {0}")]
    UpstreamAuth(String),
    #[error("API rate limit exceeded. Please try again later.")]
    UpstreamRateLimit,
    #[error("{}", .0.as_deref().unwrap_or(GENERIC_UPSTREAM_MESSAGE))]
    Upstream(Option<String>),
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::InvalidInput(_) => ErrorKind::InvalidInput,
            LookupError::NotFound(_) => ErrorKind::PlayerNotFound,
            LookupError::UpstreamAuth(_) => ErrorKind::UpstreamAuth,
            LookupError::UpstreamRateLimit => ErrorKind::UpstreamRateLimit,
            LookupError::Upstream(_) => ErrorKind::UpstreamError,
        }
    }
}

impl From<UpstreamError> for LookupError {
    fn from(error: UpstreamError) -> Self {
        match error {
            UpstreamError::NotFound => LookupError::NotFound(NotFoundStage::Generic),
            UpstreamError::Unauthorized(status) => {
                LookupError::UpstreamAuth(format!("credentials rejected ({})", status))
            }
            UpstreamError::MissingCredentials(var) => {
                LookupError::UpstreamAuth(format!("{} is not set", var))
            }
            UpstreamError::RateLimited => LookupError::UpstreamRateLimit,
            UpstreamError::Status { message, .. } => LookupError::Upstream(message),
            UpstreamError::Transport(_) | UpstreamError::Decode(_) => LookupError::Upstream(None),
        }
    }
}

/// Error payload handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResult {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<LookupError> for ErrorResult {
    fn from(error: LookupError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}
