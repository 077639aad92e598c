use serde_json::Value;
use shared::error::ErrorBody;
use thiserror::Error;

/// Shown when a failure carries nothing presentable.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("network error calling {url}: {reason}")]
    Network {
        url: String,
        reason: String,
        timed_out: bool,
    },
    #[error("request failed with status {status}")]
    Http {
        status: u16,
        payload: Option<Value>,
    },
    #[error("unexpected response from {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("invalid request: {0}")]
    Validation(String),
}

impl ClientError {
    pub(crate) fn network(url: &str, err: &reqwest::Error) -> Self {
        Self::Network {
            url: url.to_string(),
            reason: err.to_string(),
            timed_out: err.is_timeout(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network { timed_out: true, .. })
    }

    /// Structured message embedded in the backend's error body.
    pub fn payload_message(&self) -> Option<String> {
        match self {
            Self::Http {
                payload: Some(payload),
                ..
            } => ErrorBody::from_payload(payload)?.message(),
            _ => None,
        }
    }

    /// Message for the person who triggered the call: the backend's own message,
    /// else this error's description, else [`FALLBACK_ERROR_MESSAGE`]. Network
    /// failures have no description worth showing; their reason is only logged.
    pub fn user_message(&self) -> String {
        self.payload_message()
            .or_else(|| self.generic_message())
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
    }

    fn generic_message(&self) -> Option<String> {
        match self {
            Self::Network { .. } => None,
            other => Some(other.to_string()),
        }
    }
}
