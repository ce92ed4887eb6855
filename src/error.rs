use reqwest::StatusCode;
use thiserror::Error;

/// Reason recorded when a failure carries no message of its own.
pub const DEFAULT_FAILURE_REASON: &str = "An unexpected error occurred";

/// Everything that can go wrong while fetching one page of results.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error fetching data (HTTP {0})")]
    Status(StatusCode),

    #[error("Request timed out")]
    Timeout,

    #[error("Error fetching data: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Malformed response body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Invalid search endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Human-readable reason shown in place of results.
    pub fn reason(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            DEFAULT_FAILURE_REASON.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Decode(err)
        } else if let Some(status) = err.status() {
            FetchError::Status(status)
        } else {
            FetchError::Transport(err)
        }
    }
}
