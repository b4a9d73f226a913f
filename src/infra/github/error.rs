//! GitHub API error types.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    /// `status` is `None` when the credentials were rejected before any request.
    #[error("Login failed. Either the username and/or password is incorrect{}", format_status(.status))]
    AuthenticationFailed { status: Option<StatusCode> },

    #[error("{}", format_request_failed(.status, .message))]
    RequestFailed {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Message missing in response. Unable to update local data.")]
    ResponseBodyMissing,

    #[error("Failed to parse GitHub response: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Error sending request: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("Failed to build GitHub client: {0}")]
    Client(String),
}

impl GitHubError {
    /// Status code returned by GitHub, when the request reached it.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::AuthenticationFailed { status } => *status,
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GitHubError>;

fn format_status(status: &Option<StatusCode>) -> String {
    status
        .map(|s| format!(" (HTTP {})", s.as_u16()))
        .unwrap_or_default()
}

/// Format a non-success response, including GitHub's `message` field when present.
fn format_request_failed(status: &StatusCode, message: &Option<String>) -> String {
    match message.as_deref().filter(|m| !m.is_empty()) {
        Some(m) => format!("Request failed: {m} (HTTP {})", status.as_u16()),
        None => format!("Request failed (HTTP {})", status.as_u16()),
    }
}

/// Extract the `message` field from a GitHub error body, if any.
pub(super) fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
