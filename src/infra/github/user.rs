//! Authentication against `GET /user`.

use reqwest::StatusCode;
use serde::Deserialize;

use super::client::{ApiRequest, GitHubClient, parse_body};
use super::error::{GitHubError, Result};

/// A GitHub account as it appears in API payloads (`owner`, `user`, `assignee`, ...).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RemoteUser {
    pub login: String,
}

/// Trait for authenticating the session.
#[async_trait::async_trait]
pub trait UserClient: Send + Sync {
    /// Verify the credentials and, on success, use them for all later requests.
    async fn login(&mut self, username: &str, password: &str) -> Result<RemoteUser>;
}

#[async_trait::async_trait]
impl UserClient for GitHubClient {
    async fn login(&mut self, username: &str, password: &str) -> Result<RemoteUser> {
        if username.is_empty() || password.is_empty() {
            return Err(GitHubError::AuthenticationFailed { status: None });
        }

        let token = Self::basic_auth_token(username, password);
        let body = match self
            .send_with_token(ApiRequest::get("/user".to_string()), Some(&token))
            .await
        {
            Ok(body) => body,
            Err(GitHubError::RequestFailed { status, .. })
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                return Err(GitHubError::AuthenticationFailed {
                    status: Some(status),
                });
            }
            Err(e) => return Err(e),
        };

        let user: RemoteUser = parse_body(&body)?;
        self.set_token(token);
        tracing::info!(login = %user.login, "authenticated with GitHub");
        Ok(user)
    }
}
