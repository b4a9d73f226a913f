//! GitHub REST client built on reqwest.
//!
//! Every endpoint helper in this module goes through [`GitHubClient::send`],
//! which attaches the `Accept`, `User-Agent` and basic-auth headers and turns
//! unexpected statuses and empty bodies into [`GitHubError`] values.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Method, StatusCode, header};
use serde::de::DeserializeOwned;

use super::error::{GitHubError, Result, error_message};
use crate::shared::config::GitHubConfig;

/// Characters left untouched in path segments (RFC 3986 unreserved set).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const USER_AGENT: &str = concat!("ghtrack/", env!("CARGO_PKG_VERSION"));

/// Production GitHub client.
///
/// Holds the basic-auth token once [`super::UserClient::login`] has succeeded.
/// Requests sent before that go out unauthenticated.
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    accept: String,
    repos_accept: Option<String>,
    token: Option<String>,
}

/// A single request to the GitHub API.
pub(super) struct ApiRequest {
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
    expected: StatusCode,
    allow_no_content: bool,
    accept: Option<String>,
}

impl ApiRequest {
    pub(super) fn get(path: String) -> Self {
        Self {
            method: Method::GET,
            path,
            body: None,
            expected: StatusCode::OK,
            allow_no_content: false,
            accept: None,
        }
    }

    pub(super) fn post(path: String, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            path,
            body: Some(body),
            expected: StatusCode::CREATED,
            allow_no_content: false,
            accept: None,
        }
    }

    pub(super) fn patch(path: String, body: serde_json::Value) -> Self {
        Self {
            method: Method::PATCH,
            path,
            body: Some(body),
            expected: StatusCode::OK,
            allow_no_content: false,
            accept: None,
        }
    }

    /// Also accept `204 No Content`, returned as an empty body.
    pub(super) fn allow_no_content(mut self) -> Self {
        self.allow_no_content = true;
        self
    }

    /// Override the media type sent in the `Accept` header.
    pub(super) fn accept(mut self, accept: Option<&str>) -> Self {
        self.accept = accept.map(str::to_string);
        self
    }
}

impl GitHubClient {
    /// Create a client from configuration.
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GitHubError::Client(e.to_string()))?;

        let base_url = config.api_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(GitHubError::Client(format!(
                "API URL must start with http:// or https://: {base_url}"
            )));
        }

        Ok(Self {
            http,
            base_url,
            accept: config.accept.clone(),
            repos_accept: config.repos_accept.clone(),
            token: None,
        })
    }

    /// Create a client pointed at a different API root (used against mock servers).
    #[cfg(test)]
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(&GitHubConfig {
            api_url: base_url.to_string(),
            ..GitHubConfig::default()
        })
    }

    /// Encode `username:password` the way HTTP basic authentication expects.
    pub fn basic_auth_token(username: &str, password: &str) -> String {
        STANDARD.encode(format!("{username}:{password}"))
    }

    #[cfg(test)]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(super) fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub(super) fn repos_accept(&self) -> Option<&str> {
        self.repos_accept.as_deref()
    }

    /// Send a request with the cached token and return the raw response body.
    pub(super) async fn send(&self, request: ApiRequest) -> Result<Vec<u8>> {
        self.send_with_token(request, self.token.as_deref()).await
    }

    /// Send a request with an explicit token.
    ///
    /// Fails with `RequestFailed` unless the status is exactly the one the
    /// request expects. The body may be empty; callers that need one go
    /// through [`Self::send_json`].
    pub(super) async fn send_with_token(
        &self,
        request: ApiRequest,
        token: Option<&str>,
    ) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!(method = %request.method, %url, "sending GitHub request");

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(
                header::ACCEPT,
                request.accept.as_deref().unwrap_or(&self.accept),
            );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Basic {token}"));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if status == StatusCode::NO_CONTENT && request.allow_no_content {
            return Ok(Vec::new());
        }
        if status != request.expected {
            tracing::warn!(
                method = %request.method,
                %url,
                status = status.as_u16(),
                "unexpected response status"
            );
            return Err(GitHubError::RequestFailed {
                status,
                message: error_message(&body),
            });
        }

        Ok(body)
    }

    /// Send a request and deserialize the response body.
    pub(super) async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let body = self.send(request).await?;
        parse_body(&body)
    }

    /// Send a request for a JSON array and deserialize each element on its own.
    ///
    /// Elements that fail to deserialize are logged and skipped so one odd
    /// record does not hide the rest of the list.
    pub(super) async fn send_list<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Vec<T>> {
        let body = self.send(request).await?;
        let values: Vec<serde_json::Value> = parse_body(&body)?;
        Ok(parse_each(values))
    }
}

/// Deserialize a response body, treating an empty body as missing.
pub(super) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(GitHubError::ResponseBodyMissing);
    }
    Ok(serde_json::from_slice(body)?)
}

pub(super) fn parse_each<T: DeserializeOwned>(values: Vec<serde_json::Value>) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed record in GitHub response");
                None
            }
        })
        .collect()
}

/// Build `/repos/{owner}/{repo}{suffix}` with percent-encoded segments.
pub(super) fn repo_path(owner: &str, repo: &str, suffix: &str) -> String {
    format!(
        "/repos/{}/{}{}",
        utf8_percent_encode(owner, PATH_SEGMENT),
        utf8_percent_encode(repo, PATH_SEGMENT),
        suffix
    )
}
