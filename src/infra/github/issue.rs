//! Issue and comment endpoints.

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use super::client::{ApiRequest, GitHubClient, repo_path};
use super::error::Result;
use super::repo::{RemoteLabel, RemoteMilestone};
use super::user::RemoteUser;

/// Issue state as GitHub spells it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for IssueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteIssue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub state: IssueState,
    pub body: Option<String>,
    pub assignee: Option<RemoteUser>,
    pub milestone: Option<RemoteMilestone>,
    #[serde(default)]
    pub labels: Vec<RemoteLabel>,
    /// Present only when the "issue" is actually a pull request.
    pub pull_request: Option<IgnoredAny>,
}

impl RemoteIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteComment {
    pub id: u64,
    pub user: Option<RemoteUser>,
    pub body: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CreateIssue {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
    pub labels: Vec<String>,
}

/// Body of `PATCH /repos/{owner}/{repo}/issues/{number}`.
///
/// Outer `None` leaves a field untouched; `Some(None)` sends `null` and
/// clears it on GitHub.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UpdateIssue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Option<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

#[cfg(test)]
impl UpdateIssue {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Serialize)]
struct CreateComment<'a> {
    body: &'a str,
}

/// Trait for issue operations.
#[async_trait::async_trait]
pub trait IssueClient: Send + Sync {
    /// List a repository's issues, excluding pull requests.
    async fn list_issues(&self, owner: &str, repo: &str) -> Result<Vec<RemoteIssue>>;

    async fn create_issue(&self, owner: &str, repo: &str, issue: &CreateIssue)
    -> Result<RemoteIssue>;

    async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: &UpdateIssue,
    ) -> Result<RemoteIssue>;

    async fn list_comments(&self, owner: &str, repo: &str, number: u64)
    -> Result<Vec<RemoteComment>>;

    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<RemoteComment>;
}

#[async_trait::async_trait]
impl IssueClient for GitHubClient {
    async fn list_issues(&self, owner: &str, repo: &str) -> Result<Vec<RemoteIssue>> {
        let issues: Vec<RemoteIssue> = self
            .send_list(ApiRequest::get(repo_path(owner, repo, "/issues")))
            .await?;
        Ok(issues
            .into_iter()
            .filter(|issue| !issue.is_pull_request())
            .collect())
    }

    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        issue: &CreateIssue,
    ) -> Result<RemoteIssue> {
        let body = serde_json::to_value(issue)?;
        self.send_json(ApiRequest::post(repo_path(owner, repo, "/issues"), body))
            .await
    }

    async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: &UpdateIssue,
    ) -> Result<RemoteIssue> {
        let body = serde_json::to_value(update)?;
        let path = repo_path(owner, repo, &format!("/issues/{number}"));
        self.send_json(ApiRequest::patch(path, body)).await
    }

    async fn list_comments(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<RemoteComment>> {
        let path = repo_path(owner, repo, &format!("/issues/{number}/comments"));
        self.send_list(ApiRequest::get(path)).await
    }

    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<RemoteComment> {
        let path = repo_path(owner, repo, &format!("/issues/{number}/comments"));
        let payload = serde_json::to_value(CreateComment { body })?;
        self.send_json(ApiRequest::post(path, payload)).await
    }
}
