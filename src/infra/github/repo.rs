//! Repository-level endpoints: listing, labels, contributors, milestones.

use serde::Deserialize;

use super::client::{ApiRequest, GitHubClient, parse_body, parse_each, repo_path};
use super::error::Result;
use super::user::RemoteUser;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RemoteRepository {
    pub name: String,
    pub owner: RemoteUser,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RemoteLabel {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RemoteMilestone {
    pub number: u64,
    pub title: String,
}

/// Trait for repository operations.
#[async_trait::async_trait]
pub trait RepoClient: Send + Sync {
    /// List the repositories of the authenticated user.
    async fn list_user_repos(&self) -> Result<Vec<RemoteRepository>>;

    async fn list_labels(&self, owner: &str, repo: &str) -> Result<Vec<RemoteLabel>>;

    /// List contributor logins. Empty repositories have none.
    async fn list_contributors(&self, owner: &str, repo: &str) -> Result<Vec<RemoteUser>>;

    async fn list_milestones(&self, owner: &str, repo: &str) -> Result<Vec<RemoteMilestone>>;
}

#[async_trait::async_trait]
impl RepoClient for GitHubClient {
    async fn list_user_repos(&self) -> Result<Vec<RemoteRepository>> {
        let request = ApiRequest::get("/user/repos".to_string()).accept(self.repos_accept());
        self.send_list(request).await
    }

    async fn list_labels(&self, owner: &str, repo: &str) -> Result<Vec<RemoteLabel>> {
        self.send_list(ApiRequest::get(repo_path(owner, repo, "/labels")))
            .await
    }

    async fn list_contributors(&self, owner: &str, repo: &str) -> Result<Vec<RemoteUser>> {
        // GitHub answers 204 for repositories without commits.
        let request = ApiRequest::get(repo_path(owner, repo, "/contributors")).allow_no_content();
        let body = self.send(request).await?;
        if body.is_empty() {
            return Ok(Vec::new());
        }
        let values: Vec<serde_json::Value> = parse_body(&body)?;
        Ok(parse_each(values))
    }

    async fn list_milestones(&self, owner: &str, repo: &str) -> Result<Vec<RemoteMilestone>> {
        self.send_list(ApiRequest::get(repo_path(owner, repo, "/milestones")))
            .await
    }
}
