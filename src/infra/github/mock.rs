//! wiremock-based GitHub mock server for testing.
//!
//! Provides `GitHubMockServer` for HTTP-level mocking of the REST endpoints
//! the tracker talks to.
//!
//! # Usage
//!
//! ```ignore
//! let mock = GitHubMockServer::start().await;
//! mock.current_user("testuser", "secret").await;
//! mock.user_repos(&[("owner", "repo")]).await;
//!
//! let ctx = mock.repo("owner", "repo");
//! ctx.issues(&[(1, "First"), (2, "Second")]).await;
//! ctx.labels(&["bug"]).await;
//! ctx.issue(1).comments(&[(10, "octocat", "Hi")]).await;
//! ctx.issue(1).title("Renamed").update().await;
//! ctx.issue(3).title("New").create().await;
//! ctx.issue(1).create_comment("testuser", "Thanks").await;
//! ```

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use super::client::GitHubClient;
use crate::shared::config::GitHubConfig;

/// Create a mock user JSON object.
fn mock_user(login: &str) -> serde_json::Value {
    json!({
        "login": login,
        "id": 1,
        "type": "User",
        "site_admin": false
    })
}

fn mock_repository(owner: &str, name: &str) -> serde_json::Value {
    json!({
        "id": 1,
        "name": name,
        "full_name": format!("{owner}/{name}"),
        "private": false,
        "owner": mock_user(owner)
    })
}

fn mock_label(name: &str) -> serde_json::Value {
    json!({
        "id": 1,
        "name": name,
        "color": "d73a4a",
        "default": false
    })
}

fn mock_milestone(number: u64, title: &str) -> serde_json::Value {
    json!({
        "id": number,
        "number": number,
        "title": title,
        "state": "open"
    })
}

fn mock_comment(id: u64, author: &str, body: &str) -> serde_json::Value {
    json!({
        "id": id,
        "body": body,
        "user": mock_user(author),
        "created_at": "2024-01-02T00:00:00Z"
    })
}

/// Create a mock issue JSON object.
#[expect(clippy::too_many_arguments, reason = "mirrors the fields of a GitHub issue")]
fn mock_issue(
    owner: &str,
    repo: &str,
    number: u64,
    title: &str,
    body: Option<&str>,
    state: &str,
    assignee: Option<&str>,
    milestone: Option<(u64, &str)>,
    labels: &[&str],
) -> serde_json::Value {
    json!({
        "id": number,
        "url": format!("https://api.github.com/repos/{owner}/{repo}/issues/{number}"),
        "number": number,
        "title": title,
        "body": body,
        "state": state,
        "user": mock_user("testuser"),
        "assignee": assignee.map(mock_user),
        "milestone": milestone.map(|(n, t)| mock_milestone(n, t)),
        "labels": labels.iter().map(|l| mock_label(l)).collect::<Vec<_>>(),
        "comments": 0,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

/// wiremock-based GitHub mock server for testing.
pub struct GitHubMockServer {
    server: MockServer,
}

impl GitHubMockServer {
    /// Start a new mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get an unauthenticated GitHubClient configured to use this mock server.
    pub fn client(&self) -> GitHubClient {
        GitHubClient::with_base_url(&self.server.uri()).unwrap()
    }

    /// Get an unauthenticated client for this server built from `config`.
    pub fn client_with(&self, config: GitHubConfig) -> GitHubClient {
        GitHubClient::new(&GitHubConfig {
            api_url: self.server.uri(),
            ..config
        })
        .unwrap()
    }

    /// Answer `GET endpoint` with `[]`, but only when every header matches.
    /// Requests with other headers fall through to a 404.
    pub async fn list_requiring_headers(&self, endpoint: &str, headers: &[(&str, &str)]) {
        let mut mock = Mock::given(method("GET")).and(path(endpoint));
        for (name, value) in headers {
            mock = mock.and(header(*name, *value));
        }
        mock.respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Create a repository context for building mocks.
    pub fn repo<'a>(&'a self, owner: &'a str, repo: &'a str) -> MockRepoContext<'a> {
        MockRepoContext {
            server: &self.server,
            owner,
            repo,
        }
    }

    /// Mock GET /user: 200 for the given credentials, 401 for anything else.
    pub async fn current_user(&self, login: &str, password: &str) {
        let token = GitHubClient::basic_auth_token(login, password);
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("authorization", format!("Basic {token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_user(login)))
            .with_priority(1)
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .with_priority(2)
            .mount(&self.server)
            .await;
    }

    /// Mock GET /user/repos with the given `(owner, name)` pairs.
    pub async fn user_repos(&self, repos: &[(&str, &str)]) {
        let body: Vec<_> = repos
            .iter()
            .map(|(owner, name)| mock_repository(owner, name))
            .collect();
        self.user_repos_raw(json!(body)).await;
    }

    /// Mock GET /user/repos with an arbitrary JSON body.
    pub async fn user_repos_raw(&self, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Respond to `verb path` with an error status and a GitHub-style error body.
    pub async fn fail(&self, verb: &str, endpoint: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "message": "Mocked failure",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Respond to `verb path` with the given status and no body.
    pub async fn empty_body(&self, verb: &str, endpoint: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// All requests the server has seen, oldest first.
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// JSON bodies of the requests matching `verb path`.
    pub async fn request_bodies(&self, verb: &str, endpoint: &str) -> Vec<serde_json::Value> {
        self.received_requests()
            .await
            .into_iter()
            .filter(|r| r.method.as_str() == verb && r.url.path() == endpoint)
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }
}

// ============ Builder Pattern API ============

/// Repository context for building mocks.
pub struct MockRepoContext<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
}

impl<'a> MockRepoContext<'a> {
    fn endpoint(&self, suffix: &str) -> String {
        format!("/repos/{}/{}{}", self.owner, self.repo, suffix)
    }

    async fn mount_get(&self, suffix: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(self.endpoint(suffix)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(self.server)
            .await;
    }

    /// Create an issue mock builder.
    pub fn issue(&self, number: u64) -> MockIssueBuilder<'_> {
        MockIssueBuilder {
            ctx: self,
            number,
            title: "Test Issue",
            body: Some("Test body"),
            state: "open",
            assignee: None,
            milestone: None,
            labels: vec![],
        }
    }

    /// Mock GET /repos/{owner}/{repo}/issues with open issues `(number, title)`.
    pub async fn issues(&self, issues: &[(u64, &str)]) {
        let body: Vec<_> = issues
            .iter()
            .map(|(number, title)| {
                mock_issue(
                    self.owner,
                    self.repo,
                    *number,
                    title,
                    Some("Test body"),
                    "open",
                    None,
                    None,
                    &[],
                )
            })
            .collect();
        self.issues_raw(json!(body)).await;
    }

    pub async fn issues_raw(&self, body: serde_json::Value) {
        self.mount_get("/issues", body).await;
    }

    pub async fn labels(&self, labels: &[&str]) {
        let body: Vec<_> = labels.iter().map(|l| mock_label(l)).collect();
        self.mount_get("/labels", json!(body)).await;
    }

    pub async fn contributors(&self, logins: &[&str]) {
        let body: Vec<_> = logins.iter().map(|l| mock_user(l)).collect();
        self.mount_get("/contributors", json!(body)).await;
    }

    pub async fn milestones(&self, milestones: &[(u64, &str)]) {
        let body: Vec<_> = milestones
            .iter()
            .map(|(number, title)| mock_milestone(*number, title))
            .collect();
        self.mount_get("/milestones", json!(body)).await;
    }

    /// Mock every endpoint a repository refresh touches.
    pub async fn loaded(
        &self,
        issues: &[(u64, &str)],
        labels: &[&str],
        contributors: &[&str],
        milestones: &[(u64, &str)],
    ) {
        self.issues(issues).await;
        self.labels(labels).await;
        self.contributors(contributors).await;
        self.milestones(milestones).await;
    }
}

/// Builder for issue-scoped endpoints.
pub struct MockIssueBuilder<'a> {
    ctx: &'a MockRepoContext<'a>,
    number: u64,
    title: &'a str,
    body: Option<&'a str>,
    state: &'a str,
    assignee: Option<&'a str>,
    milestone: Option<(u64, &'a str)>,
    labels: Vec<&'a str>,
}

impl<'a> MockIssueBuilder<'a> {
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn body(mut self, body: Option<&'a str>) -> Self {
        self.body = body;
        self
    }

    pub fn state(mut self, state: &'a str) -> Self {
        self.state = state;
        self
    }

    pub fn assignee(mut self, assignee: &'a str) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn milestone(mut self, number: u64, title: &'a str) -> Self {
        self.milestone = Some((number, title));
        self
    }

    pub fn labels(mut self, labels: Vec<&'a str>) -> Self {
        self.labels = labels;
        self
    }

    fn json(&self) -> serde_json::Value {
        mock_issue(
            self.ctx.owner,
            self.ctx.repo,
            self.number,
            self.title,
            self.body,
            self.state,
            self.assignee,
            self.milestone,
            &self.labels,
        )
    }

    fn endpoint(&self, suffix: &str) -> String {
        self.ctx
            .endpoint(&format!("/issues/{}{}", self.number, suffix))
    }

    /// Mount mock for POST /repos/{owner}/{repo}/issues returning this issue.
    pub async fn create(self) {
        Mock::given(method("POST"))
            .and(path(self.ctx.endpoint("/issues")))
            .respond_with(ResponseTemplate::new(201).set_body_json(self.json()))
            .mount(self.ctx.server)
            .await;
    }

    /// Mount mock for PATCH /repos/{owner}/{repo}/issues/{number} returning this issue.
    pub async fn update(self) {
        Mock::given(method("PATCH"))
            .and(path(self.endpoint("")))
            .respond_with(ResponseTemplate::new(200).set_body_json(self.json()))
            .mount(self.ctx.server)
            .await;
    }

    /// Mount mock for GET /repos/{owner}/{repo}/issues/{number}/comments.
    pub async fn comments(self, comments: &[(u64, &str, &str)]) {
        let body: Vec<_> = comments
            .iter()
            .map(|(id, author, text)| mock_comment(*id, author, text))
            .collect();
        Mock::given(method("GET"))
            .and(path(self.endpoint("/comments")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(body)))
            .mount(self.ctx.server)
            .await;
    }

    /// Mount mock for POST /repos/{owner}/{repo}/issues/{number}/comments.
    pub async fn create_comment(self, author: &str, body: &str) {
        Mock::given(method("POST"))
            .and(path(self.endpoint("/comments")))
            .respond_with(ResponseTemplate::new(201).set_body_json(mock_comment(99999, author, body)))
            .mount(self.ctx.server)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::github::{IssueClient, RepoClient};

    #[tokio::test]
    async fn mock_server_serves_repository_endpoints() {
        let mock = GitHubMockServer::start().await;
        mock.repo("owner", "repo")
            .loaded(&[(1, "First")], &["bug"], &["octocat"], &[(1, "v1")])
            .await;

        let client = mock.client();
        let issues = client.list_issues("owner", "repo").await.unwrap();
        let contributors = client.list_contributors("owner", "repo").await.unwrap();

        assert_eq!(issues[0].title, "First");
        assert_eq!(contributors[0].login, "octocat");
    }

    #[tokio::test]
    async fn mock_server_records_request_bodies() {
        let mock = GitHubMockServer::start().await;
        mock.repo("owner", "repo").issue(1).create_comment("me", "hi").await;

        mock.client()
            .create_comment("owner", "repo", 1, "hi")
            .await
            .unwrap();

        let bodies = mock
            .request_bodies("POST", "/repos/owner/repo/issues/1/comments")
            .await;
        assert_eq!(bodies, vec![json!({"body": "hi"})]);
    }
}
