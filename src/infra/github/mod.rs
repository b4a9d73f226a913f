//! GitHub REST API client module using reqwest.
//!
//! Provides GitHubClient for GitHub operations,
//! with HTTP basic authentication established by `UserClient::login`.

mod client;
pub(crate) mod error;
mod issue;
#[cfg(test)]
mod mock;
mod repo;
mod user;

pub use client::GitHubClient;
pub use error::GitHubError;
pub use issue::{CreateIssue, IssueClient, IssueState, RemoteComment, RemoteIssue, UpdateIssue};
#[cfg(test)]
pub use mock::GitHubMockServer;
pub use repo::{RemoteMilestone, RemoteRepository, RepoClient};
pub use user::UserClient;
