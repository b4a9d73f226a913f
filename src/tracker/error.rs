use reqwest::StatusCode;
use thiserror::Error;

use crate::infra::github::GitHubError;

/// Errors raised by the in-memory tracker.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error("Repository not found: {key}")]
    RepositoryNotFound { key: String },

    #[error("Issue not found: {key} in {repository}")]
    IssueNotFound { repository: String, key: String },

    #[error("Milestone not found: {title} in {repository}")]
    MilestoneNotFound { repository: String, title: String },

    #[error("No repositories found for this account.")]
    EmptyRepositoryList,
}

impl TrackerError {
    /// Whether the entity is missing, locally or on GitHub (404).
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::GitHub(e) => e.status() == Some(StatusCode::NOT_FOUND),
            Self::RepositoryNotFound { .. }
            | Self::IssueNotFound { .. }
            | Self::MilestoneNotFound { .. } => true,
            Self::EmptyRepositoryList => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
