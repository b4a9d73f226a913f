//! In-memory cache of the user's repositories and issues.
//!
//! Reads are pure; the `ensure_*_loaded` methods perform the one-time fetches
//! and every mutation is sent to GitHub before the cache is touched.

use crate::infra::github::{CreateIssue, IssueClient, IssueState, RepoClient, UpdateIssue, UserClient};

use super::draft::{IssueChanges, IssueDraft};
use super::error::{Result, TrackerError};
use super::key::{IssueKey, RepoKey};
use super::models::{Comment, Issue, Milestone, Repository};

/// Owner of all cached GitHub state for one session.
pub struct Tracker<C> {
    client: C,
    repositories: Vec<Repository>,
}

impl<C> Tracker<C>
where
    C: UserClient + RepoClient + IssueClient,
{
    pub fn new(client: C) -> Self {
        Self {
            client,
            repositories: Vec::new(),
        }
    }

    /// Authenticate and keep the credentials for later requests.
    /// Returns the login GitHub reports for the account.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<String> {
        let user = self.client.login(username, password).await?;
        Ok(user.login)
    }

    /// Drop everything cached and fetch the user's repository list.
    pub async fn initialise(&mut self) -> Result<usize> {
        self.repositories.clear();
        let remote = self.client.list_user_repos().await?;
        self.repositories = remote.into_iter().map(Repository::from).collect();
        tracing::info!(count = self.repositories.len(), "loaded repository list");
        Ok(self.repositories.len())
    }

    /// Full names of all cached repositories, in list order.
    pub fn repository_names(&self) -> Result<Vec<String>> {
        if self.repositories.is_empty() {
            return Err(TrackerError::EmptyRepositoryList);
        }
        Ok(self.repositories.iter().map(Repository::full_name).collect())
    }

    /// Look up a cached repository without loading it.
    pub fn repository(&self, key: &str) -> Result<&Repository> {
        let position = self.position(key)?;
        Ok(&self.repositories[position])
    }

    /// Look up a repository, fetching its issues, labels, contributors and
    /// milestones on first access.
    pub async fn ensure_repository_loaded(&mut self, key: &str) -> Result<&Repository> {
        let position = self.loaded_position(key).await?;
        Ok(&self.repositories[position])
    }

    /// Look up a cached issue without loading anything.
    #[cfg(test)]
    pub fn issue(&self, repo: &str, key: &str) -> Result<&Issue> {
        let repository = self.repository(repo)?;
        let position = issue_position(repository, key)?;
        Ok(&repository.issues()[position])
    }

    /// Look up an issue, loading its repository and then its comments on first access.
    pub async fn ensure_issue_loaded(&mut self, repo: &str, key: &str) -> Result<&Issue> {
        let (repo_position, issue_position) = self.locate_issue(repo, key).await?;
        let repository = &self.repositories[repo_position];
        let issue = &repository.issues()[issue_position];

        if !issue.comments_loaded() {
            let number = issue.number();
            let remote = self
                .client
                .list_comments(repository.owner(), repository.name(), number)
                .await?;
            let comments = remote.into_iter().map(Comment::from).collect();
            self.issue_mut(repo_position, issue_position)?
                .set_comments(comments);
        }

        Ok(&self.repositories[repo_position].issues()[issue_position])
    }

    /// Create an issue on GitHub and append it to the cached repository.
    pub async fn add_issue(&mut self, repo: &str, draft: IssueDraft) -> Result<&Issue> {
        let repo_position = self.loaded_position(repo).await?;
        let repository = &self.repositories[repo_position];

        let milestone = match &draft.milestone {
            Some(title) => Some(milestone_number(repository, title)?),
            None => None,
        };
        let request = CreateIssue {
            title: draft.title,
            body: draft.body,
            assignee: draft.assignee,
            milestone,
            labels: draft.labels,
        };

        let remote = self
            .client
            .create_issue(repository.owner(), repository.name(), &request)
            .await?;
        let full_name = repository.full_name();
        let mut issue = Issue::from_remote(remote, &full_name);
        // A new issue has no comments yet.
        issue.set_comments(Vec::new());
        tracing::info!(repository = %full_name, number = issue.number(), "created issue");

        let repository = &mut self.repositories[repo_position];
        if let Some(assignee) = issue.assignee() {
            repository.add_contributor(assignee);
        }
        let issue_position = repository.push_issue(issue);
        Ok(&repository.issues()[issue_position])
    }

    /// Send only the changed fields of an issue and replace the cached copy.
    pub async fn edit_issue(
        &mut self,
        repo: &str,
        key: &str,
        changes: IssueChanges,
    ) -> Result<&Issue> {
        let (repo_position, issue_position) = self.locate_issue(repo, key).await?;

        if changes.is_empty() {
            tracing::debug!(repository = repo, issue = key, "no changes to send");
            return Ok(&self.repositories[repo_position].issues()[issue_position]);
        }

        let repository = &self.repositories[repo_position];
        let number = repository.issues()[issue_position].number();
        let milestone = match &changes.milestone {
            Some(Some(title)) => Some(Some(milestone_number(repository, title)?)),
            Some(None) => Some(None),
            None => None,
        };
        let update = UpdateIssue {
            title: changes.title,
            body: changes.body,
            state: None,
            assignee: changes.assignee,
            milestone,
            labels: changes.labels,
        };

        let remote = self
            .client
            .update_issue(repository.owner(), repository.name(), number, &update)
            .await?;
        let issue = Issue::from_remote(remote, &repository.full_name());
        tracing::info!(repository = %issue.repository(), number, "edited issue");

        let repository = &mut self.repositories[repo_position];
        if let Some(assignee) = issue.assignee() {
            repository.add_contributor(assignee);
        }
        repository
            .replace_issue(issue_position, issue)
            .ok_or_else(|| issue_not_found(repository, key))?;
        Ok(&repository.issues()[issue_position])
    }

    /// Close an issue by writing back its full representation with the
    /// state set to closed.
    pub async fn close_issue(&mut self, repo: &str, key: &str) -> Result<&Issue> {
        let (repo_position, issue_position) = self.locate_issue(repo, key).await?;
        let repository = &self.repositories[repo_position];

        let mut closed = repository.issues()[issue_position].clone();
        closed.set_state(IssueState::Closed);
        self.client
            .update_issue(
                repository.owner(),
                repository.name(),
                closed.number(),
                &closed.to_update(),
            )
            .await?;
        tracing::info!(repository = %closed.repository(), number = closed.number(), "closed issue");

        let issue = self.issue_mut(repo_position, issue_position)?;
        issue.set_state(IssueState::Closed);
        Ok(issue)
    }

    /// Post a comment and append it to the cached issue.
    pub async fn add_comment(&mut self, repo: &str, key: &str, body: &str) -> Result<&Issue> {
        let (repo_position, issue_position) = self.locate_issue(repo, key).await?;
        let repository = &self.repositories[repo_position];
        let number = repository.issues()[issue_position].number();

        let remote = self
            .client
            .create_comment(repository.owner(), repository.name(), number, body)
            .await?;
        tracing::info!(repository = %repository.full_name(), number, comment = remote.id, "added comment");

        let issue = self.issue_mut(repo_position, issue_position)?;
        issue.push_comment(Comment::from(remote));
        Ok(issue)
    }

    /// Resolve a repository key to a position in the list.
    ///
    /// A number is a 1-based position when in range; anything else is
    /// matched as `owner/name` or as a bare name that must be unique.
    fn position(&self, key: &str) -> Result<usize> {
        if let RepoKey::Position(position) = RepoKey::parse(key)
            && position <= self.repositories.len()
        {
            return Ok(position - 1);
        }

        let name = key.trim();
        let mut matches = self
            .repositories
            .iter()
            .enumerate()
            .filter(|(_, r)| r.matches_name(name))
            .map(|(position, _)| position);
        match (matches.next(), matches.next()) {
            (Some(position), None) => Ok(position),
            (Some(_), Some(_)) => {
                tracing::warn!(key = name, "repository name is ambiguous; use owner/name");
                Err(repository_not_found(key))
            }
            _ => Err(repository_not_found(key)),
        }
    }

    async fn loaded_position(&mut self, key: &str) -> Result<usize> {
        let position = self.position(key)?;
        if !self.repositories[position].is_loaded() {
            self.refresh_at(position).await?;
        }
        Ok(position)
    }

    /// Fetch the four repository listings concurrently and attach them only
    /// once all of them succeeded.
    async fn refresh_at(&mut self, position: usize) -> Result<()> {
        let repository = &self.repositories[position];
        let (owner, name) = (repository.owner(), repository.name());
        let full_name = repository.full_name();

        let (issues, labels, contributors, milestones) = tokio::try_join!(
            self.client.list_issues(owner, name),
            self.client.list_labels(owner, name),
            self.client.list_contributors(owner, name),
            self.client.list_milestones(owner, name),
        )?;
        tracing::debug!(
            repository = %full_name,
            issues = issues.len(),
            labels = labels.len(),
            contributors = contributors.len(),
            milestones = milestones.len(),
            "refreshed repository"
        );

        let issues = issues
            .into_iter()
            .map(|remote| Issue::from_remote(remote, &full_name))
            .collect();
        self.repositories[position].attach(
            issues,
            labels.into_iter().map(|l| l.name).collect(),
            contributors.into_iter().map(|u| u.login).collect(),
            milestones.into_iter().map(Milestone::from).collect(),
        );
        Ok(())
    }

    async fn locate_issue(&mut self, repo: &str, key: &str) -> Result<(usize, usize)> {
        let repo_position = self.loaded_position(repo).await?;
        let issue_position = issue_position(&self.repositories[repo_position], key)?;
        Ok((repo_position, issue_position))
    }

    fn issue_mut(&mut self, repo_position: usize, issue_position: usize) -> Result<&mut Issue> {
        let repository = &mut self.repositories[repo_position];
        let full_name = repository.full_name();
        repository
            .issue_at_mut(issue_position)
            .ok_or(TrackerError::IssueNotFound {
                repository: full_name,
                key: format!("at position {}", issue_position + 1),
            })
    }
}

/// Resolve `key`, falling back to a title match when a number misses so
/// issues titled like "2024" stay reachable.
fn issue_position(repository: &Repository, key: &str) -> Result<usize> {
    let parsed = IssueKey::parse(key);
    repository
        .issue_position(&parsed)
        .or_else(|| match parsed {
            IssueKey::Number(_) => {
                repository.issue_position(&IssueKey::Title(key.trim().to_string()))
            }
            IssueKey::Title(_) => None,
        })
        .ok_or_else(|| issue_not_found(repository, key))
}

fn milestone_number(repository: &Repository, title: &str) -> Result<u64> {
    repository
        .milestone_by_title(title)
        .map(|m| m.number)
        .ok_or_else(|| TrackerError::MilestoneNotFound {
            repository: repository.full_name(),
            title: title.to_string(),
        })
}

fn repository_not_found(key: &str) -> TrackerError {
    TrackerError::RepositoryNotFound {
        key: key.trim().to_string(),
    }
}

fn issue_not_found(repository: &Repository, key: &str) -> TrackerError {
    TrackerError::IssueNotFound {
        repository: repository.full_name(),
        key: IssueKey::parse(key).to_string(),
    }
}
