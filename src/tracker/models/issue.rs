use crate::infra::github::{IssueState, RemoteIssue, RemoteMilestone, UpdateIssue};

use super::comment::Comment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub number: u64,
    pub title: String,
}

impl From<RemoteMilestone> for Milestone {
    fn from(remote: RemoteMilestone) -> Self {
        Self {
            number: remote.number,
            title: remote.title,
        }
    }
}

/// A cached GitHub issue.
///
/// `applicable_labels` mirrors the label set of the owning repository and is
/// only written by [`super::Repository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    number: u64,
    title: String,
    state: IssueState,
    body: Option<String>,
    assignee: Option<String>,
    milestone: Option<Milestone>,
    labels: Vec<String>,
    applicable_labels: Vec<String>,
    comments: Vec<Comment>,
    comments_loaded: bool,
    repository: String,
}

impl Issue {
    /// Build an issue of `repository` (an `owner/name` full name) from an API payload.
    pub fn from_remote(remote: RemoteIssue, repository: &str) -> Self {
        Self {
            number: remote.number,
            title: remote.title,
            state: remote.state,
            body: remote.body.filter(|b| !b.is_empty()),
            assignee: remote.assignee.map(|u| u.login),
            milestone: remote.milestone.map(Milestone::from),
            labels: remote.labels.into_iter().map(|l| l.name).collect(),
            applicable_labels: Vec::new(),
            comments: Vec::new(),
            comments_loaded: false,
            repository: repository.to_string(),
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> IssueState {
        self.state
    }

    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    pub fn milestone(&self) -> Option<&Milestone> {
        self.milestone.as_ref()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn applicable_labels(&self) -> &[String] {
        &self.applicable_labels
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comments_loaded(&self) -> bool {
        self.comments_loaded
    }

    /// Full name of the owning repository.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub(crate) fn set_state(&mut self, state: IssueState) {
        self.state = state;
    }

    pub(crate) fn set_comments(&mut self, comments: Vec<Comment>) {
        self.comments = comments;
        self.comments_loaded = true;
    }

    pub(crate) fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub(super) fn set_applicable_labels(&mut self, labels: &[String]) {
        self.applicable_labels = labels.to_vec();
    }

    /// Carry comments over from the cached version of this issue.
    pub(super) fn inherit_comments(&mut self, previous: Issue) {
        self.comments = previous.comments;
        self.comments_loaded = previous.comments_loaded;
    }

    /// The complete editable representation, as sent when the whole issue is
    /// written back.
    pub fn to_update(&self) -> UpdateIssue {
        UpdateIssue {
            title: Some(self.title.clone()),
            body: Some(self.body.clone()),
            state: Some(self.state),
            assignee: Some(self.assignee.clone()),
            milestone: Some(self.milestone.as_ref().map(|m| m.number)),
            labels: Some(self.labels.clone()),
        }
    }
}
