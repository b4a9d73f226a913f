/// User input for a new issue. The milestone is given by title and resolved
/// against the repository before anything is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueDraft {
    pub title: String,
    pub body: Option<String>,
    pub assignee: Option<String>,
    pub milestone: Option<String>,
    pub labels: Vec<String>,
}

/// Field changes for an existing issue.
///
/// Outer `None` keeps the current value; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueChanges {
    pub title: Option<String>,
    pub body: Option<Option<String>>,
    pub assignee: Option<Option<String>>,
    pub labels: Option<Vec<String>>,
    /// Milestone title.
    pub milestone: Option<Option<String>>,
}

impl IssueChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
