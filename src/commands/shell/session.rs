use std::fmt;

/// What the user is currently looking at.
///
/// An issue is only ever selected inside a selected repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    repo: Option<String>,
    issue: Option<SelectedIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedIssue {
    pub number: u64,
    pub title: String,
}

impl SelectedIssue {
    /// Key that resolves back to this issue.
    pub fn key(&self) -> String {
        format!("#{}", self.number)
    }
}

impl Selection {
    /// Nothing selected: the repository list.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn repository(repo: impl Into<String>) -> Self {
        Self {
            repo: Some(repo.into()),
            issue: None,
        }
    }

    pub fn issue(repo: impl Into<String>, number: u64, title: impl Into<String>) -> Self {
        Self {
            repo: Some(repo.into()),
            issue: Some(SelectedIssue {
                number,
                title: title.into(),
            }),
        }
    }

    pub fn repo(&self) -> Option<&str> {
        self.repo.as_deref()
    }

    pub fn selected_issue(&self) -> Option<&SelectedIssue> {
        self.issue.as_ref()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.repo, &self.issue) {
            (Some(repo), Some(issue)) => write!(f, "{repo} #{}", issue.number),
            (Some(repo), None) => f.write_str(repo),
            (None, _) => Ok(()),
        }
    }
}
