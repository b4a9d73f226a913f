use std::collections::HashMap;

use crate::infra::github::RemoteRepository;

use super::issue::{Issue, Milestone};
use crate::tracker::key::IssueKey;

/// A cached GitHub repository and, once loaded, its issues.
///
/// Every issue's applicable labels equal the repository's label set; the
/// mutators below keep that true, which is why the fields are private.
#[derive(Debug, Clone)]
pub struct Repository {
    name: String,
    owner: String,
    issues: Vec<Issue>,
    /// Issue number -> position in `issues`.
    index: HashMap<u64, usize>,
    contributors: Vec<String>,
    labels: Vec<String>,
    milestones: Vec<Milestone>,
    loaded: bool,
}

impl From<RemoteRepository> for Repository {
    fn from(remote: RemoteRepository) -> Self {
        Self::new(remote.owner.login, remote.name)
    }
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            issues: Vec::new(),
            index: HashMap::new(),
            contributors: Vec::new(),
            labels: Vec::new(),
            milestones: Vec::new(),
            loaded: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[cfg(test)]
    pub fn contributors(&self) -> &[String] {
        &self.contributors
    }

    #[cfg(test)]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[cfg(test)]
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether `key` names this repository, either as `owner/name` or by bare name.
    pub fn matches_name(&self, key: &str) -> bool {
        self.name == key || self.full_name() == key
    }

    pub fn milestone_by_title(&self, title: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.title == title)
    }

    /// Position of the issue named by `key`.
    ///
    /// Titles are a fallback key: when several issues share one, the first in
    /// list order wins.
    pub fn issue_position(&self, key: &IssueKey) -> Option<usize> {
        match key {
            IssueKey::Number(number) => self.index.get(number).copied(),
            IssueKey::Title(title) => {
                let mut matches = self
                    .issues
                    .iter()
                    .enumerate()
                    .filter(|(_, issue)| issue.title() == title);
                let (position, _) = matches.next()?;
                let others = matches.count();
                if others > 0 {
                    tracing::warn!(
                        repository = %self.full_name(),
                        %title,
                        duplicates = others,
                        "several issues share this title; using the first"
                    );
                }
                Some(position)
            }
        }
    }

    pub(crate) fn issue_at_mut(&mut self, position: usize) -> Option<&mut Issue> {
        self.issues.get_mut(position)
    }

    /// Add a label and propagate it to every cached issue. Returns false when
    /// the label was already known.
    pub fn add_label(&mut self, label: &str) -> bool {
        if self.labels.iter().any(|l| l == label) {
            return false;
        }
        self.labels.push(label.to_string());
        for issue in &mut self.issues {
            issue.set_applicable_labels(&self.labels);
        }
        true
    }

    /// Add a contributor login unless it is already known.
    pub fn add_contributor(&mut self, login: &str) {
        if !self.contributors.iter().any(|c| c == login) {
            self.contributors.push(login.to_string());
        }
    }

    /// Append an issue and return its position.
    pub fn push_issue(&mut self, mut issue: Issue) -> usize {
        self.absorb_labels(&issue);
        issue.set_applicable_labels(&self.labels);
        let position = self.issues.len();
        self.index.insert(issue.number(), position);
        self.issues.push(issue);
        position
    }

    /// Replace the issue at `position`, keeping its loaded comments.
    pub fn replace_issue(&mut self, position: usize, mut issue: Issue) -> Option<usize> {
        self.absorb_labels(&issue);
        issue.set_applicable_labels(&self.labels);
        let slot = self.issues.get_mut(position)?;
        let previous = std::mem::replace(slot, issue);
        self.index.remove(&previous.number());
        self.issues[position].inherit_comments(previous);
        self.index.insert(self.issues[position].number(), position);
        Some(position)
    }

    /// Replace all fetched data and mark the repository loaded.
    pub fn attach(
        &mut self,
        issues: Vec<Issue>,
        labels: Vec<String>,
        contributors: Vec<String>,
        milestones: Vec<Milestone>,
    ) {
        self.issues.clear();
        self.index.clear();
        self.labels.clear();
        self.contributors.clear();
        for label in &labels {
            self.add_label(label);
        }
        for login in &contributors {
            self.add_contributor(login);
        }
        self.milestones = milestones;
        for issue in issues {
            self.push_issue(issue);
        }
        self.loaded = true;
    }

    /// Labels on `issue` that the repository does not know yet are added to it.
    fn absorb_labels(&mut self, issue: &Issue) {
        for label in issue.labels() {
            if self.add_label(label) {
                tracing::debug!(repository = %self.full_name(), %label, "repository gained label");
            }
        }
    }
}
