//! Lookup keys typed by the user.

use std::fmt;

/// How a repository is named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoKey {
    /// 1-based position in the repository list.
    Position(usize),
    /// `owner/name`, or a bare name when it is unambiguous.
    Name(String),
}

impl RepoKey {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<usize>() {
            Ok(position) if position > 0 => Self::Position(position),
            _ => Self::Name(input.to_string()),
        }
    }
}

impl fmt::Display for RepoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(position) => write!(f, "{position}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// How an issue is named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKey {
    /// GitHub issue number, written `12` or `#12`.
    Number(u64),
    /// Issue title. Titles are not unique; the first match wins.
    Title(String),
}

impl IssueKey {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let digits = input.strip_prefix('#').unwrap_or(input);
        match digits.parse::<u64>() {
            Ok(number) => Self::Number(number),
            Err(_) => Self::Title(input.to_string()),
        }
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "#{number}"),
            Self::Title(title) => write!(f, "\"{title}\""),
        }
    }
}
