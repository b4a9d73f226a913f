use thiserror::Error;

/// Reasons an input line cannot be turned into a command.
/// Raised before anything is sent to GitHub.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{0}")]
    Syntax(SyntaxError),

    #[error("{0}")]
    Context(ContextError),
}

/// The line itself is malformed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Empty command.")]
    Empty,

    #[error("Invalid command. No parameter passed.")]
    MissingParameter,

    #[error("Invalid command. An issue title is required.")]
    MissingTitle,

    #[error("Invalid command. Name the issue to close.")]
    MissingIssue,
}

/// The command is not allowed with the current selection.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    #[error("No repository is selected. Unable to go further up.")]
    BackWithoutRepository,

    #[error("Select command not allowed when issue is selected.")]
    SelectWithIssue,

    #[error("Select a repository before adding an issue.")]
    AddWithoutRepository,

    #[error("Go back to the repository before adding an issue.")]
    AddWithIssue,

    #[error("Select an issue before editing.")]
    EditWithoutIssue,

    #[error("Select a repository before closing an issue.")]
    CloseWithoutRepository,
}

impl From<SyntaxError> for ParseError {
    fn from(e: SyntaxError) -> Self {
        Self::Syntax(e)
    }
}

impl From<ContextError> for ParseError {
    fn from(e: ContextError) -> Self {
        Self::Context(e)
    }
}

/// Interactive input for `add` or `edit` could not be completed.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input ended before all answers were given.")]
    Cancelled,

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}
