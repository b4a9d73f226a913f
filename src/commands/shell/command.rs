//! Executable session commands.
//!
//! A command either succeeds and yields the new [`Selection`], or prints why
//! it failed and hands over to a fallback command that restores a context the
//! user can continue from. Fallbacks always lead back to `List`, which has none.

use std::fmt::Display;
use std::io::Write;

use super::input::{read_changes, read_draft};
use super::session::Selection;
use super::view;
use crate::infra::github::{IssueClient, RepoClient, UserClient};
use crate::shared::prompt::Prompt;
use crate::tracker::{Issue, Tracker, TrackerError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    SelectRepo { repo: String },
    SelectIssue { repo: String, issue: String },
    AddIssue { repo: String, title: String },
    EditIssue { repo: String, issue: String },
    CloseIssue { repo: String, issue: String },
    CommentIssue { repo: String, issue: String, body: String },
    Help,
}

/// Everything a command needs to run.
pub struct Context<'a, C> {
    pub tracker: &'a mut Tracker<C>,
    pub prompt: &'a mut dyn Prompt,
    pub out: &'a mut dyn Write,
}

impl<C> Context<'_, C> {
    pub fn print(&mut self, text: &str) {
        writeln!(self.out, "{text}").ok();
    }
}

struct Failure {
    message: String,
    fallback: Option<Command>,
}

impl Failure {
    fn new(error: impl Display, fallback: Option<Command>) -> Self {
        Self {
            message: error.to_string(),
            fallback,
        }
    }
}

impl Command {
    /// Run the command, following fallbacks until one succeeds.
    pub async fn run<C>(self, current: &Selection, ctx: &mut Context<'_, C>) -> Selection
    where
        C: UserClient + RepoClient + IssueClient,
    {
        let mut next = Some(self);
        while let Some(command) = next.take() {
            tracing::debug!(?command, "running command");
            match command.execute(current, ctx).await {
                Ok(selection) => return selection,
                Err(failure) => {
                    tracing::warn!(message = %failure.message, fallback = ?failure.fallback, "command failed");
                    ctx.print(&failure.message);
                    next = failure.fallback;
                }
            }
        }
        Selection::none()
    }

    async fn execute<C>(self, current: &Selection, ctx: &mut Context<'_, C>) -> Result<Selection, Failure>
    where
        C: UserClient + RepoClient + IssueClient,
    {
        match self {
            Self::List => {
                let names = ctx
                    .tracker
                    .repository_names()
                    .map_err(|e| Failure::new(e, None))?;
                ctx.print(&view::format_repository_list(&names));
                Ok(Selection::none())
            }

            Self::SelectRepo { repo } => {
                let repository = ctx
                    .tracker
                    .ensure_repository_loaded(&repo)
                    .await
                    .map_err(|e| Failure::new(e, Some(Self::List)))?;
                let text = view::format_repository(repository);
                let selection = Selection::repository(repository.full_name());
                ctx.print(&text);
                Ok(selection)
            }

            Self::SelectIssue { repo, issue } => {
                let selected = ctx
                    .tracker
                    .ensure_issue_loaded(&repo, &issue)
                    .await
                    .map_err(|e| Failure::new(e, Some(Self::SelectRepo { repo: repo.clone() })))?;
                let (text, selection) = (view::format_issue(selected), select(selected));
                ctx.print(&text);
                Ok(selection)
            }

            Self::AddIssue { repo, title } => {
                let back = || Self::SelectRepo { repo: repo.clone() };
                let draft =
                    read_draft(&mut *ctx.prompt, &title).map_err(|e| Failure::new(e, Some(back())))?;
                let created = ctx
                    .tracker
                    .add_issue(&repo, draft)
                    .await
                    .map_err(|e| Failure::new(e, Some(back())))?;
                let text = format!(
                    "Created issue #{}.\n{}",
                    created.number(),
                    view::format_issue(created)
                );
                let selection = Selection::repository(created.repository());
                ctx.print(&text);
                Ok(selection)
            }

            Self::EditIssue { repo, issue } => {
                let back = || Self::SelectIssue {
                    repo: repo.clone(),
                    issue: issue.clone(),
                };
                // Fail before prompting when the issue is gone.
                ctx.tracker
                    .ensure_issue_loaded(&repo, &issue)
                    .await
                    .map_err(|e| issue_failure(e, &repo, &issue))?;
                let changes =
                    read_changes(&mut *ctx.prompt).map_err(|e| Failure::new(e, Some(back())))?;
                let edited = ctx
                    .tracker
                    .edit_issue(&repo, &issue, changes)
                    .await
                    .map_err(|e| Failure::new(e, Some(back())))?;
                let (text, selection) = (view::format_issue(edited), select(edited));
                ctx.print(&text);
                Ok(selection)
            }

            Self::CloseIssue { repo, issue } => {
                let closed = ctx
                    .tracker
                    .close_issue(&repo, &issue)
                    .await
                    .map_err(|e| issue_failure(e, &repo, &issue))?;
                let text = format!("Closed issue #{}: {}", closed.number(), closed.title());
                let full_name = closed.repository().to_string();
                ctx.print(&text);
                if let Ok(repository) = ctx.tracker.repository(&full_name) {
                    let listing = view::format_repository(repository);
                    ctx.print(&listing);
                }
                Ok(Selection::repository(full_name))
            }

            Self::CommentIssue { repo, issue, body } => {
                let commented = ctx
                    .tracker
                    .add_comment(&repo, &issue, &body)
                    .await
                    .map_err(|e| issue_failure(e, &repo, &issue))?;
                let (text, selection) = (view::format_issue(commented), select(commented));
                ctx.print(&text);
                Ok(selection)
            }

            Self::Help => {
                ctx.print(&view::format_help());
                Ok(current.clone())
            }
        }
    }
}

fn select(issue: &Issue) -> Selection {
    Selection::issue(issue.repository(), issue.number(), issue.title())
}

/// Failure of an operation on a named issue: back to the repository when the
/// issue is gone, otherwise back to the issue.
fn issue_failure(error: TrackerError, repo: &str, issue: &str) -> Failure {
    let fallback = if error.is_not_found() {
        Command::SelectRepo {
            repo: repo.to_string(),
        }
    } else {
        Command::SelectIssue {
            repo: repo.to_string(),
            issue: issue.to_string(),
        }
    };
    Failure::new(error, Some(fallback))
}
