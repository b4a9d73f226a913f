//! Text rendering for the interactive session.

use chrono::{DateTime, Utc};
use indoc::indoc;

use super::command_type::CommandType;
use super::format::{format_relative_time, indent_text};
use crate::shared::table::{Row, fit};
use crate::tracker::{Issue, Repository};

const TITLE_WIDTH: usize = 48;

/// Numbered repository list, 1-based to match selection by position.
pub fn format_repository_list(names: &[String]) -> String {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {name}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_repository(repo: &Repository) -> String {
    let mut out = repo.full_name();

    if repo.issues().is_empty() {
        out.push_str("\nNo issues.");
        return out;
    }

    for issue in repo.issues() {
        let mut row = Row::new()
            .cell(&format!("#{}", issue.number()), 6)
            .cell(issue.title(), TITLE_WIDTH)
            .cell(issue.state().as_str(), 6);
        if !issue.labels().is_empty() {
            row = row.rest(&format!("[{}]", issue.labels().join(", ")));
        }
        out.push('\n');
        out.push_str(&row.render("  "));
    }
    out
}

pub fn format_issue(issue: &Issue) -> String {
    let now = Utc::now();
    format_issue_with(issue, |ts| format_relative_time(ts, now))
}

/// Render an issue with a custom timestamp formatter.
fn format_issue_with<F>(issue: &Issue, time_formatter: F) -> String
where
    F: Fn(&DateTime<Utc>) -> String,
{
    let mut out = format!(
        "#{} {} [{}]\nRepository: {}",
        issue.number(),
        issue.title(),
        issue.state(),
        issue.repository()
    );

    if let Some(assignee) = issue.assignee() {
        out.push_str(&format!("\nAssignee: {assignee}"));
    }
    if let Some(milestone) = issue.milestone() {
        out.push_str(&format!("\nMilestone: {}", milestone.title));
    }
    if !issue.labels().is_empty() {
        out.push_str(&format!("\nLabels: {}", issue.labels().join(", ")));
    }
    if !issue.applicable_labels().is_empty() {
        out.push_str(&format!(
            "\nAvailable labels: {}",
            issue.applicable_labels().join(", ")
        ));
    }

    match issue.body() {
        Some(body) => {
            out.push_str("\n\n");
            out.push_str(&indent_text(body.trim_end(), "  "));
        }
        None => out.push_str("\n\n  No description provided."),
    }

    if !issue.comments().is_empty() {
        out.push_str(&format!("\n\nComments ({}):", issue.comments().len()));
        for comment in issue.comments() {
            let author = comment.author.as_deref().unwrap_or("ghost");
            let when = comment
                .created_at
                .as_ref()
                .map(|ts| format!(" {}", time_formatter(ts)))
                .unwrap_or_default();
            out.push_str(&format!("\n  {author} commented{when}:\n"));
            out.push_str(&indent_text(comment.body.trim_end(), "    "));
        }
    }

    out
}

pub fn format_help() -> String {
    let entries = [
        (CommandType::List, "", "List your repositories"),
        (
            CommandType::Select,
            " <name|#>",
            "Select a repository, or an issue of the selected repository",
        ),
        (CommandType::Back, "", "Go up one level"),
        (CommandType::Add, " <title>", "Add an issue to the selected repository"),
        (CommandType::Edit, "", "Edit the selected issue"),
        (CommandType::Close, " [issue]", "Close the selected issue, or the named one"),
        (CommandType::Help, "", "Show this help"),
    ];

    let mut out = String::from("Commands:");
    for (kind, args, description) in entries {
        let usage = format!("{}{args}", kind.aliases().collect::<Vec<_>>().join(", "));
        out.push_str(&format!("\n  {} {description}", fit(&usage, 24)));
    }
    out.push_str(&format!("\n  {} Quit", fit("exit", 24)));
    out.push('\n');
    out.push_str(indoc! {"
        Any other input selects a repository (by position or name) or an issue
        (by #number or title), or comments on the selected issue."});
    out
}
