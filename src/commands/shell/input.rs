//! Interactive questions asked by `add` and `edit`.

use super::error::InputError;
use crate::shared::prompt::{Prompt, split_list};
use crate::tracker::{IssueChanges, IssueDraft};

const PROMPT_BODY: &str = "Body: ";
const PROMPT_ASSIGNEE: &str = "Assignee (leave empty for none): ";
const PROMPT_MILESTONE: &str = "Milestone (leave empty for none): ";
const PROMPT_LABELS: &str = "Labels (comma-separated): ";

const PROMPT_NEW_TITLE: &str = "New title (enter nothing to keep the current title): ";
const PROMPT_NEW_BODY: &str = "New body (enter nothing to keep, a space to remove): ";
const PROMPT_NEW_ASSIGNEE: &str = "New assignee (enter nothing to keep, a space to remove): ";
const PROMPT_NEW_LABELS: &str =
    "Labels (enter nothing to keep, a space to remove all, comma-separated labels to replace): ";
const PROMPT_NEW_MILESTONE: &str = "New milestone (enter nothing to keep, a space to remove): ";

/// Ask for the remaining fields of a new issue.
pub fn read_draft(prompt: &mut dyn Prompt, title: &str) -> Result<IssueDraft, InputError> {
    let body = ask(prompt, PROMPT_BODY)?;
    let assignee = ask(prompt, PROMPT_ASSIGNEE)?;
    let milestone = ask(prompt, PROMPT_MILESTONE)?;
    let labels = ask(prompt, PROMPT_LABELS)?;

    Ok(IssueDraft {
        title: title.to_string(),
        body: non_blank(&body),
        assignee: non_blank(&assignee),
        milestone: non_blank(&milestone),
        labels: split_list(&labels),
    })
}

/// Ask which fields of an issue to change.
pub fn read_changes(prompt: &mut dyn Prompt) -> Result<IssueChanges, InputError> {
    let title = ask(prompt, PROMPT_NEW_TITLE)?;
    let body = ask(prompt, PROMPT_NEW_BODY)?;
    let assignee = ask(prompt, PROMPT_NEW_ASSIGNEE)?;
    let labels = ask(prompt, PROMPT_NEW_LABELS)?;
    let milestone = ask(prompt, PROMPT_NEW_MILESTONE)?;

    Ok(IssueChanges {
        title: non_blank(&title),
        body: clearable(&body),
        assignee: clearable(&assignee),
        labels: (!labels.is_empty()).then(|| split_list(&labels)),
        milestone: clearable(&milestone),
    })
}

fn ask(prompt: &mut dyn Prompt, message: &str) -> Result<String, InputError> {
    prompt.read_line(message)?.ok_or(InputError::Cancelled)
}

fn non_blank(answer: &str) -> Option<String> {
    let trimmed = answer.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Empty keeps the field, whitespace only clears it.
fn clearable(answer: &str) -> Option<Option<String>> {
    if answer.is_empty() {
        return None;
    }
    Some(non_blank(answer))
}
