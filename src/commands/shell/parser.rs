//! Turns an input line into a [`Command`] for the current selection.
//!
//! The first word is looked up as a keyword; anything else is a parameter
//! whose meaning depends on what is selected.

use super::command::Command;
use super::command_type::CommandType;
use super::error::{ContextError, ParseError, SyntaxError};
use super::session::Selection;

pub fn parse(input: &str, selection: &Selection) -> Result<Command, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SyntaxError::Empty.into());
    }

    let (keyword, rest) = match input.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (input, ""),
    };
    let repo = selection.repo().map(str::to_string);
    let issue = selection.selected_issue().map(|i| i.key());

    let command = match CommandType::from_keyword(keyword) {
        CommandType::List => Command::List,
        CommandType::Help => Command::Help,
        CommandType::Select => {
            if rest.is_empty() {
                return Err(SyntaxError::MissingParameter.into());
            }
            match (repo, issue) {
                (None, _) => Command::SelectRepo {
                    repo: rest.to_string(),
                },
                (Some(repo), None) => Command::SelectIssue {
                    repo,
                    issue: rest.to_string(),
                },
                (Some(_), Some(_)) => return Err(ContextError::SelectWithIssue.into()),
            }
        }
        CommandType::Back => match (repo, issue) {
            (None, _) => return Err(ContextError::BackWithoutRepository.into()),
            (Some(_), None) => Command::List,
            (Some(repo), Some(_)) => Command::SelectRepo { repo },
        },
        CommandType::Add => match (repo, issue) {
            (None, _) => return Err(ContextError::AddWithoutRepository.into()),
            (Some(_), Some(_)) => return Err(ContextError::AddWithIssue.into()),
            (Some(_), None) if rest.is_empty() => return Err(SyntaxError::MissingTitle.into()),
            (Some(repo), None) => Command::AddIssue {
                repo,
                title: rest.to_string(),
            },
        },
        CommandType::Edit => match (repo, issue) {
            (Some(repo), Some(issue)) => Command::EditIssue { repo, issue },
            _ => return Err(ContextError::EditWithoutIssue.into()),
        },
        CommandType::Close => match (repo, issue) {
            (None, _) => return Err(ContextError::CloseWithoutRepository.into()),
            (Some(repo), Some(issue)) => Command::CloseIssue { repo, issue },
            (Some(_), None) if rest.is_empty() => return Err(SyntaxError::MissingIssue.into()),
            (Some(repo), None) => Command::CloseIssue {
                repo,
                issue: rest.to_string(),
            },
        },
        CommandType::Default => match (repo, issue) {
            (None, _) => Command::SelectRepo {
                repo: input.to_string(),
            },
            (Some(repo), None) => Command::SelectIssue {
                repo,
                issue: input.to_string(),
            },
            (Some(repo), Some(issue)) => Command::CommentIssue {
                repo,
                issue,
                body: input.to_string(),
            },
        },
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const REPO: &str = "octocat/hello";

    fn nothing() -> Selection {
        Selection::none()
    }

    fn in_repo() -> Selection {
        Selection::repository(REPO)
    }

    fn in_issue() -> Selection {
        Selection::issue(REPO, 4, "Crash")
    }

    fn select_repo(repo: &str) -> Command {
        Command::SelectRepo {
            repo: repo.to_string(),
        }
    }

    #[rstest]
    #[case::list("list")]
    #[case::ls("ls")]
    #[case::l("l")]
    #[case::upper("LIST")]
    #[case::with_args("ls everything")]
    fn list_aliases_in_every_context(#[case] input: &str) {
        for selection in [nothing(), in_repo(), in_issue()] {
            assert_eq!(parse(input, &selection), Ok(Command::List));
        }
    }

    #[rstest]
    #[case("help")]
    #[case("h")]
    #[case("?")]
    fn help_aliases(#[case] input: &str) {
        assert_eq!(parse(input, &in_issue()), Ok(Command::Help));
    }

    #[rstest]
    #[case::keyword("select MyRepo")]
    #[case::short("s MyRepo")]
    #[case::bare("MyRepo")]
    #[case::padded("   MyRepo  ")]
    fn selects_repository_when_nothing_selected(#[case] input: &str) {
        assert_eq!(parse(input, &nothing()), Ok(select_repo("MyRepo")));
    }

    #[test]
    fn select_keeps_multi_word_parameter() {
        assert_eq!(
            parse("select  Crash on   start", &in_repo()),
            Ok(Command::SelectIssue {
                repo: REPO.to_string(),
                issue: "Crash on   start".to_string(),
            })
        );
    }

    #[rstest]
    #[case::keyword("select issue1")]
    #[case::bare("issue1")]
    fn selects_issue_when_repository_selected(#[case] input: &str) {
        assert_eq!(
            parse(input, &in_repo()),
            Ok(Command::SelectIssue {
                repo: REPO.to_string(),
                issue: "issue1".to_string(),
            })
        );
    }

    #[test]
    fn bare_input_comments_when_issue_selected() {
        assert_eq!(
            parse("issue1", &in_issue()),
            Ok(Command::CommentIssue {
                repo: REPO.to_string(),
                issue: "#4".to_string(),
                body: "issue1".to_string(),
            })
        );
    }

    #[rstest]
    #[case::empty("", SyntaxError::Empty.into())]
    #[case::blank("  \t ", SyntaxError::Empty.into())]
    #[case::select_without_parameter("select", SyntaxError::MissingParameter.into())]
    #[case::select_blank_parameter("s   ", SyntaxError::MissingParameter.into())]
    fn syntax_errors(#[case] input: &str, #[case] expected: ParseError) {
        assert_eq!(parse(input, &nothing()), Err(expected));
    }

    #[test]
    fn select_with_issue_selected_is_context_error() {
        assert_eq!(
            parse("select other", &in_issue()),
            Err(ContextError::SelectWithIssue.into())
        );
    }

    #[rstest]
    #[case::nothing(nothing(), Err(ContextError::BackWithoutRepository.into()))]
    #[case::repo(in_repo(), Ok(Command::List))]
    #[case::issue(in_issue(), Ok(select_repo(REPO)))]
    fn back(#[case] selection: Selection, #[case] expected: Result<Command, ParseError>) {
        for alias in ["back", "b", "up"] {
            assert_eq!(parse(alias, &selection), expected);
        }
    }

    #[rstest]
    #[case::nothing(nothing(), Err(ContextError::AddWithoutRepository.into()))]
    #[case::issue(in_issue(), Err(ContextError::AddWithIssue.into()))]
    fn add_context_errors(#[case] selection: Selection, #[case] expected: Result<Command, ParseError>) {
        assert_eq!(parse("add Crash", &selection), expected);
    }

    #[rstest]
    #[case("add")]
    #[case("a   ")]
    fn add_requires_title(#[case] input: &str) {
        assert_eq!(
            parse(input, &in_repo()),
            Err(SyntaxError::MissingTitle.into())
        );
    }

    #[test]
    fn add_uses_rest_of_line_as_title() {
        assert_eq!(
            parse("a Crash on start", &in_repo()),
            Ok(Command::AddIssue {
                repo: REPO.to_string(),
                title: "Crash on start".to_string(),
            })
        );
    }

    #[rstest]
    #[case::nothing(nothing())]
    #[case::repo(in_repo())]
    fn edit_requires_issue(#[case] selection: Selection) {
        assert_eq!(
            parse("edit", &selection),
            Err(ContextError::EditWithoutIssue.into())
        );
    }

    #[test]
    fn edit_targets_selected_issue() {
        assert_eq!(
            parse("e", &in_issue()),
            Ok(Command::EditIssue {
                repo: REPO.to_string(),
                issue: "#4".to_string(),
            })
        );
    }

    #[test]
    fn close_requires_repository() {
        assert_eq!(
            parse("close 3", &nothing()),
            Err(ContextError::CloseWithoutRepository.into())
        );
    }

    #[test]
    fn close_in_repository_needs_issue_name() {
        assert_eq!(
            parse("close", &in_repo()),
            Err(SyntaxError::MissingIssue.into())
        );
        assert_eq!(
            parse("c #3", &in_repo()),
            Ok(Command::CloseIssue {
                repo: REPO.to_string(),
                issue: "#3".to_string(),
            })
        );
    }

    #[test]
    fn close_targets_selected_issue() {
        assert_eq!(
            parse("close", &in_issue()),
            Ok(Command::CloseIssue {
                repo: REPO.to_string(),
                issue: "#4".to_string(),
            })
        );
    }

    #[test]
    fn error_messages_are_printable() {
        assert_eq!(
            parse("", &nothing()).unwrap_err().to_string(),
            "Empty command."
        );
        assert_eq!(
            parse("back", &nothing()).unwrap_err().to_string(),
            "No repository is selected. Unable to go further up."
        );
    }
}
