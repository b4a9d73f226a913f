//! Interactive issue-tracker session.

mod command;
mod command_type;
mod error;
mod format;
mod input;
mod parser;
mod session;
mod view;

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use anyhow::{Context as _, bail};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crate::infra::github::{GitHubClient, IssueClient, RepoClient, UserClient};
use crate::shared::config::Config;
use crate::shared::env_var::EnvVars;
use crate::shared::prompt::{Prompt, TerminalPrompt};
use crate::tracker::Tracker;
use command::{Command, Context};
use session::Selection;

const EXIT: &str = "exit";
const PROMPT_USERNAME: &str = "GitHub username: ";
const PROMPT_PASSWORD: &str = "GitHub password: ";

#[derive(Args, Clone, PartialEq, Eq, Debug, Default)]
pub struct ShellArgs {
    /// GitHub login (default: $GHTRACK_USERNAME, else prompt)
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Credentials known before prompting.
#[derive(Debug, Default)]
struct Credentials {
    username: Option<String>,
    password: Option<String>,
}

#[tokio::main]
pub async fn run(args: &ShellArgs, config: &Config) -> anyhow::Result<()> {
    let env = EnvVars::load();
    let credentials = Credentials {
        username: args.user.clone().or(env.username),
        password: env.password,
    };

    let client = GitHubClient::new(&config.github)?;
    let mut tracker = Tracker::new(client);
    let mut prompt = TerminalPrompt::new();
    let mut stdout = io::stdout();

    run_session(
        &mut tracker,
        &mut prompt,
        &mut stdout,
        credentials,
        config.shell.login_attempts,
    )
    .await
}

async fn run_session<C>(
    tracker: &mut Tracker<C>,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
    credentials: Credentials,
    login_attempts: u32,
) -> anyhow::Result<()>
where
    C: UserClient + RepoClient + IssueClient,
{
    let Some(login) = login(tracker, prompt, out, credentials, login_attempts).await? else {
        return Ok(());
    };
    writeln!(out, "Logged in as {login}.\nLoading data from GitHub...")?;

    let spinner = spinner("Loading repositories...");
    let loaded = tracker.initialise().await;
    spinner.finish_and_clear();
    loaded.context("Error updating local data. Restart to try again.")?;

    let mut ctx = Context {
        tracker,
        prompt,
        out,
    };
    let mut selection = Command::List.run(&Selection::none(), &mut ctx).await;

    loop {
        let Some(line) = ctx.prompt.read_line(&prompt_label(&selection))? else {
            // End of input: leave the cursor on a fresh line.
            writeln!(ctx.out)?;
            break;
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case(EXIT) {
            break;
        }

        match parser::parse(line, &selection) {
            Ok(command) => selection = command.run(&selection, &mut ctx).await,
            Err(e) => {
                tracing::debug!(input = line, error = %e, "rejected input");
                ctx.print(&e.to_string());
            }
        }
    }

    tracing::info!("session ended");
    Ok(())
}

/// Log in, asking for whatever is missing. Returns `None` when input ends first.
async fn login<C>(
    tracker: &mut Tracker<C>,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
    mut credentials: Credentials,
    attempts: u32,
) -> anyhow::Result<Option<String>>
where
    C: UserClient + RepoClient + IssueClient,
{
    let attempts = attempts.max(1);
    for attempt in 1..=attempts {
        let username = match credentials.username.clone() {
            Some(username) => username,
            None => match prompt.read_line(PROMPT_USERNAME)? {
                Some(username) => username.trim().to_string(),
                None => return Ok(None),
            },
        };
        // A stored password is only tried once; later attempts ask.
        let password = match credentials.password.take() {
            Some(password) => password,
            None => match prompt.read_secret(PROMPT_PASSWORD)? {
                Some(password) => password,
                None => return Ok(None),
            },
        };

        match tracker.login(&username, &password).await {
            Ok(login) => return Ok(Some(login)),
            Err(e) => {
                tracing::warn!(attempt, %username, error = %e, "login failed");
                writeln!(out, "{e}")?;
            }
        }
    }
    bail!("Giving up after {attempts} failed login attempts")
}

fn prompt_label(selection: &Selection) -> String {
    if selection.repo().is_some() {
        format!("[{selection}] Command: ")
    } else {
        "Command: ".to_string()
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
