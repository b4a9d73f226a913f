mod cli;
mod commands;
mod infra;
mod shared;
mod tracker;

use clap::Parser;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    let command = Cli::parse().into_command();
    let config = shared::config::load_config()?;
    let _guard = shared::logging::init(&config.log);

    tracing::debug!(?command, "starting");
    command.run(&config)
}
