use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::config::ConfigCommands;
use crate::commands::shell::ShellArgs;
use crate::shared::config::Config;

#[derive(Parser, Debug)]
#[command(name = "ghtrack", bin_name = "ghtrack", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, PartialEq, Eq, Debug)]
pub enum Commands {
    /// Start the interactive session (default)
    Shell(ShellArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    pub fn run(&self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Shell(args) => crate::commands::shell::run(args, config),
            Self::Config(cmd) => cmd.run(),
            Self::Completions { shell } => {
                let mut command = Cli::command();
                clap_complete::generate(*shell, &mut command, "ghtrack", &mut io::stdout());
                Ok(())
            }
        }
    }
}

impl Cli {
    /// The requested subcommand, or the interactive session.
    pub fn into_command(self) -> Commands {
        self.command
            .unwrap_or_else(|| Commands::Shell(ShellArgs::default()))
    }
}
