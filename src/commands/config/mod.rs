use anyhow::Context;
use clap::Subcommand;

use crate::shared::config::{config_file_in, config_home, generate_schema};

/// Configuration management commands.
#[derive(Subcommand, Clone, PartialEq, Eq, Debug)]
pub enum ConfigCommands {
    /// Print JSON Schema for the configuration file
    Schema,

    /// Print the path of the configuration file ghtrack reads
    Path,
}

impl ConfigCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Schema => {
                let json = serde_json::to_string_pretty(&generate_schema())?;
                println!("{json}");
            }
            Self::Path => {
                let dir = config_home().context("Cannot locate config directory: HOME is not set")?;
                println!("{}", config_file_in(&dir).display());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_json() -> serde_json::Value {
        serde_json::to_value(generate_schema()).unwrap()
    }

    #[test]
    fn schema_describes_config_sections() {
        let value = schema_json();

        assert_eq!(value["title"], "Config");
        assert_eq!(value["type"], "object");
        let props = value["properties"].as_object().unwrap();
        for section in ["github", "shell", "log"] {
            assert!(props.contains_key(section), "missing section {section}");
        }
    }

    #[test]
    fn schema_documents_nested_settings() {
        let value = schema_json();

        let defs = value["$defs"].as_object().unwrap();
        let github = defs["GitHubConfig"]["properties"].as_object().unwrap();
        assert!(github.contains_key("api_url"));
        assert!(github.contains_key("repos_accept"));
        assert!(github.contains_key("timeout_secs"));
        let shell = defs["ShellConfig"]["properties"].as_object().unwrap();
        assert!(shell.contains_key("login_attempts"));
    }

    #[test]
    fn path_fails_without_home() {
        temp_env::with_vars(
            [("HOME", None::<&str>), ("XDG_CONFIG_HOME", None)],
            || {
                let err = ConfigCommands::Path.run().unwrap_err();
                assert!(err.to_string().contains("HOME is not set"));
            },
        );
    }
}
