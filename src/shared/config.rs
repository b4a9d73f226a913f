use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::Deserialize;

use super::env_var::EnvVars;

/// Top-level configuration for ghtrack.
#[derive(Debug, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// GitHub API settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Interactive session settings.
    #[serde(default)]
    pub shell: ShellConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// GitHub API configuration.
#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GitHubConfig {
    /// REST API root (default: "https://api.github.com").
    #[serde(default = "default_api_url")]
    #[schemars(default = "default_api_url")]
    pub api_url: String,

    /// Media type sent in the Accept header (default: "application/vnd.github.v3+json").
    #[serde(default = "default_accept")]
    #[schemars(default = "default_accept")]
    pub accept: String,

    /// Preview media type used when listing the user's repositories.
    /// Falls back to `accept` when unset.
    #[serde(default)]
    pub repos_accept: Option<String>,

    /// Per-request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    #[schemars(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            accept: default_accept(),
            repos_accept: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Interactive session configuration.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    /// Number of login attempts before giving up (default: 3).
    #[serde(default = "default_login_attempts")]
    #[schemars(default = "default_login_attempts")]
    pub login_attempts: u32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            login_attempts: default_login_attempts(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// tracing filter directive (default: "info"). GHTRACK_LOG takes precedence.
    #[serde(default = "default_log_level")]
    #[schemars(default = "default_log_level")]
    pub level: String,

    /// Write logs to the cache directory instead of stderr (default: true).
    #[serde(default = "default_true")]
    #[schemars(default = "default_true")]
    pub file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_true(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_accept() -> String {
    "application/vnd.github.v3+json".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_login_attempts() -> u32 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file (permission error, etc.)
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error
    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

const FILENAMES: [&str; 2] = ["config.yaml", "config.yml"];

/// ~/.config/ghtrack, honoring XDG_CONFIG_HOME.
pub fn config_home() -> Option<PathBuf> {
    super::dirs::config_dir().map(|dir| dir.join("ghtrack"))
}

/// The file `load_config_from_dir` reads: the first of config.yaml and
/// config.yml that exists, else where config.yaml would go.
pub fn config_file_in(dir: &Path) -> PathBuf {
    FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .unwrap_or_else(|| dir.join(FILENAMES[0]))
}

/// Load configuration from ~/.config/ghtrack/config.ya?ml and apply
/// GHTRACK_* environment overrides.
/// Returns Config::default() (plus overrides) if no config file exists.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = match config_home() {
        Some(dir) => load_config_from_dir(&dir)?,
        None => Config::default(),
    };
    config.apply_env(&EnvVars::load());
    Ok(config)
}

/// Load configuration from a specific directory.
/// Searches for config.yaml, then config.yml in the given directory.
/// Returns Config::default() if neither file exists.
pub fn load_config_from_dir(dir: &Path) -> anyhow::Result<Config> {
    for filename in FILENAMES {
        let path = dir.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(content) => return parse_config(&content, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ConfigError::ReadError { path, source: e }.into()),
        }
    }

    Ok(Config::default())
}

/// Parse YAML content into Config.
fn parse_config(content: &str, path: &Path) -> anyhow::Result<Config> {
    serde_yaml::from_str(content)
        .map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
        .map_err(Into::into)
}

impl Config {
    /// Environment variables win over the config file.
    pub fn apply_env(&mut self, env: &EnvVars) {
        if let Some(url) = &env.api_url {
            self.github.api_url = url.clone();
        }
        if let Some(level) = &env.log {
            self.log.level = level.clone();
        }
    }
}

/// Generate JSON Schema for the Config struct.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}
