//! Centralized reader for GHTRACK_* environment variables.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

const USERNAME: &str = "GHTRACK_USERNAME";
const PASSWORD: &str = "GHTRACK_PASSWORD";
const API_URL: &str = "GHTRACK_API_URL";
const LOG: &str = "GHTRACK_LOG";

/// Snapshot of all GHTRACK_* environment variables at load time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvVars {
    /// GitHub login used instead of prompting.
    pub username: Option<String>,

    /// Password or personal access token used instead of prompting.
    pub password: Option<String>,

    /// Overrides `github.api_url` from the config file.
    pub api_url: Option<String>,

    /// tracing filter directive, e.g. "debug" or "ghtrack=trace".
    pub log: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvVars {
    /// Read all GHTRACK_* environment variables from the current process.
    pub fn load() -> Self {
        Self {
            username: non_empty_var(USERNAME),
            password: non_empty_var(PASSWORD),
            api_url: non_empty_var(API_URL),
            log: non_empty_var(LOG),
        }
    }
}
