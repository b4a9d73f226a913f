use std::path::PathBuf;

/// Environment variable to override the cache directory (primarily for testing).
const CACHE_DIR_ENV: &str = "GHTRACK_CACHE_DIR";

const APP_NAME: &str = "ghtrack";

fn home_dir() -> Option<PathBuf> {
    non_empty_env("HOME").map(PathBuf::from)
}

/// Returns the XDG config directory (~/.config or $XDG_CONFIG_HOME).
/// Empty values are treated as unset per XDG Base Directory Specification.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(xdg) = non_empty_env("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg));
    }
    home_dir().map(|home| home.join(".config"))
}

/// Base cache directory for ghtrack: $GHTRACK_CACHE_DIR, else
/// $XDG_CACHE_HOME/ghtrack, else ~/.cache/ghtrack.
pub fn cache_dir() -> Option<PathBuf> {
    if let Some(dir) = non_empty_env(CACHE_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    let base = match non_empty_env("XDG_CACHE_HOME") {
        Some(xdg) => PathBuf::from(xdg),
        None => home_dir()?.join(".cache"),
    };
    Some(base.join(APP_NAME))
}

/// Directory holding rolling log files.
/// Returns ~/.cache/ghtrack/logs
pub fn log_dir() -> Option<PathBuf> {
    cache_dir().map(|d| d.join("logs"))
}

/// Returns the value of an environment variable, treating empty strings as unset.
fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
