//! tracing subscriber setup.
//!
//! stdout belongs to the interactive session, so logs go to a daily-rolling
//! JSON file under the cache directory. When file logging is disabled or the
//! directory cannot be created, plain text goes to stderr instead.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use super::config::LogConfig;
use super::dirs;

/// Install the global subscriber.
///
/// The returned guard flushes buffered file output on drop and must be kept
/// alive for the whole process.
pub fn init(config: &LogConfig) -> Option<WorkerGuard> {
    let log_dir = dirs::log_dir().filter(|_| config.file);

    if let Some(dir) = log_dir {
        match file_appender(&dir) {
            Ok(appender) => {
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let _ = tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(env_filter(&config.level))
                    .with_writer(writer)
                    .try_init();
                return Some(guard);
            }
            Err(e) => eprintln!(
                "Warning: cannot write logs to {}: {e}; logging to stderr",
                dir.display()
            ),
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.level))
        .with_writer(std::io::stderr)
        .try_init();
    None
}

/// Build a filter from a directive, falling back to "info" when it does not parse.
fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn file_appender(dir: &Path) -> anyhow::Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("ghtrack")
        .filename_suffix("log")
        .build(dir)?;
    Ok(appender)
}
