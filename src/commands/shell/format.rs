use chrono::{DateTime, Utc};

/// Formats a timestamp relative to `now`.
///
/// Returns strings like "just now", "5 minutes ago", "3 hours ago", "2 days ago", "1 week ago".
/// Timestamps in the future are shown as an RFC 3339 date instead.
pub fn format_relative_time(timestamp: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(*timestamp).num_seconds();

    if seconds < 0 {
        return timestamp.to_rfc3339();
    }

    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        plural(seconds / 60, "minute")
    } else if seconds < 86400 {
        plural(seconds / 3600, "hour")
    } else if seconds < 604800 {
        plural(seconds / 86400, "day")
    } else {
        plural(seconds / 604800, "week")
    }
}

fn plural(count: i64, unit: &str) -> String {
    format!("{count} {unit}{} ago", if count == 1 { "" } else { "s" })
}

/// Adds an indent prefix to the beginning of each line in the text.
pub fn indent_text(text: &str, indent: &str) -> String {
    let mut result = text
        .lines()
        .map(|line| format!("{indent}{line}"))
        .collect::<Vec<_>>()
        .join("\n");
    if !text.is_empty() && text.ends_with('\n') {
        result.push('\n');
    }
    result
}
