//! Utility functions for issueblog

use chrono::{DateTime, Utc};

/// Formats a timestamp as human readable relative time
///
/// Produces strings like "5 min ago" or "2 weeks ago". Timestamps after
/// `now` are treated as "just now".
///
/// # Arguments
///
/// * `then`: Point in time to describe
/// * `now`: Reference time
///
/// # Returns
///
/// Human readable relative time string
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    // Clock skew between tracker and build machine can put issues in the future
    let secs = (now - then).num_seconds().max(0);
    let minutes = secs / 60;
    let hours = secs / 3600;
    let days = secs / 86400;

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else if hours < 24 {
        format!("{} hr ago", hours)
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        format!("{} weeks ago", days / 7)
    } else if days < 365 {
        format!("{} months ago", days / 30)
    } else {
        format!("{} years ago", days / 365)
    }
}

/// Formats a timestamp as calendar date, e.g. "2024-03-01".
pub fn format_date(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d").to_string()
}
