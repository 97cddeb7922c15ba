//! Relative-time rendering ("5 minutes ago") for activity columns.

use chrono::{DateTime, Utc};

/// Render a timestamp relative to `now`.
///
/// Future timestamps clamp to "0 seconds ago". The unit cascade matches the
/// dashboard's activity column: seconds, minutes, hours, days, weeks (up to
/// four), months, years.
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - timestamp).num_seconds().max(0);
    if secs < 60 {
        return format!("{} seconds ago", secs);
    }

    let minutes = secs / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    if days < 7 {
        return plural(days, "day");
    }

    let weeks = days / 7;
    if weeks < 4 {
        return plural(weeks, "week");
    }

    let months = days / 30;
    if months < 12 {
        return plural(months, "month");
    }

    plural(days / 365, "year")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
