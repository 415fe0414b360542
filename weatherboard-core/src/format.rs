//! Date and time rendering for display.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// `YYYY-MM-DD`
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%Y-%m-%d").to_string()
}

/// `HH:MM`, 24-hour clock.
pub fn format_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%H:%M").to_string()
}

pub fn format_date_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("{} {}", format_date(date), format_time(date))
}

/// "just now", "5 minutes ago", "1 day ago"; older than a week falls back to
/// the plain date.
pub fn format_relative_time<Tz: TimeZone>(then: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    let seconds = now.clone().signed_duration_since(then.clone()).num_seconds();
    let minutes = seconds.div_euclid(60);
    let hours = minutes.div_euclid(60);
    let days = hours.div_euclid(24);

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else {
        format_date(then)
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
