//! Some utility functions

use chrono::{DateTime, Utc};

use crate::event::Event;
use crate::proximity::sorted_by_proximity;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

const UNITS: [(i64, &str); 6] = [
    (YEAR, "year"),
    (MONTH, "month"),
    (WEEK, "week"),
    (DAY, "day"),
    (HOUR, "hour"),
    (MINUTE, "minute"),
];

/// Describe `date` relatively to `now`, e.g. "in 3 hours" or "2 days ago".
///
/// Anything closer than a minute is described as one minute away, in the right direction.
pub fn relative_description(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (date - now).num_seconds();
    let in_future = seconds >= 0;
    let magnitude = seconds.abs().max(MINUTE);

    let (unit_len, unit_name) = UNITS.iter()
        .find(|(len, _)| magnitude >= *len)
        .copied()
        .unwrap_or((MINUTE, "minute"));
    let count = magnitude / unit_len;
    let plural = if count == 1 { "" } else { "s" };

    if in_future {
        format!("in {} {}{}", count, unit_name, plural)
    } else {
        format!("{} {}{} ago", count, unit_name, plural)
    }
}

/// A debug utility that pretty-prints events, sorted by proximity to `now`
pub fn print_event_list(events: &[Event], now: DateTime<Utc>) {
    for event in sorted_by_proximity(events, now) {
        let marker = if event.is_upcoming(now) { " " } else { "x" };
        println!("    {} {}\t{}\t{}", marker, event.title(), relative_description(event.date(), now), event.id());
    }
}
